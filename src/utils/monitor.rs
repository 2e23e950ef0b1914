use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// 單一階段結束時的快照
#[derive(Debug, Clone)]
pub struct PhaseSnapshot {
    pub phase: String,
    pub phase_elapsed: Duration,
    pub total_elapsed: Duration,
    pub memory_mb: Option<u64>,
}

/// 記錄每個 ETL 階段的耗時；cli feature 開啟時順便記錄行程記憶體
pub struct PhaseMonitor {
    enabled: bool,
    started_at: Instant,
    phase_started_at: Instant,
    peak_memory_mb: u64,
    snapshots: Vec<PhaseSnapshot>,
    #[cfg(feature = "cli")]
    system: System,
    #[cfg(feature = "cli")]
    pid: Option<Pid>,
}

impl PhaseMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            started_at: now,
            phase_started_at: now,
            peak_memory_mb: 0,
            snapshots: Vec::new(),
            #[cfg(feature = "cli")]
            system: System::new(),
            #[cfg(feature = "cli")]
            pid: sysinfo::get_current_pid().ok(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn snapshots(&self) -> &[PhaseSnapshot] {
        &self.snapshots
    }

    /// 結束目前階段並開始下一個
    pub fn finish_phase(&mut self, phase: &str) {
        if !self.enabled {
            return;
        }

        let now = Instant::now();
        let memory_mb = self.current_memory_mb();
        if let Some(mb) = memory_mb {
            self.peak_memory_mb = self.peak_memory_mb.max(mb);
        }

        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            phase_elapsed: now.duration_since(self.phase_started_at),
            total_elapsed: now.duration_since(self.started_at),
            memory_mb,
        };

        match snapshot.memory_mb {
            Some(mb) => tracing::info!(
                "📊 {} - took {:?}, memory {}MB, elapsed {:?}",
                snapshot.phase,
                snapshot.phase_elapsed,
                mb,
                snapshot.total_elapsed
            ),
            None => tracing::info!(
                "📊 {} - took {:?}, elapsed {:?}",
                snapshot.phase,
                snapshot.phase_elapsed,
                snapshot.total_elapsed
            ),
        }

        self.snapshots.push(snapshot);
        self.phase_started_at = now;
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB, Phases: {}",
            self.started_at.elapsed(),
            self.peak_memory_mb,
            self.snapshots.len()
        );
    }

    #[cfg(feature = "cli")]
    fn current_memory_mb(&mut self) -> Option<u64> {
        let pid = self.pid?;
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        self.system
            .process(pid)
            .map(|process| process.memory() / 1024 / 1024)
    }

    #[cfg(not(feature = "cli"))]
    fn current_memory_mb(&mut self) -> Option<u64> {
        None
    }
}

impl Default for PhaseMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_records_nothing() {
        let mut monitor = PhaseMonitor::new(false);
        monitor.finish_phase("extract");
        assert!(!monitor.is_enabled());
        assert!(monitor.snapshots().is_empty());
    }

    #[test]
    fn test_enabled_monitor_records_phases_in_order() {
        let mut monitor = PhaseMonitor::new(true);
        monitor.finish_phase("extract");
        std::thread::sleep(Duration::from_millis(5));
        monitor.finish_phase("transform");

        let phases: Vec<&str> = monitor
            .snapshots()
            .iter()
            .map(|s| s.phase.as_str())
            .collect();
        assert_eq!(phases, vec!["extract", "transform"]);
        assert!(monitor.snapshots()[1].phase_elapsed >= Duration::from_millis(5));
        assert!(monitor.snapshots()[1].total_elapsed >= monitor.snapshots()[1].phase_elapsed);
    }
}
