use crate::adapters::SqliteTableStore;
use crate::config::cli::LocalStorage;
use crate::core::pipeline::CountriesPipeline;
use crate::core::report::TimingStats;
use crate::core::{ConfigProvider, LoadSummary, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::PhaseMonitor;
use crate::utils::validation::Validate;
use std::path::Path;

/// 一次完整執行的結果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub records_fetched: usize,
    pub stats: TimingStats,
    pub output: LoadSummary,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor_enabled: bool,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor_enabled,
        }
    }

    /// extract → transform → report → load；任何錯誤立即中止，不寫入任何輸出
    pub async fn run(&self) -> Result<RunReport> {
        let mut monitor = PhaseMonitor::new(self.monitor_enabled);
        tracing::info!("🚀 Starting countries ETL");

        let records = self.pipeline.extract().await?;
        let records_fetched = records.len();
        monitor.finish_phase("extract");

        let dataset = self.pipeline.transform(records).await?;
        debug_assert_eq!(dataset.len(), records_fetched);
        monitor.finish_phase("transform");

        let stats = TimingStats::from_dataset(&dataset)?;
        stats.print();
        monitor.finish_phase("report");

        let output = self.pipeline.load(&dataset).await?;
        monitor.finish_phase("load");

        tracing::info!(
            "📁 Saved {} rows to {} (table) and {}",
            output.table_rows,
            output.database_path,
            output.json_path
        );
        monitor.log_final_stats();

        Ok(RunReport {
            records_fetched,
            stats,
            output,
        })
    }
}

/// 驗證設定後，以本機目錄與 SQLite 檔案作為輸出執行一次
pub async fn run_local<C: ConfigProvider + Validate>(
    config: C,
    monitor_enabled: bool,
) -> Result<RunReport> {
    config.validate()?;

    let output_dir = Path::new(config.output_path());
    let storage = LocalStorage::new(output_dir);
    let table_store = SqliteTableStore::new(output_dir.join(config.database_file()));
    tracing::debug!(
        "Output directory: {}, database: {}",
        output_dir.display(),
        config.database_file()
    );

    let pipeline = CountriesPipeline::new(storage, table_store, config);
    EtlEngine::new_with_monitoring(pipeline, monitor_enabled)
        .run()
        .await
}
