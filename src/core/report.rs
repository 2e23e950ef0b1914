use crate::domain::model::Dataset;
use crate::utils::error::Result;
use std::fmt;

/// 每列處理時間的彙總；以格式化後的數值計算，與輸出顯示一致
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimingStats {
    pub total: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl TimingStats {
    /// 空資料集的統計值全部為 0
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let values = dataset
            .rows()
            .iter()
            .map(|row| row.processing_time_ms())
            .collect::<Result<Vec<f64>>>()?;

        if values.is_empty() {
            return Ok(Self::default());
        }

        let total: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            total,
            average: total / values.len() as f64,
            min,
            max,
        })
    }

    pub fn print(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for TimingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Time: {:.2} ms", self.total)?;
        writeln!(f, "Average Time: {:.2} ms", self.average)?;
        writeln!(f, "Min Time: {:.2} ms", self.min)?;
        writeln!(f, "Max Time: {:.2} ms", self.max)
    }
}
