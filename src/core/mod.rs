pub mod etl;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{CountryRecord, Dataset, LoadSummary, ProcessedRow};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, TableStore};
pub use crate::utils::error::Result;
