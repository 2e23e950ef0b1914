use crate::domain::model::{CountryRecord, Dataset, LoadSummary, ProcessedRow};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn display_path(&self, path: &str) -> String;
}

/// 關聯式資料表的輸出端；每次呼叫自行開啟並釋放連線
pub trait TableStore: Send + Sync {
    /// 以新資料整個取代 `table`，回傳寫入的列數
    fn replace_table(&self, table: &str, rows: &[ProcessedRow]) -> Result<usize>;
    fn location(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn database_file(&self) -> &str;
    fn json_file(&self) -> &str;
    fn simulated_delay(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<CountryRecord>>;
    async fn transform(&self, records: Vec<CountryRecord>) -> Result<Dataset>;
    async fn load(&self, dataset: &Dataset) -> Result<LoadSummary>;
}
