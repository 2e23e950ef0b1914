use crate::adapters::json_lines;
use crate::core::{ConfigProvider, Pipeline, Storage, TableStore};
use crate::domain::model::{CountryRecord, Dataset, DisplayFields, LoadSummary};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;

/// 輸出資料表名稱
pub const COUNTRIES_TABLE: &str = "countries";

pub struct CountriesPipeline<S: Storage, T: TableStore, C: ConfigProvider> {
    storage: S,
    table_store: T,
    config: C,
    client: Client,
}

impl<S: Storage, T: TableStore, C: ConfigProvider> CountriesPipeline<S, T, C> {
    pub fn new(storage: S, table_store: T, config: C) -> Self {
        Self {
            storage,
            table_store,
            config,
            client: Client::new(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait::async_trait]
impl<S: Storage, T: TableStore, C: ConfigProvider> Pipeline for CountriesPipeline<S, T, C> {
    async fn extract(&self) -> Result<Vec<CountryRecord>> {
        let endpoint = self.config.api_endpoint();
        tracing::debug!("Making API request to: {}", endpoint);

        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let items: Vec<Value> = response.json().await?;

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(data) => Ok(CountryRecord::new(data)),
                other => Err(EtlError::ResponseShapeError {
                    message: format!(
                        "element {} is {}, expected a country object",
                        index,
                        json_kind(&other)
                    ),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("📊 Extracted {} country records", records.len());
        Ok(records)
    }

    async fn transform(&self, records: Vec<CountryRecord>) -> Result<Dataset> {
        let delay = self.config.simulated_delay();
        tracing::info!(
            "🔧 Processing {} records (simulated delay {:?} per record)",
            records.len(),
            delay
        );

        let mut dataset = Dataset::with_capacity(records.len());

        for record in &records {
            let started = Instant::now();

            let fields = DisplayFields::from_record(record);

            // 模擬每筆資料的處理成本
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            dataset.push(fields.into_row(elapsed_ms));
        }

        tracing::info!("✅ Transform complete: {} rows", dataset.len());
        Ok(dataset)
    }

    async fn load(&self, dataset: &Dataset) -> Result<LoadSummary> {
        tracing::info!("💾 Saving {} rows", dataset.len());

        let table_rows = self
            .table_store
            .replace_table(COUNTRIES_TABLE, dataset.rows())?;
        tracing::debug!(
            "Table '{}' replaced in {}",
            COUNTRIES_TABLE,
            self.table_store.location()
        );

        let json_data = json_lines::render(dataset)?;
        tracing::debug!("Writing JSON lines ({} bytes) to storage", json_data.len());
        self.storage
            .write_file(self.config.json_file(), &json_data)
            .await?;

        Ok(LoadSummary {
            table_rows,
            database_path: self.table_store.location(),
            json_path: self.storage.display_path(self.config.json_file()),
        })
    }
}
