use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha1::{Digest, Sha1};

/// 缺少或格式錯誤的欄位一律以此值代替
pub const NOT_AVAILABLE: &str = "N/A";

/// API 回傳的單一國家資料，原樣保留 (key 順序依 API 回傳順序)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryRecord {
    pub data: Map<String, Value>,
}

impl CountryRecord {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn region(&self) -> &str {
        self.data
            .get("region")
            .and_then(|v| v.as_str())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// `name.common`；`name` 不是物件時視為缺少
    pub fn common_name(&self) -> &str {
        self.data
            .get("name")
            .and_then(|v| v.as_object())
            .and_then(|name| name.get("common"))
            .and_then(|v| v.as_str())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// `languages` 中的第一個語言名稱
    pub fn first_language(&self) -> &str {
        self.data
            .get("languages")
            .and_then(|v| v.as_object())
            .and_then(|languages| languages.values().next())
            .and_then(|v| v.as_str())
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// 內容指紋 (SHA-1，小寫十六進位)，僅用於顯示與去重，不具安全用途
pub fn fingerprint(text: &str) -> String {
    hex::encode(Sha1::digest(text.as_bytes()))
}

/// 將毫秒數格式化為 "12.34 ms"
pub fn render_millis(ms: f64) -> String {
    format!("{:.2} ms", ms)
}

/// 處理後的一列資料，欄位名稱沿用既有輸出格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRow {
    #[serde(rename = "Región")]
    pub region: String,
    #[serde(rename = "City Name")]
    pub city_name: String,
    #[serde(rename = "Language")]
    pub language_hash: String,
    #[serde(rename = "Time")]
    pub processing_time: String,
}

/// 計時結束前取出的顯示欄位
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFields {
    pub region: String,
    pub city_name: String,
    pub language_hash: String,
}

impl DisplayFields {
    pub fn from_record(record: &CountryRecord) -> Self {
        Self {
            region: record.region().to_string(),
            city_name: record.common_name().to_string(),
            language_hash: fingerprint(record.first_language()),
        }
    }

    pub fn into_row(self, elapsed_ms: f64) -> ProcessedRow {
        ProcessedRow {
            region: self.region,
            city_name: self.city_name,
            language_hash: self.language_hash,
            processing_time: render_millis(elapsed_ms),
        }
    }
}

impl ProcessedRow {

    /// 從已格式化的字串解析回毫秒數，統計一律以顯示值為準
    pub fn processing_time_ms(&self) -> crate::utils::error::Result<f64> {
        let numeric = self
            .processing_time
            .split_whitespace()
            .next()
            .unwrap_or_default();

        numeric
            .parse::<f64>()
            .map_err(|e| crate::utils::error::EtlError::TimingFormatError {
                value: self.processing_time.clone(),
                reason: e.to_string(),
            })
    }
}

/// 依 API 順序排列的處理結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<ProcessedRow>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, row: ProcessedRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ProcessedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<ProcessedRow>> for Dataset {
    fn from(rows: Vec<ProcessedRow>) -> Self {
        Self { rows }
    }
}

/// load 階段的輸出摘要
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    pub table_rows: usize,
    pub database_path: String,
    pub json_path: String,
}
