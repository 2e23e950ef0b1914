use crate::config::{
    validate_provider, DEFAULT_API_ENDPOINT, DEFAULT_DATABASE_FILE, DEFAULT_JSON_FILE,
    DEFAULT_SIMULATED_DELAY_MS,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default = "default_delay_ms")]
    pub simulated_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_database_file")]
    pub database_file: String,
    #[serde(default = "default_json_file")]
    pub json_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_delay_ms() -> u64 {
    DEFAULT_SIMULATED_DELAY_MS
}

fn default_output_path() -> String {
    ".".to_string()
}

fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.to_string()
}

fn default_json_file() -> String {
    DEFAULT_JSON_FILE.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: default_delay_ms(),
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            database_file: default_database_file(),
            json_file: default_json_file(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| EtlError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COUNTRIES_OUTPUT})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            EtlError::ConfigError {
                message: format!("Invalid substitution pattern: {}", e),
            }
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn database_file(&self) -> &str {
        &self.load.database_file
    }

    fn json_file(&self) -> &str {
        &self.load.json_file
    }

    fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.transform.simulated_delay_ms)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
