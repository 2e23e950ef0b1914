pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str =
    "https://restcountries.com/v3.1/all?fields=name,region,languages";
pub const DEFAULT_DATABASE_FILE: &str = "countries.db";
pub const DEFAULT_JSON_FILE: &str = "data.json";
pub const DEFAULT_SIMULATED_DELAY_MS: u64 = 100;
pub const MAX_SIMULATED_DELAY_MS: u64 = 60_000;

/// 各種設定來源共用的檢查
pub(crate) fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_url("api_endpoint", config.api_endpoint())?;
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_file_name("database_file", config.database_file())?;
    validation::validate_file_name("json_file", config.json_file())?;
    validation::validate_range(
        "simulated_delay_ms",
        config.simulated_delay().as_millis() as u64,
        0,
        MAX_SIMULATED_DELAY_MS,
    )?;
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, clap::Parser)]
#[command(name = "countries-etl")]
#[command(about = "Fetch country data, fingerprint languages and save to SQLite and JSON")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_DATABASE_FILE)]
    pub database_file: String,

    #[arg(long, default_value = DEFAULT_JSON_FILE)]
    pub json_file: String,

    #[arg(long, default_value_t = DEFAULT_SIMULATED_DELAY_MS, help = "Artificial per-record delay; 0 disables it")]
    pub simulated_delay_ms: u64,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<std::path::PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Log per-phase timing and memory usage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn database_file(&self) -> &str {
        &self.database_file
    }

    fn json_file(&self) -> &str {
        &self.json_file
    }

    fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
