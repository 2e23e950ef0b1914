use clap::Parser;
use countries_etl::utils::logger;
use countries_etl::{run_local, CliConfig, EtlError, RunReport, TomlConfig};

async fn run(config: CliConfig) -> Result<RunReport, EtlError> {
    let Some(path) = config.config.clone() else {
        let monitor = config.monitor;
        return run_local(config, monitor).await;
    };

    tracing::info!("Loading configuration from {}", path.display());
    let toml_config = TomlConfig::from_file(&path)?;
    let monitor = config.monitor || toml_config.monitoring_enabled();
    run_local(toml_config, monitor).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    match run(config).await {
        Ok(report) => {
            tracing::info!(
                "✅ ETL process completed: {} countries processed",
                report.records_fetched
            );
        }
        Err(e) => {
            tracing::error!("❌ ETL process failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }
}
