use anyhow::Context;
use clap::Parser;
use cubic_weight_etl::config::LogFormat;
use cubic_weight_etl::core::report::render_message;
use cubic_weight_etl::core::ConfigProvider;
use cubic_weight_etl::utils::{logger, validation::Validate};
use cubic_weight_etl::{
    CliConfig, CubicWeightPipeline, EtlEngine, EtlError, LocalStorage, TomlConfig,
};

const EXIT_PARTIAL: i32 = 2;
const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting cubic-weight");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let exit_code = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            execute(config).await
        }
        None => execute(cli).await,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn execute<C: ConfigProvider + Validate>(config: C) -> i32 {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report_error(&e);
        return EXIT_FAILURE;
    }

    let storage = LocalStorage::new(config.output_path().unwrap_or(".").to_string());
    let pipeline = match CubicWeightPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            report_error(&e);
            return EXIT_FAILURE;
        }
    };

    match EtlEngine::new(pipeline).run().await {
        Ok(report) => {
            let message = render_message(&report);
            let exit_code = if report.is_complete() {
                println!("✅ {}", message);
                0
            } else {
                println!("⚠️ {}", message);
                EXIT_PARTIAL
            };
            if let Some(path) = &report.output_path {
                println!("📁 Output saved to: {}", path);
            }
            exit_code
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            report_error(&e);
            EXIT_FAILURE
        }
    }
}

fn report_error(e: &EtlError) {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}
