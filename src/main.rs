use clap::Parser;
use response_tables::utils::error::{ErrorSeverity, ReportError};
use response_tables::utils::{logger, validation::Validate};
use response_tables::{CliConfig, LocalStorage, ReportConfig, ReportEngine, ReportPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting response-tables CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let result = match config.config.clone() {
        Some(path) => match ReportConfig::from_file(&path) {
            Ok(file_config) => run(file_config).await,
            Err(e) => Err(e),
        },
        None => run(config).await,
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ Report completed successfully!");
            println!("✅ Report completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run<C>(config: C) -> Result<String, ReportError>
where
    C: response_tables::core::ConfigProvider + Validate,
{
    config.validate()?;

    // 路徑都相對於目前的工作目錄
    let storage = LocalStorage::new(".".to_string());
    let pipeline = ReportPipeline::new(storage, config);
    ReportEngine::new(pipeline).run().await
}
