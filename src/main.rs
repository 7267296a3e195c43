use clap::Parser;
use product_scraper::utils::{logger, report, validation::Validate};
use product_scraper::{CliConfig, EtlEngine, LocalStorage, ProductPipeline, ScraperError};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = CliConfig::parse();

    // 解析設定 (命令列 > TOML > 預設值)
    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            return ExitCode::FAILURE;
        }
    };

    // 初始化日誌
    if let Err(e) = logger::init_cli_logger(cli.verbose, &settings.log_file) {
        tracing::warn!(
            "Cannot open log file '{}': {}; logging to console only",
            settings.log_file,
            e
        );
    }

    println!("{}", report::banner());

    match run(&settings).await {
        Ok(()) => {
            tracing::info!("🎉 Scraping completed successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ Scraping failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: &product_scraper::ScraperSettings) -> Result<(), ScraperError> {
    settings.validate()?;

    tracing::info!(
        "🚀 Starting scraper at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    tracing::info!("🎯 Target URL: {}", settings.url);
    tracing::debug!("Settings: {:?}", settings);

    let storage = LocalStorage::new(".");
    let pipeline = ProductPipeline::new(storage, settings.clone())?;
    let engine = EtlEngine::new(pipeline);

    let summary = engine.run().await?;

    if settings.show_stats {
        if let Some(stats) = &summary.statistics {
            println!("{}", report::render_statistics(stats));
        }
    }

    tracing::info!("📁 Output saved to: {}", summary.output_path);
    tracing::info!("⏱️ Total time: {:.2} seconds", summary.elapsed.as_secs_f64());
    Ok(())
}
