use clap::Parser;
use fellowship_tracker::utils::{logger, validation::Validate};
use fellowship_tracker::{
    CliConfig, LocalStorage, ScrapePipeline, SourceCatalog, TrackerEngine,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting fellowship-tracker scrape run");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let catalog = match SourceCatalog::from_file(&config.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("❌ Failed to load source catalog: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = catalog.validate() {
        tracing::error!("❌ Source catalog validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    tracing::info!(
        "Catalog: {} sources ({} enabled)",
        catalog.sources.len(),
        catalog.enabled_sources().count()
    );

    let monitor_enabled = config.monitor;
    let storage = LocalStorage::new(config.data_dir.clone());
    let pipeline = ScrapePipeline::new(storage, catalog, config.data_dir.clone())?;

    let engine = TrackerEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Scrape run completed successfully!");
            println!("✅ Scrape run completed successfully!");
            println!("📁 Data saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Scrape run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
