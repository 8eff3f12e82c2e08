use anyhow::Context;
use clap::Parser;
use fellowship_tracker::utils::logger;
use fellowship_tracker::SiteBuilder;

#[derive(Debug, Parser)]
#[command(name = "site")]
#[command(about = "Builds the static site from the opportunity dataset")]
struct SiteArgs {
    /// Project root holding site/, data/ and the output directory
    #[arg(long, default_value = ".")]
    root: String,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

// The site build is pure filesystem work; no async runtime needed.
fn main() -> anyhow::Result<()> {
    let args = SiteArgs::parse();
    logger::init_cli_logger(args.verbose);

    let builder = SiteBuilder::new(&args.root);
    tracing::info!(
        "Building site with {} from {}/{}",
        builder.config().html_engine,
        args.root,
        builder.config().input_dir
    );

    let report = builder.build().context("site build failed")?;

    println!(
        "✅ Site built: {} pages, {} assets, {} opportunities -> {}",
        report.pages,
        report.assets,
        report.opportunities,
        report.output_dir.display()
    );

    Ok(())
}
