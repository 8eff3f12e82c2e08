use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use fellowship_tracker::digest::{self, DigestConfig};
use fellowship_tracker::site::data;
use fellowship_tracker::utils::{dates, logger};

#[derive(Debug, Parser)]
#[command(name = "digest")]
#[command(about = "Sends the biweekly email digest")]
struct DigestArgs {
    /// Directory holding opportunities.json
    #[arg(long, default_value = "./data")]
    data_dir: String,

    #[arg(long, help = "Render the digest without sending it")]
    dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = DigestArgs::parse();
    logger::init_cli_logger(args.verbose);

    let data_file = std::path::Path::new(&args.data_dir).join("opportunities.json");
    let opportunities =
        data::load_opportunities(&data_file).context("failed to load opportunities")?;
    tracing::info!("Loaded {} opportunities", opportunities.len());

    let now = dates::now_local();
    let closing = digest::closing_soon(&opportunities, now);
    let new = digest::newly_added(&opportunities, Utc::now().naive_utc());
    tracing::info!("Closing soon: {}, new: {}", closing.len(), new.len());

    let subject = digest::digest_subject(now);

    if args.dry_run {
        let html = digest::render_digest(
            &closing,
            &new,
            "https://fellowship-tracker.example.org",
            &dates::format_month_day_year(now),
        )?;
        println!("{}", html);
        tracing::info!("Dry run, not sending '{}'", subject);
        return Ok(());
    }

    let config = DigestConfig::from_env().context("digest credentials not configured")?;
    let html = digest::render_digest(
        &closing,
        &new,
        &config.site_url,
        &dates::format_month_day_year(now),
    )?;

    digest::send_digest(&config, &subject, html)
        .await
        .context("failed to send digest")?;

    println!("✅ Digest sent to {}", config.gmail_address);
    Ok(())
}
