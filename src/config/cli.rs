use clap::Parser;

use crate::utils::validation::{validate_path, Validate};

#[derive(Debug, Clone, Parser)]
#[command(name = "fellowship-tracker")]
#[command(about = "Scrapes fellowship and grant opportunities into a JSON dataset")]
pub struct CliConfig {
    /// Directory holding opportunities.json and archive.json
    #[arg(long, default_value = "./data")]
    pub data_dir: String,

    /// Path to the source catalog
    #[arg(long, default_value = "./tracker.toml")]
    pub catalog: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU/memory usage per pipeline phase")]
    pub monitor: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_path("catalog", &self.catalog)?;
        Ok(())
    }
}
