pub mod config;
pub mod core;
pub mod digest;
pub mod domain;
pub mod site;
pub mod sources;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::config::catalog::SourceCatalog;
pub use crate::config::storage::LocalStorage;
pub use crate::core::{engine::TrackerEngine, pipeline::ScrapePipeline};
pub use crate::domain::model::Opportunity;
pub use crate::site::{SiteBuilder, SiteConfig};
pub use crate::utils::error::{Result, TrackerError};
