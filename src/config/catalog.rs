use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};

/// The source catalog: which pages and feeds to scrape, plus shared
/// request settings. Loaded from `tracker.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceCatalog {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_per_source")]
    pub max_per_source: usize,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            max_per_source: default_max_per_source(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_per_source() -> usize {
    50
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// An HTML page listing opportunities as article-like cards.
    #[default]
    Listing,
    /// An RSS/Atom feed.
    Feed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub kind: SourceKind,
    /// Category recorded on scraped entries ("grant", "fellowship", ...).
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    // Curated facts, used as a fallback entry when scraping the page
    // yields nothing. Must be verified against the source before adding.
    #[serde(default)]
    pub known_amount: Option<String>,
    #[serde(default)]
    pub known_deadline: Option<String>,
    #[serde(default)]
    pub known_description: Option<String>,
    #[serde(default)]
    pub known_eligibility: Option<String>,

    /// Exempt this source's entries from the relevance filter.
    #[serde(default)]
    pub bypass_filter: bool,
}

impl SourceCatalog {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrackerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TrackerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` occurrences with environment values, leaving
    /// unset variables untouched.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn enabled_sources(&self) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter().filter(|s| s.enabled)
    }
}

impl Validate for SourceCatalog {
    fn validate(&self) -> Result<()> {
        validate_positive_number(
            "settings.request_timeout_secs",
            self.settings.request_timeout_secs as usize,
            1,
        )?;
        validate_positive_number("settings.max_per_source", self.settings.max_per_source, 1)?;

        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(TrackerError::ConfigError {
                    message: "source with empty name".to_string(),
                });
            }
            validate_url(&format!("sources.{}.url", source.name), &source.url)?;
        }

        Ok(())
    }
}
