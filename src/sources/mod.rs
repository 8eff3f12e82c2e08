pub mod feed;
pub mod listing;

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;

use crate::config::catalog::{Settings, SourceConfig, SourceKind};
use crate::domain::model::Opportunity;
use crate::utils::error::{Result, TrackerError};

pub fn build_client(settings: &Settings) -> Result<Client> {
    let mut builder =
        Client::builder().timeout(Duration::from_secs(settings.request_timeout_secs));
    if let Some(agent) = &settings.user_agent {
        builder = builder.user_agent(agent.clone());
    }
    Ok(builder.build()?)
}

/// Fetch and parse one catalog source. Returns the curated catalog entry
/// when the page yields nothing but the catalog carries verified facts.
pub async fn scrape_source(
    client: &Client,
    source: &SourceConfig,
    max_items: usize,
) -> Result<Vec<Opportunity>> {
    tracing::debug!("[{}] GET {}", source.name, source.url);
    let response = client.get(&source.url).send().await?;

    if !response.status().is_success() {
        return Err(TrackerError::ProcessingError {
            message: format!("{} returned status {}", source.name, response.status()),
        });
    }

    let body = response.text().await?;

    let mut items = match source.kind {
        SourceKind::Listing => listing::parse_listing(&body, source, max_items),
        SourceKind::Feed => feed::parse_feed(&body, source, max_items),
    };

    if items.is_empty() && source.known_description.is_some() {
        tracing::debug!("[{}] empty scrape, using catalog entry", source.name);
        items.push(catalog_entry(source));
    }

    Ok(items)
}

/// Build an entry straight from the catalog's curated fields.
pub fn catalog_entry(source: &SourceConfig) -> Opportunity {
    Opportunity {
        title: source.name.clone(),
        url: source.url.clone(),
        description: source.known_description.clone().unwrap_or_default(),
        source: source.name.clone(),
        source_url: source.url.clone(),
        kind: source.category.clone(),
        deadline: source.known_deadline.clone(),
        scraped_at: Some(Utc::now().to_rfc3339()),
        funding_size: source.known_amount.clone(),
        eligibility: source.known_eligibility.clone(),
        bypass_filter: source.bypass_filter,
        ..Opportunity::default()
    }
}
