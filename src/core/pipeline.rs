use chrono::Utc;
use reqwest::Client;

use crate::config::catalog::SourceCatalog;
use crate::core::{Opportunity, Pipeline, Storage, TransformResult};
use crate::domain::{relevance, scoring};
use crate::sources;
use crate::utils::dates;
use crate::utils::dedup;
use crate::utils::error::{Result, TrackerError};

pub const OPPORTUNITIES_FILE: &str = "opportunities.json";
pub const ARCHIVE_FILE: &str = "archive.json";

/// The scrape pipeline: pull every catalog source, fold the results into
/// the existing dataset, retire expired entries, rank what remains.
pub struct ScrapePipeline<S: Storage> {
    storage: S,
    catalog: SourceCatalog,
    client: Client,
    data_dir: String,
}

impl<S: Storage> ScrapePipeline<S> {
    pub fn new(storage: S, catalog: SourceCatalog, data_dir: impl Into<String>) -> Result<Self> {
        let client = sources::build_client(&catalog.settings)?;
        Ok(Self {
            storage,
            catalog,
            client,
            data_dir: data_dir.into(),
        })
    }

    /// Read a JSON list through storage. Absent file means an empty list;
    /// malformed JSON is fatal (a corrupt data source must not silently
    /// produce an empty dataset).
    async fn read_data(&self, name: &str) -> Result<Vec<Opportunity>> {
        match self.storage.read_file(name).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(TrackerError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Split the merged set into still-active entries and newly expired
    /// ones, stamping the latter.
    fn archive_expired(
        merged: Vec<Opportunity>,
        mut archive: Vec<Opportunity>,
    ) -> (Vec<Opportunity>, Vec<Opportunity>) {
        let now = dates::now_local();
        let mut active = Vec::new();

        for mut opp in merged {
            let expired = opp
                .deadline
                .as_deref()
                .map(|d| dates::is_expired_at(d, now))
                .unwrap_or(false);

            if expired {
                opp.archived_at = Some(Utc::now().to_rfc3339());
                archive.push(opp);
            } else {
                active.push(opp);
            }
        }

        (active, archive)
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for ScrapePipeline<S> {
    async fn extract(&self) -> Result<Vec<Opportunity>> {
        let mut scraped = Vec::new();

        for source in self.catalog.enabled_sources() {
            tracing::info!("[{}] scraping {}", source.name, source.url);
            match sources::scrape_source(&self.client, source, self.catalog.settings.max_per_source)
                .await
            {
                Ok(items) => {
                    tracing::info!("[{}] found {} items", source.name, items.len());
                    scraped.extend(items);
                }
                // One broken source must not abort the whole run.
                Err(e) => tracing::warn!("[{}] scrape failed: {}", source.name, e),
            }
        }

        Ok(scraped)
    }

    async fn transform(&self, data: Vec<Opportunity>) -> Result<TransformResult> {
        let existing = self.read_data(OPPORTUNITIES_FILE).await?;
        let archive = self.read_data(ARCHIVE_FILE).await?;
        tracing::info!(
            "Loaded {} existing opportunities, {} archived",
            existing.len(),
            archive.len()
        );

        let scraped_count = data.len();
        let relevant = relevance::filter_relevant(data);
        tracing::info!(
            "Relevance filter kept {} of {} scraped entries",
            relevant.len(),
            scraped_count
        );

        let fresh = dedup::deduplicate(relevant, &existing);
        let new_count = fresh.len();
        tracing::info!("{} new unique opportunities", new_count);

        let mut merged = existing;
        merged.extend(fresh);

        let (mut active, archive) = Self::archive_expired(merged, archive);

        scoring::add_relevance_scores(&mut active);
        scoring::sort_opportunities(&mut active);

        Ok(TransformResult {
            active,
            archive,
            new_count,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let opportunities = serde_json::to_string_pretty(&result.active)?;
        self.storage
            .write_file(OPPORTUNITIES_FILE, opportunities.as_bytes())
            .await?;

        let archive = serde_json::to_string_pretty(&result.archive)?;
        self.storage
            .write_file(ARCHIVE_FILE, archive.as_bytes())
            .await?;

        Ok(format!("{}/{}", self.data_dir, OPPORTUNITIES_FILE))
    }
}
