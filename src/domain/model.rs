use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A time-bound funding opportunity (fellowship, grant, award, prize).
///
/// The schema is deliberately permissive: scraped sources disagree about
/// which fields exist, and unknown fields from the data files are carried
/// through `extra` untouched rather than dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Opportunity {
    pub title: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub source_url: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub deadline: Option<String>,

    #[serde(default)]
    pub scraped_at: Option<String>,

    #[serde(default)]
    pub published_at: Option<String>,

    #[serde(default)]
    pub funding_size: Option<String>,

    #[serde(default)]
    pub eligibility: Option<String>,

    #[serde(default)]
    pub relevance_score: i32,

    #[serde(default)]
    pub archived_at: Option<String>,

    /// Curated catalog entries may opt out of the relevance filter.
    #[serde(default)]
    pub bypass_filter: bool,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Outcome of the transform phase: the active dataset to publish and the
/// archive it displaced entries into.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub active: Vec<Opportunity>,
    pub archive: Vec<Opportunity>,
    pub new_count: usize,
}
