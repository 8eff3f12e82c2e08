use std::collections::HashMap;

use url::Url;

use crate::domain::model::Opportunity;

const TITLE_SIMILARITY_THRESHOLD: f64 = 0.9;

/// Normalize a URL for duplicate comparison: lowercase, drop the scheme,
/// strip a leading "www.", drop query and fragment, trim trailing slashes.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match Url::parse(&trimmed.to_lowercase()) {
        Ok(url) => {
            let host = url.host_str().unwrap_or("");
            let host = host.strip_prefix("www.").unwrap_or(host);
            let path = url.path().trim_end_matches('/');
            format!("{}{}", host, path)
        }
        Err(_) => trimmed.to_lowercase(),
    }
}

fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

fn bigrams(s: &str) -> HashMap<(char, char), usize> {
    let chars: Vec<char> = s.chars().collect();
    let mut map = HashMap::new();
    for pair in chars.windows(2) {
        *map.entry((pair[0], pair[1])).or_insert(0usize) += 1;
    }
    map
}

/// Similarity ratio between two titles in [0, 1], computed as a character
/// bigram Dice coefficient over punctuation-stripped lowercase text.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let na = normalize_title(a);
    let nb = normalize_title(b);
    if !na.is_empty() && na == nb {
        return 1.0;
    }

    let ba = bigrams(&na);
    let bb = bigrams(&nb);
    let total: usize = ba.values().sum::<usize>() + bb.values().sum::<usize>();
    if total == 0 {
        return 0.0;
    }

    let mut shared = 0usize;
    for (bigram, count_a) in &ba {
        if let Some(count_b) = bb.get(bigram) {
            shared += count_a.min(count_b);
        }
    }

    (2.0 * shared as f64) / total as f64
}

/// Two opportunities are duplicates when their normalized URLs match or
/// their titles are near-identical.
pub fn is_duplicate(a: &Opportunity, b: &Opportunity) -> bool {
    if !a.url.is_empty() && !b.url.is_empty() && normalize_url(&a.url) == normalize_url(&b.url) {
        return true;
    }

    title_similarity(&a.title, &b.title) >= TITLE_SIMILARITY_THRESHOLD
}

/// Drop entries that duplicate `existing` records or earlier entries of the
/// incoming batch itself. Order of survivors is preserved.
pub fn deduplicate(incoming: Vec<Opportunity>, existing: &[Opportunity]) -> Vec<Opportunity> {
    let mut unique: Vec<Opportunity> = Vec::new();

    for candidate in incoming {
        let seen = existing
            .iter()
            .chain(unique.iter())
            .any(|known| is_duplicate(&candidate, known));
        if !seen {
            unique.push(candidate);
        }
    }

    unique
}
