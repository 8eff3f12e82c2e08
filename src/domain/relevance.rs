use regex::Regex;

use crate::domain::model::Opportunity;

/// Keywords indicating an opportunity worth tracking.
const RELEVANT_KEYWORDS: &[&str] = &[
    "journalism",
    "journalist",
    "investigative",
    "reporting",
    "reporter",
    "nonfiction",
    "non-fiction",
    "essay",
    "essayist",
    "narrative",
    "literary",
    "longform",
    "long-form",
    "feature writing",
    "magazine writing",
    "news",
    "media",
    "documentary",
    "public interest",
    "accountability",
    "watchdog",
];

/// Keywords indicating an opportunity outside this tracker's beat.
const EXCLUDE_KEYWORDS: &[&str] = &[
    "poetry",
    "poet",
    "fiction writing",
    "short story",
    "novel",
    "screenwriting",
    "screenplay",
    "playwriting",
    "playwright",
    "mfa program",
    "mfa degree",
    "creative writing mfa",
    "children's book",
    "young adult fiction",
    "romance writing",
];

/// An excluded keyword is overridden when one of these also appears.
const JOURNALISM_CORE: &[&str] = &["journalism", "journalist", "investigative", "reporting"];

/// Opportunity categories tracked even without a keyword hit.
const VALID_TYPES: &[&str] = &["fellowship", "grant", "award", "prize", "fund", "scholarship"];

pub fn is_relevant(opp: &Opportunity) -> bool {
    if opp.bypass_filter {
        return true;
    }

    let text = format!("{} {} {}", opp.title, opp.description, opp.kind).to_lowercase();

    for keyword in EXCLUDE_KEYWORDS {
        if text.contains(keyword) {
            let has_journalism = JOURNALISM_CORE.iter().any(|k| text.contains(k));
            if !has_journalism {
                return false;
            }
        }
    }

    let has_relevant = RELEVANT_KEYWORDS.iter().any(|k| text.contains(k));
    let has_valid_type = VALID_TYPES.iter().any(|t| text.contains(t));

    has_relevant || has_valid_type
}

pub fn filter_relevant(opportunities: Vec<Opportunity>) -> Vec<Opportunity> {
    opportunities.into_iter().filter(is_relevant).collect()
}

/// Try to pull a deadline date out of free text ("Deadline: March 1, 2026",
/// "applications close June 15, 2026", ...). Returns the raw matched date
/// string, not a parsed value.
pub fn extract_deadline(text: &str) -> Option<String> {
    let patterns = [
        r"(?i)deadline[:\s]+(\w+\s+\d{1,2},?\s+\d{4})",
        r"(?i)due[:\s]+(\w+\s+\d{1,2},?\s+\d{4})",
        r"(?i)closes?[:\s]+(\w+\s+\d{1,2},?\s+\d{4})",
        r"(?i)(\w+\s+\d{1,2},?\s+\d{4})\s+deadline",
        r"(?i)by\s+(\w+\s+\d{1,2},?\s+\d{4})",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).unwrap();
        if let Some(caps) = re.captures(text) {
            if let Some(found) = caps.get(1) {
                return Some(found.as_str().trim().to_string());
            }
        }
    }

    None
}
