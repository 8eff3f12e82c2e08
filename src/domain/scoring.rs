use std::cmp::Ordering;

use crate::domain::model::Opportunity;
use crate::utils::dates;

/// Interest keywords and their weights. Higher weight = more relevant to the
/// reader profile this tracker serves.
const INTEREST_KEYWORDS: &[(&str, i32)] = &[
    // Consciousness, meditation, psychedelics
    ("consciousness", 10),
    ("psychedelic", 10),
    ("psychedelics", 10),
    ("meditation", 10),
    ("contemplative", 8),
    ("mind", 5),
    ("neuroscience", 6),
    ("brain", 5),
    ("mental health", 6),
    ("psychology", 4),
    ("philosophy", 6),
    ("phenomenology", 8),
    // Political economy, anti-poverty
    ("poverty", 10),
    ("anti-poverty", 10),
    ("economic justice", 10),
    ("inequality", 8),
    ("basic income", 10),
    ("universal basic", 10),
    ("ubi", 10),
    ("welfare", 6),
    ("social policy", 8),
    ("policy", 4),
    ("political economy", 10),
    ("economics", 5),
    ("labor", 5),
    ("workers", 5),
    ("progressive", 6),
    // Science writing
    ("science", 5),
    ("scientific", 4),
    ("research", 3),
    // Narrative/longform
    ("narrative", 4),
    ("longform", 4),
    ("long-form", 4),
    ("literary", 4),
    ("nonfiction", 3),
    ("non-fiction", 3),
    ("essay", 3),
    ("feature", 2),
];

const US_INDICATORS: &[&str] = &[
    "north america",
    "united states",
    "u.s.",
    "us-based",
    "american",
];

const GLOBAL_INDICATORS: &[&str] = &[
    "eastern europe",
    "africa",
    "asia",
    "latin america",
    "middle east",
    "european union",
    "eu countries",
    "ukraine",
    "global south",
];

fn extra_str<'a>(opp: &'a Opportunity, key: &str) -> &'a str {
    opp.extra.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

/// Relevance score for one opportunity. Never negative.
pub fn relevance_score(opp: &Opportunity) -> i32 {
    let title = opp.title.to_lowercase();
    let description = opp.description.to_lowercase();
    let region = extra_str(opp, "region").to_lowercase();
    let organisation = extra_str(opp, "organisation").to_lowercase();

    let text = format!("{} {} {}", title, description, organisation);

    let mut score = 0;

    for (keyword, weight) in INTEREST_KEYWORDS {
        if text.contains(keyword) {
            score += weight;
            // Keyword in the title is a stronger signal.
            if title.contains(keyword) {
                score += weight / 2;
            }
        }
    }

    let mut is_us_based = false;
    for indicator in US_INDICATORS {
        if region.contains(indicator) || text.contains(indicator) {
            is_us_based = true;
            score += 15;
            break;
        }
    }

    // No stated region usually means US-based or open to US applicants.
    if region.trim().is_empty() {
        score += 5;
    }

    if !is_us_based {
        for indicator in GLOBAL_INDICATORS {
            if region.contains(indicator) {
                score -= 5;
                break;
            }
        }
    }

    // A concrete deadline makes the entry actionable.
    if opp.deadline.as_deref().is_some_and(|d| !d.is_empty()) {
        score += 3;
    }

    if opp.funding_size.is_some() {
        score += 2;
    }

    score.max(0)
}

pub fn add_relevance_scores(opportunities: &mut [Opportunity]) {
    for opp in opportunities.iter_mut() {
        opp.relevance_score = relevance_score(opp);
    }
}

/// Sort for publication: score descending, entries with deadlines ahead of
/// entries without, earlier deadlines first.
pub fn sort_opportunities(opportunities: &mut [Opportunity]) {
    opportunities.sort_by(|a, b| {
        b.relevance_score
            .cmp(&a.relevance_score)
            .then_with(|| {
                let da = a.deadline.as_deref().and_then(dates::parse_deadline);
                let db = b.deadline.as_deref().and_then(dates::parse_deadline);
                match (da, db) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            })
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opp(title: &str, description: &str) -> Opportunity {
        Opportunity {
            title: title.to_string(),
            description: description.to_string(),
            ..Opportunity::default()
        }
    }

    #[test]
    fn test_interest_keywords_raise_score() {
        let generic = opp("Writing Grant", "A grant for writers.");
        let targeted = opp(
            "Psychedelics Reporting Fellowship",
            "Longform science journalism on consciousness research.",
        );
        assert!(relevance_score(&targeted) > relevance_score(&generic));
    }

    #[test]
    fn test_title_hit_outweighs_body_hit() {
        let in_title = opp("Basic Income Fellowship", "");
        let in_body = opp("Fellowship", "Focused on basic income.");
        assert!(relevance_score(&in_title) > relevance_score(&in_body));
    }

    #[test]
    fn test_deadline_and_funding_bonuses() {
        let mut bare = opp("Grant", "");
        let mut full = opp("Grant", "");
        full.deadline = Some("2026-09-01".to_string());
        full.funding_size = Some("$10,000".to_string());
        bare.deadline = None;
        assert_eq!(relevance_score(&full) - relevance_score(&bare), 5);
    }

    #[test]
    fn test_global_region_penalty() {
        let mut global = opp("Grant", "");
        global.extra.insert(
            "region".to_string(),
            serde_json::Value::String("Global South".to_string()),
        );
        let domestic = opp("Grant", "");
        assert!(relevance_score(&global) < relevance_score(&domestic));
    }

    #[test]
    fn test_score_never_negative() {
        let mut o = opp("x", "");
        o.extra.insert(
            "region".to_string(),
            serde_json::Value::String("eastern europe".to_string()),
        );
        assert!(relevance_score(&o) >= 0);
    }

    #[test]
    fn test_sort_by_score_then_deadline() {
        let mut a = opp("low", "");
        a.relevance_score = 1;
        a.deadline = Some("2026-01-01".to_string());
        let mut b = opp("high-late", "");
        b.relevance_score = 9;
        b.deadline = Some("2026-06-01".to_string());
        let mut c = opp("high-soon", "");
        c.relevance_score = 9;
        c.deadline = Some("2026-02-01".to_string());
        let mut d = opp("high-no-deadline", "");
        d.relevance_score = 9;
        d.deadline = None;

        let mut all = vec![a, b, c, d];
        sort_opportunities(&mut all);

        let titles: Vec<&str> = all.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["high-soon", "high-late", "high-no-deadline", "low"]);
    }
}
