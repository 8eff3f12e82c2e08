use chrono::{DateTime, Utc};
use regex::Regex;

use crate::config::catalog::SourceConfig;
use crate::domain::model::Opportunity;

// Descriptions longer than this are clipped for the dataset.
const MAX_DESCRIPTION_CHARS: usize = 500;

/// Parse an RSS feed into opportunities. Items without a title are skipped.
///
/// Feeds are simple enough that regex extraction over `<item>` blocks covers
/// every source in the catalog; entries carry no deadline (newsletters
/// announce opportunities, they do not structure them).
pub fn parse_feed(xml: &str, source: &SourceConfig, max_items: usize) -> Vec<Opportunity> {
    let item_re = Regex::new(r"(?s)<item[\s>].*?</item>").unwrap();
    let title_re = Regex::new(r"(?s)<title[^>]*>(.*?)</title>").unwrap();
    let link_re = Regex::new(r"(?s)<link[^>]*>(.*?)</link>").unwrap();
    let description_re = Regex::new(r"(?s)<description[^>]*>(.*?)</description>").unwrap();
    let pub_date_re = Regex::new(r"(?s)<pubDate[^>]*>(.*?)</pubDate>").unwrap();

    let mut opportunities = Vec::new();

    for item in item_re.find_iter(xml) {
        if opportunities.len() >= max_items {
            break;
        }
        let block = item.as_str();

        let title = capture_text(&title_re, block);
        if title.is_empty() {
            continue;
        }

        let url = capture_text(&link_re, block);
        let description = clip_description(&strip_tags(&capture_text(&description_re, block)));
        let published_at = capture_text(&pub_date_re, block);
        let published_at = DateTime::parse_from_rfc2822(&published_at)
            .ok()
            .map(|dt| dt.to_rfc3339());

        opportunities.push(Opportunity {
            title,
            url,
            description,
            source: source.name.clone(),
            source_url: source.url.clone(),
            kind: source.category.clone(),
            deadline: None,
            scraped_at: Some(Utc::now().to_rfc3339()),
            published_at,
            bypass_filter: source.bypass_filter,
            ..Opportunity::default()
        });
    }

    opportunities
}

fn capture_text(re: &Regex, block: &str) -> String {
    let raw = re
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("");

    let raw = raw.trim();
    let raw = raw
        .strip_prefix("<![CDATA[")
        .and_then(|s| s.strip_suffix("]]>"))
        .unwrap_or(raw);

    unescape_entities(raw.trim())
}

fn strip_tags(text: &str) -> String {
    let tag_re = Regex::new(r"<[^>]*>").unwrap();
    let stripped = tag_re.replace_all(text, " ");
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

fn clip_description(text: &str) -> String {
    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        let mut clipped: String = text.chars().take(MAX_DESCRIPTION_CHARS - 3).collect();
        clipped.push_str("...");
        clipped
    } else {
        text.to_string()
    }
}
