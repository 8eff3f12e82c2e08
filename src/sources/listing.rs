use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::catalog::SourceConfig;
use crate::domain::model::Opportunity;
use crate::domain::relevance;

// Listing pages across the catalog use article cards under varying class
// names; the union of selectors keeps one parser working for all of them.
const CARD_SELECTOR: &str =
    "article, .post, .entry, .resource-card, .post-card, .listing-item, .grant-listing";
const TITLE_SELECTOR: &str = "h2, h3, .entry-title, .title";
const LINK_SELECTOR: &str = "a[href]";
const DESCRIPTION_SELECTOR: &str = "p, .excerpt, .description";

/// Parse an HTML listing page into opportunities. Cards without a title are
/// skipped; relative links resolve against the source URL.
pub fn parse_listing(html: &str, source: &SourceConfig, max_items: usize) -> Vec<Opportunity> {
    let document = Html::parse_document(html);
    let cards = Selector::parse(CARD_SELECTOR).unwrap();
    let titles = Selector::parse(TITLE_SELECTOR).unwrap();
    let links = Selector::parse(LINK_SELECTOR).unwrap();
    let descriptions = Selector::parse(DESCRIPTION_SELECTOR).unwrap();

    let mut opportunities = Vec::new();

    for card in document.select(&cards) {
        if opportunities.len() >= max_items {
            break;
        }

        let Some(title_element) = card.select(&titles).next() else {
            continue;
        };
        let title = element_text(title_element);
        if title.is_empty() {
            continue;
        }

        let href = card
            .select(&links)
            .next()
            .and_then(|a| a.value().attr("href"))
            .unwrap_or("");
        let url = resolve_href(&source.url, href);

        let description = card
            .select(&descriptions)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let deadline = relevance::extract_deadline(&description);

        opportunities.push(Opportunity {
            title,
            url,
            description,
            source: source.name.clone(),
            source_url: source.url.clone(),
            kind: source.category.clone(),
            deadline,
            scraped_at: Some(Utc::now().to_rfc3339()),
            bypass_filter: source.bypass_filter,
            ..Opportunity::default()
        });
    }

    opportunities
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_href(base: &str, href: &str) -> String {
    if href.is_empty() {
        return String::new();
    }
    match Url::parse(base).and_then(|b| b.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::catalog::SourceKind;

    fn source() -> SourceConfig {
        SourceConfig {
            name: "GIJN".to_string(),
            url: "https://gijn.org/resource/grants-fellowships/".to_string(),
            kind: SourceKind::Listing,
            category: "grant/fellowship".to_string(),
            enabled: true,
            known_amount: None,
            known_deadline: None,
            known_description: None,
            known_eligibility: None,
            bypass_filter: false,
        }
    }

    const PAGE: &str = r#"
        <html><body>
          <article>
            <h2>Global Reporting Fellowship</h2>
            <a href="/fellowships/global-reporting">Read more</a>
            <p>Funding for investigative journalism. Deadline: March 1, 2099.</p>
          </article>
          <article>
            <h3>Watchdog Grant</h3>
            <a href="https://example.org/watchdog">Apply</a>
            <p>Supports accountability reporting worldwide.</p>
          </article>
          <article>
            <a href="/no-title">Untitled card</a>
          </article>
        </body></html>
    "#;

    #[test]
    fn test_parse_listing_extracts_cards() {
        let items = parse_listing(PAGE, &source(), 50);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Global Reporting Fellowship");
        assert_eq!(
            items[0].url,
            "https://gijn.org/fellowships/global-reporting"
        );
        assert_eq!(items[0].source, "GIJN");
        assert_eq!(items[0].kind, "grant/fellowship");
        assert!(items[0].scraped_at.is_some());
        assert_eq!(items[1].url, "https://example.org/watchdog");
    }

    #[test]
    fn test_parse_listing_extracts_deadline_from_description() {
        let items = parse_listing(PAGE, &source(), 50);
        assert_eq!(items[0].deadline.as_deref(), Some("March 1, 2099"));
        assert_eq!(items[1].deadline, None);
    }

    #[test]
    fn test_parse_listing_respects_max_items() {
        let items = parse_listing(PAGE, &source(), 1);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_parse_listing_empty_page() {
        let items = parse_listing("<html><body><p>nothing here</p></body></html>", &source(), 50);
        assert!(items.is_empty());
    }
}
