use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Window used by both the site filters and the email digest when deciding
/// whether a deadline counts as closing soon.
pub const CLOSING_SOON_WINDOW_DAYS: i64 = 14;

/// Date-only formats tried in order. Slashed dates are ambiguous; the
/// US-style form wins, matching the upstream sources this tool scrapes.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
];

/// Parse a deadline string into a naive datetime. Date-only inputs resolve
/// to midnight. Returns `None` for empty or unrecognized input.
pub fn parse_deadline(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    None
}

/// Parse a `scraped_at` style timestamp (RFC 3339 or bare ISO with optional
/// fractional seconds).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Render a datetime as "Mon D, YYYY" (short month name, unpadded day).
pub fn format_month_day_year(dt: NaiveDateTime) -> String {
    dt.format("%b %-d, %Y").to_string()
}

pub fn is_expired_at(deadline: &str, now: NaiveDateTime) -> bool {
    matches!(parse_deadline(deadline), Some(d) if d < now)
}

pub fn is_closing_soon_at(deadline: &str, now: NaiveDateTime) -> bool {
    match parse_deadline(deadline) {
        Some(d) => d > now && d - now <= Duration::days(CLOSING_SOON_WINDOW_DAYS),
        None => false,
    }
}

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}
