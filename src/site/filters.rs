use std::collections::HashMap;

use tera::{Result, Tera, Value};

use crate::utils::dates;

/// Register the template filters used by site pages and the email digest.
///
/// Registered filters:
/// - `format_date`: "Mon D, YYYY" rendering with a "No deadline" fallback
/// - `closing_soon`: deadline within the next 14 days
/// - `expired`: deadline in the past
/// - `truncate`: clip to a character limit and append "..."
///
/// Deadlines arrive as free-text strings scraped from the wild, so none of
/// these filters ever fail a render: anything unparseable degrades to the
/// original value or `false`.
pub fn register_filters(tera: &mut Tera) {
    tera.register_filter("format_date", format_date);
    tera.register_filter("closing_soon", closing_soon);
    tera.register_filter("expired", expired);
    tera.register_filter("truncate", truncate);
}

const DEFAULT_TRUNCATE_LENGTH: usize = 200;

/// "2099-01-15" -> "Jan 15, 2099". Missing or empty input renders as
/// "No deadline"; anything unparseable is passed through unchanged.
fn format_date(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    match value {
        Value::Null => Ok(Value::String("No deadline".to_string())),
        Value::String(s) if s.trim().is_empty() => {
            Ok(Value::String("No deadline".to_string()))
        }
        Value::String(s) => match dates::parse_deadline(s) {
            Some(parsed) => Ok(Value::String(dates::format_month_day_year(parsed))),
            None => Ok(Value::String(s.clone())),
        },
        other => Ok(other.clone()),
    }
}

/// True iff the value parses as a date strictly in the future and at most
/// 14 days away.
fn closing_soon(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let soon = match value {
        Value::String(s) => dates::is_closing_soon_at(s, dates::now_local()),
        _ => false,
    };
    Ok(Value::Bool(soon))
}

/// True iff the value parses as a date strictly before now.
fn expired(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let past = match value {
        Value::String(s) => dates::is_expired_at(s, dates::now_local()),
        _ => false,
    };
    Ok(Value::Bool(past))
}

/// Clip a string to `length` characters (default 200), appending "..." when
/// anything was cut. Replaces Tera's builtin of the same name so site and
/// digest templates share one truncation behavior.
fn truncate(value: &Value, args: &HashMap<String, Value>) -> Result<Value> {
    let limit = args
        .get("length")
        .and_then(|v| v.as_u64())
        .unwrap_or(DEFAULT_TRUNCATE_LENGTH as u64) as usize;

    match value {
        Value::Null => Ok(Value::String(String::new())),
        Value::String(s) => {
            if s.chars().count() <= limit {
                Ok(Value::String(s.clone()))
            } else {
                let mut clipped: String = s.chars().take(limit).collect();
                clipped.push_str("...");
                Ok(Value::String(clipped))
            }
        }
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn no_args() -> HashMap<String, Value> {
        HashMap::new()
    }

    fn s(text: &str) -> Value {
        Value::String(text.to_string())
    }

    // ------------------------------------------------------------------
    // format_date
    // ------------------------------------------------------------------

    #[test]
    fn test_format_date_renders_short_month() {
        let result = format_date(&s("2099-01-01"), &no_args()).unwrap();
        assert_eq!(result, s("Jan 1, 2099"));
    }

    #[test]
    fn test_format_date_missing_input() {
        assert_eq!(format_date(&Value::Null, &no_args()).unwrap(), s("No deadline"));
        assert_eq!(format_date(&s(""), &no_args()).unwrap(), s("No deadline"));
        assert_eq!(format_date(&s("   "), &no_args()).unwrap(), s("No deadline"));
    }

    #[test]
    fn test_format_date_unparseable_passes_through() {
        assert_eq!(
            format_date(&s("not-a-date"), &no_args()).unwrap(),
            s("not-a-date")
        );
        assert_eq!(
            format_date(&s("rolling basis"), &no_args()).unwrap(),
            s("rolling basis")
        );
    }

    #[test]
    fn test_format_date_non_string_passes_through() {
        let value = Value::Number(42.into());
        assert_eq!(format_date(&value, &no_args()).unwrap(), value);
    }

    // ------------------------------------------------------------------
    // closing_soon / expired
    // ------------------------------------------------------------------

    fn days_from_now(days: i64) -> String {
        (Local::now() + Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn test_closing_soon_within_window() {
        let deadline = days_from_now(7);
        assert_eq!(
            closing_soon(&s(&deadline), &no_args()).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_closing_soon_far_future_and_past() {
        assert_eq!(
            closing_soon(&s("2099-01-01"), &no_args()).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            closing_soon(&s("2000-01-01"), &no_args()).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_closing_soon_invalid_input() {
        assert_eq!(closing_soon(&s("nope"), &no_args()).unwrap(), Value::Bool(false));
        assert_eq!(
            closing_soon(&Value::Null, &no_args()).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_expired_past_date() {
        assert_eq!(expired(&s("2000-01-01"), &no_args()).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_expired_future_and_invalid() {
        assert_eq!(expired(&s("2099-01-01"), &no_args()).unwrap(), Value::Bool(false));
        assert_eq!(expired(&s("garbage"), &no_args()).unwrap(), Value::Bool(false));
        assert_eq!(expired(&Value::Null, &no_args()).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_closing_soon_and_expired_disjoint() {
        for days in [-30, -1, 1, 7, 14, 15, 300] {
            let deadline = days_from_now(days);
            let soon = closing_soon(&s(&deadline), &no_args()).unwrap();
            let past = expired(&s(&deadline), &no_args()).unwrap();
            assert_ne!(
                (soon, past),
                (Value::Bool(true), Value::Bool(true)),
                "both predicates held at {} days",
                days
            );
        }
    }

    // ------------------------------------------------------------------
    // truncate
    // ------------------------------------------------------------------

    fn length_arg(length: usize) -> HashMap<String, Value> {
        let mut args = HashMap::new();
        args.insert("length".to_string(), Value::Number((length as u64).into()));
        args
    }

    #[test]
    fn test_truncate_missing_input_is_empty() {
        assert_eq!(truncate(&Value::Null, &no_args()).unwrap(), s(""));
        assert_eq!(truncate(&Value::Null, &length_arg(5)).unwrap(), s(""));
    }

    #[test]
    fn test_truncate_short_input_unchanged() {
        assert_eq!(truncate(&s("short"), &length_arg(10)).unwrap(), s("short"));
        assert_eq!(truncate(&s("exact"), &length_arg(5)).unwrap(), s("exact"));
        assert_eq!(truncate(&s(""), &length_arg(5)).unwrap(), s(""));
    }

    #[test]
    fn test_truncate_clips_and_appends_ellipsis() {
        assert_eq!(
            truncate(&s("abcdefgh"), &length_arg(3)).unwrap(),
            s("abc...")
        );
    }

    #[test]
    fn test_truncate_default_length_is_200() {
        let long: String = "x".repeat(201);
        let result = truncate(&s(&long), &no_args()).unwrap();
        let expected = format!("{}...", "x".repeat(200));
        assert_eq!(result, s(&expected));

        let at_limit: String = "x".repeat(200);
        assert_eq!(truncate(&s(&at_limit), &no_args()).unwrap(), s(&at_limit));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let result = truncate(&s("日本語のテキスト"), &length_arg(3)).unwrap();
        assert_eq!(result, s("日本語..."));
    }

    // ------------------------------------------------------------------
    // registration
    // ------------------------------------------------------------------

    #[test]
    fn test_filters_render_in_templates() {
        let mut tera = Tera::default();
        register_filters(&mut tera);

        tera.add_raw_template(
            "card",
            "{{ deadline | format_date }}|{% if deadline | expired %}gone{% else %}open{% endif %}|{{ blurb | truncate(length=4) }}",
        )
        .unwrap();

        let mut ctx = tera::Context::new();
        ctx.insert("deadline", "2099-02-03");
        ctx.insert("blurb", "a longer description");
        let rendered = tera.render("card", &ctx).unwrap();
        assert_eq!(rendered, "Feb 3, 2099|open|a lo...");

        let mut ctx = tera::Context::new();
        ctx.insert("deadline", &Value::Null);
        ctx.insert("blurb", "tiny");
        let rendered = tera.render("card", &ctx).unwrap();
        assert_eq!(rendered, "No deadline|open|tiny");
    }
}
