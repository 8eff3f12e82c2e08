use chrono::{Duration, NaiveDateTime};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tera::{Context, Tera};

use crate::domain::model::Opportunity;
use crate::site::filters;
use crate::utils::dates::{self, CLOSING_SOON_WINDOW_DAYS};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;

const DIGEST_TEMPLATE: &str = include_str!("digest.html");

const SMTP_HOST: &str = "smtp.gmail.com";
const SMTP_PORT: u16 = 465;
const DEFAULT_SITE_URL: &str = "https://fellowship-tracker.example.org";

/// Window for the "new opportunities" digest section, matching the
/// biweekly send cadence.
const NEW_WINDOW_DAYS: i64 = 14;

/// Digest delivery settings, read from the environment. The digest mails
/// the tracker owner at their own address.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub gmail_address: String,
    pub gmail_app_password: String,
    pub site_url: String,
}

impl DigestConfig {
    pub fn from_env() -> Result<Self> {
        let address = std::env::var("GMAIL_ADDRESS").ok();
        let password = std::env::var("GMAIL_APP_PASSWORD").ok();

        Ok(Self {
            gmail_address: validate_required_field("GMAIL_ADDRESS", &address)?.clone(),
            gmail_app_password: validate_required_field("GMAIL_APP_PASSWORD", &password)?.clone(),
            site_url: std::env::var("SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.to_string()),
        })
    }
}

/// Opportunities with a parseable deadline inside the closing-soon window,
/// sorted soonest first.
pub fn closing_soon(opportunities: &[Opportunity], now: NaiveDateTime) -> Vec<Opportunity> {
    let mut hits: Vec<(NaiveDateTime, Opportunity)> = opportunities
        .iter()
        .filter_map(|opp| {
            let deadline = opp.deadline.as_deref().and_then(dates::parse_deadline)?;
            let in_window =
                deadline > now && deadline - now <= Duration::days(CLOSING_SOON_WINDOW_DAYS);
            in_window.then(|| (deadline, opp.clone()))
        })
        .collect();

    hits.sort_by_key(|(deadline, _)| *deadline);
    hits.into_iter().map(|(_, opp)| opp).collect()
}

/// Opportunities first scraped within the last digest window.
pub fn newly_added(opportunities: &[Opportunity], now: NaiveDateTime) -> Vec<Opportunity> {
    let cutoff = now - Duration::days(NEW_WINDOW_DAYS);

    opportunities
        .iter()
        .filter(|opp| {
            opp.scraped_at
                .as_deref()
                .and_then(dates::parse_timestamp)
                .is_some_and(|scraped| scraped >= cutoff)
        })
        .cloned()
        .collect()
}

/// Render the digest HTML. The template shares the site's filter registry,
/// so deadline rendering matches the published pages.
pub fn render_digest(
    closing: &[Opportunity],
    new: &[Opportunity],
    site_url: &str,
    today: &str,
) -> Result<String> {
    let mut tera = Tera::default();
    filters::register_filters(&mut tera);
    tera.add_raw_template("digest", DIGEST_TEMPLATE)?;

    let mut context = Context::new();
    context.insert("closing_soon", closing);
    context.insert("new_opportunities", new);
    context.insert("site_url", site_url);
    context.insert("today", today);

    Ok(tera.render("digest", &context)?)
}

pub fn digest_subject(now: NaiveDateTime) -> String {
    format!(
        "Fellowship & Grant Digest - {}",
        dates::format_month_day_year(now)
    )
}

/// Send the digest over SMTPS to the configured address.
pub async fn send_digest(config: &DigestConfig, subject: &str, html: String) -> Result<()> {
    let creds = Credentials::new(
        config.gmail_address.clone(),
        config.gmail_app_password.clone(),
    );

    let mailer: AsyncSmtpTransport<Tokio1Executor> =
        AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_HOST)?
            .port(SMTP_PORT)
            .credentials(creds)
            .build();

    let email = Message::builder()
        .from(config.gmail_address.parse()?)
        .to(config.gmail_address.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html)?;

    mailer.send(email).await?;
    Ok(())
}
