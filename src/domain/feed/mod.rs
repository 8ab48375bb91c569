//! Yield-curve feed pipeline.
//!
//! - `validator`: well-formedness check on the raw body
//! - `parser`: body → element tree
//! - `selector`: most recent daily entry
//! - `normalizer`: entry fields → `YieldSeries`
//!
//! Fetching lives behind [`crate::ports::feed_port::FeedPort`]; everything in
//! here is pure and runs per request with no shared state.

pub mod normalizer;
pub mod parser;
pub mod selector;
pub mod validator;

use chrono::{Datelike, Local, NaiveDate};

use crate::domain::error::FeedError;
use crate::domain::yield_curve::YieldSeries;
use crate::ports::feed_port::FeedPort;

/// The calendar month a monthly feed is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedPeriod {
    pub year: i32,
    pub month: u32,
}

impl FeedPeriod {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Four-digit year, e.g. `"2024"`.
    pub fn year_token(&self) -> String {
        format!("{:04}", self.year)
    }

    /// Zero-padded month, e.g. `"01"`.
    pub fn month_token(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Substitutes `{year}` and `{month}` in a URL template.
    pub fn apply(&self, template: &str) -> String {
        template
            .replace("{year}", &self.year_token())
            .replace("{month}", &self.month_token())
    }
}

/// Validate → parse → select → normalize on one response body.
pub fn process_feed(body: &str) -> Result<YieldSeries, FeedError> {
    validator::validate(body)?;
    let document = parser::parse(body)?;
    let selected = selector::select_latest(&document)?;
    tracing::debug!(date = %selected.date, "selected latest feed entry");
    Ok(normalizer::normalize(selected.properties))
}

/// Fetches the current month's feed and reduces it to the latest curve.
pub async fn fetch_latest_curve(feed: &dyn FeedPort) -> Result<YieldSeries, FeedError> {
    let period = FeedPeriod::current();
    let body = feed.fetch_month(period).await?;
    let series = process_feed(&body)?;
    tracing::info!(
        year = period.year,
        month = period.month,
        points = series.len(),
        date = series.date().unwrap_or("-"),
        "yield curve loaded"
    );
    Ok(series)
}
