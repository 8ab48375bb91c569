//! Picks the most recent daily entry from a parsed feed.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::error::FeedError;
use crate::domain::feed::parser::XmlElement;

pub const ENTRY_ELEMENT: &str = "entry";
pub const PROPERTIES_PATH: [&str; 2] = ["content", "m:properties"];
pub const DATE_FIELD: &str = "d:NEW_DATE";

/// The entry chosen for normalization.
#[derive(Debug, Clone, Copy)]
pub struct SelectedEntry<'a> {
    pub date: NaiveDateTime,
    pub properties: &'a XmlElement,
}

/// Returns the entry whose date field is greatest. Ties keep the first one
/// encountered. Entries without a readable date are skipped.
pub fn select_latest(feed: &XmlElement) -> Result<SelectedEntry<'_>, FeedError> {
    let mut entries = feed.children_named(ENTRY_ELEMENT).peekable();
    if entries.peek().is_none() {
        return Err(FeedError::NoEntriesFound);
    }

    let mut latest: Option<SelectedEntry<'_>> = None;
    for (index, entry) in entries.enumerate() {
        let Some(properties) = entry.descend(&PROPERTIES_PATH) else {
            tracing::debug!(index, "feed entry has no properties; skipping");
            continue;
        };
        let raw_date = properties.child(DATE_FIELD).map(|d| d.text.as_str());
        let Some(date) = raw_date.and_then(parse_feed_date) else {
            tracing::debug!(index, date = ?raw_date, "feed entry has no readable date; skipping");
            continue;
        };

        if latest.is_none_or(|current| date > current.date) {
            latest = Some(SelectedEntry { date, properties });
        }
    }

    latest.ok_or(FeedError::NoEntriesFound)
}

/// Accepts `2024-01-08T00:00:00` (the feed's `Edm.DateTime`) or a bare
/// `2024-01-08`.
pub fn parse_feed_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
