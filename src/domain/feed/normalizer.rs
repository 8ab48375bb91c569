//! Maps feed field codes to the canonical label vocabulary.
//!
//! Labels come from the [`Maturity`] table, never from rewriting the feed
//! code, so a maturity the table does not know is dropped rather than
//! mislabeled.

use crate::domain::feed::parser::XmlElement;
use crate::domain::feed::selector::DATE_FIELD;
use crate::domain::maturity::Maturity;
use crate::domain::yield_curve::{DATE_LABEL, YieldPoint, YieldSeries};

pub const FIELD_PREFIX: &str = "d:";
pub const ID_FIELD: &str = "d:Id";
pub const DISPLAY_DUPLICATE_FIELD: &str = "d:BC_30YEARDISPLAY";

/// Normalizes the children of an entry's `m:properties` element.
pub fn normalize(properties: &XmlElement) -> YieldSeries {
    normalize_fields(
        properties
            .children
            .iter()
            .map(|field| (field.name.as_str(), field.text.as_str())),
    )
}

/// Normalizes `(key, value)` pairs in iteration order.
pub fn normalize_fields<'a, I>(fields: I) -> YieldSeries
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut series = YieldSeries::new();

    for (key, value) in fields {
        if !key.starts_with(FIELD_PREFIX) || key == ID_FIELD || key == DISPLAY_DUPLICATE_FIELD {
            continue;
        }

        let label = if key == DATE_FIELD {
            DATE_LABEL
        } else {
            let code = &key[FIELD_PREFIX.len()..];
            match Maturity::from_feed_code(code) {
                Some(maturity) => maturity.label(),
                None => {
                    tracing::warn!(field = key, "unrecognised feed field; not included in curve");
                    continue;
                }
            }
        };

        if !series.push(YieldPoint::new(label, value)) {
            tracing::debug!(field = key, label, "duplicate feed field ignored");
        }
    }

    series
}
