//! Normalized yield-curve series.

use serde::{Deserialize, Serialize};

use crate::domain::maturity::Maturity;

/// Label of the sentinel point carrying the snapshot date.
pub const DATE_LABEL: &str = "date";

/// One `{label, value}` pair. Values stay as the raw feed strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldPoint {
    pub label: String,
    pub value: String,
}

impl YieldPoint {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn is_date(&self) -> bool {
        self.label == DATE_LABEL
    }
}

/// Ordered points of one snapshot, in feed field order.
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YieldSeries {
    points: Vec<YieldPoint>,
}

impl YieldSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point unless its label is already present.
    /// Returns whether the point was added.
    pub fn push(&mut self, point: YieldPoint) -> bool {
        if self.points.iter().any(|p| p.label == point.label) {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn points(&self) -> &[YieldPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The snapshot date string, if the series carries one.
    pub fn date(&self) -> Option<&str> {
        self.points
            .iter()
            .find(|p| p.is_date())
            .map(|p| p.value.as_str())
    }

    /// Rate points only, skipping the date sentinel.
    pub fn rates(&self) -> impl Iterator<Item = &YieldPoint> {
        self.points.iter().filter(|p| !p.is_date())
    }

    /// Raw rate string for a maturity, matched on its canonical label.
    pub fn rate_for(&self, maturity: Maturity) -> Option<&str> {
        self.rates()
            .find(|p| p.label == maturity.label())
            .map(|p| p.value.as_str())
    }
}
