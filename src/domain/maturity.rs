//! Treasury maturities and their canonical names.
//!
//! One table drives three vocabularies: the upstream feed field code
//! (`BC_10YEAR`), the curve label emitted by the normalizer (`10_Year`) and
//! the order term shown to users (`10 Years`).

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Maturity {
    OneMonth,
    SixWeeks,
    TwoMonths,
    ThreeMonths,
    FourMonths,
    SixMonths,
    OneYear,
    TwoYears,
    ThreeYears,
    FiveYears,
    SevenYears,
    TenYears,
    TwentyYears,
    ThirtyYears,
}

struct MaturityRow {
    maturity: Maturity,
    feed_code: &'static str,
    label: &'static str,
    term: &'static str,
    orderable: bool,
}

const fn row(
    maturity: Maturity,
    feed_code: &'static str,
    label: &'static str,
    term: &'static str,
    orderable: bool,
) -> MaturityRow {
    MaturityRow {
        maturity,
        feed_code,
        label,
        term,
        orderable,
    }
}

const TABLE: &[MaturityRow] = &[
    row(Maturity::OneMonth, "BC_1MONTH", "1_Month", "1 Month", true),
    row(Maturity::SixWeeks, "BC_1_5MONTH", "1.5_Month", "1.5 Months", true),
    row(Maturity::TwoMonths, "BC_2MONTH", "2_Month", "2 Months", true),
    row(Maturity::ThreeMonths, "BC_3MONTH", "3_Month", "3 Months", true),
    row(Maturity::FourMonths, "BC_4MONTH", "4_Month", "4 Months", true),
    row(Maturity::SixMonths, "BC_6MONTH", "6_Month", "6 Months", true),
    row(Maturity::OneYear, "BC_1YEAR", "1_Year", "1 Year", true),
    row(Maturity::TwoYears, "BC_2YEAR", "2_Year", "2 Years", true),
    row(Maturity::ThreeYears, "BC_3YEAR", "3_Year", "3 Years", true),
    row(Maturity::FiveYears, "BC_5YEAR", "5_Year", "5 Years", true),
    row(Maturity::SevenYears, "BC_7YEAR", "7_Year", "7 Years", true),
    row(Maturity::TenYears, "BC_10YEAR", "10_Year", "10 Years", true),
    row(Maturity::TwentyYears, "BC_20YEAR", "20_Year", "20 Years", false),
    row(Maturity::ThirtyYears, "BC_30YEAR", "30_Year", "30 Years", true),
];

impl Maturity {
    fn row(self) -> &'static MaturityRow {
        // TABLE is indexed in declaration order.
        &TABLE[self as usize]
    }

    /// Feed field code without the `d:` namespace prefix.
    pub fn feed_code(self) -> &'static str {
        self.row().feed_code
    }

    /// Label used in the normalized yield series.
    pub fn label(self) -> &'static str {
        self.row().label
    }

    /// Human-facing order term, e.g. `"10 Years"`.
    pub fn term(self) -> &'static str {
        self.row().term
    }

    /// Whether orders may be placed at this maturity.
    pub fn is_orderable(self) -> bool {
        self.row().orderable
    }

    pub fn from_feed_code(code: &str) -> Option<Self> {
        TABLE.iter().find(|r| r.feed_code == code).map(|r| r.maturity)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        TABLE.iter().find(|r| r.label == label).map(|r| r.maturity)
    }

    /// Looks up an orderable term by its exact display name.
    pub fn from_term(term: &str) -> Option<Self> {
        TABLE
            .iter()
            .find(|r| r.orderable && r.term == term)
            .map(|r| r.maturity)
    }

    pub fn all() -> impl Iterator<Item = Maturity> {
        TABLE.iter().map(|r| r.maturity)
    }

    /// The fixed set of terms accepted by order creation, shortest first.
    pub fn orderable() -> impl Iterator<Item = Maturity> {
        Self::all().filter(|m| m.is_orderable())
    }

    /// `"1 Month, 1.5 Months, ..."` for error messages.
    pub fn orderable_terms_list() -> String {
        Self::orderable()
            .map(Maturity::term)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Maturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.term())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown term: {0}")]
pub struct UnknownTerm(pub String);

impl FromStr for Maturity {
    type Err = UnknownTerm;

    /// Accepts the term (`"20 Years"`) or curve label (`"20_Year"`) of any
    /// maturity on the curve, orderable or not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TABLE
            .iter()
            .find(|r| r.term == trimmed || r.label == trimmed)
            .map(|r| r.maturity)
            .ok_or_else(|| UnknownTerm(trimmed.to_string()))
    }
}
