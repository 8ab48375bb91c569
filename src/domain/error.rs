//! Domain error types.

/// Failures of the yield-curve pipeline. All are terminal for the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("upstream unavailable: {reason}")]
    UpstreamUnavailable { reason: String },

    #[error("malformed feed: {reason}")]
    MalformedFeed { reason: String },

    #[error("feed parse error: {reason}")]
    ParseError { reason: String },

    #[error("no yield data entries found")]
    NoEntriesFound,
}

impl FeedError {
    /// Short category name used in log fields.
    pub fn category(&self) -> &'static str {
        match self {
            FeedError::UpstreamUnavailable { .. } => "upstream_unavailable",
            FeedError::MalformedFeed { .. } => "malformed_feed",
            FeedError::ParseError { .. } => "parse_error",
            FeedError::NoEntriesFound => "no_entries_found",
        }
    }
}

/// Caller errors raised while validating a new order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("term_years and amount are required")]
    MissingFields,

    #[error("Invalid term. Must be one of: {valid}")]
    InvalidTerm { valid: String },

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Rate must be a number")]
    InvalidRate,
}

/// Top-level error type for treasury-desk.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DeskError> for std::process::ExitCode {
    fn from(err: &DeskError) -> Self {
        let code: u8 = match err {
            DeskError::Io(_) | DeskError::Feed(FeedError::UpstreamUnavailable { .. }) => 1,
            DeskError::ConfigParse { .. }
            | DeskError::ConfigMissing { .. }
            | DeskError::ConfigInvalid { .. } => 2,
            DeskError::Database { .. } | DeskError::DatabaseQuery { .. } => 3,
            DeskError::Order(_) => 4,
            DeskError::Feed(_) => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_error_messages_match_api_contract() {
        assert_eq!(
            OrderError::MissingFields.to_string(),
            "term_years and amount are required"
        );
        assert_eq!(
            OrderError::InvalidAmount.to_string(),
            "Amount must be a positive number"
        );
        let err = OrderError::InvalidTerm {
            valid: "1 Month, 2 Months".into(),
        };
        assert_eq!(err.to_string(), "Invalid term. Must be one of: 1 Month, 2 Months");
    }

    #[test]
    fn feed_error_wraps_transparently() {
        let err: DeskError = FeedError::NoEntriesFound.into();
        assert_eq!(err.to_string(), "no yield data entries found");
    }

    #[test]
    fn feed_categories_are_distinct() {
        let all = [
            FeedError::UpstreamUnavailable { reason: String::new() },
            FeedError::MalformedFeed { reason: String::new() },
            FeedError::ParseError { reason: String::new() },
            FeedError::NoEntriesFound,
        ];
        let mut names: Vec<_> = all.iter().map(FeedError::category).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    fn exit_status(err: &DeskError) -> String {
        // ExitCode has no PartialEq; compare through Debug.
        format!("{:?}", std::process::ExitCode::from(err))
    }

    fn expected(code: u8) -> String {
        format!("{:?}", std::process::ExitCode::from(code))
    }

    #[test]
    fn exit_codes_per_category() {
        let reason = || "x".to_string();
        let cases: Vec<(DeskError, u8)> = vec![
            (std::io::Error::other("bind failed").into(), 1),
            (FeedError::UpstreamUnavailable { reason: reason() }.into(), 1),
            (
                DeskError::ConfigParse {
                    file: "a.ini".into(),
                    reason: reason(),
                },
                2,
            ),
            (
                DeskError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                },
                2,
            ),
            (
                DeskError::ConfigInvalid {
                    section: "web".into(),
                    key: "listen".into(),
                    reason: reason(),
                },
                2,
            ),
            (DeskError::Database { reason: reason() }, 3),
            (DeskError::DatabaseQuery { reason: reason() }, 3),
            (OrderError::MissingFields.into(), 4),
            (OrderError::InvalidRate.into(), 4),
            (FeedError::MalformedFeed { reason: reason() }.into(), 5),
            (FeedError::ParseError { reason: reason() }.into(), 5),
            (FeedError::NoEntriesFound.into(), 5),
        ];
        for (err, code) in &cases {
            assert_eq!(exit_status(err), expected(*code), "{err}");
        }
    }
}
