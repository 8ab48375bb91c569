//! Typed, validated views over the INI configuration.
//!
//! ```ini
//! [web]
//! listen = 127.0.0.1:3000
//!
//! [sqlite]
//! path = orders.db
//! pool_size = 4
//!
//! [feed]
//! url_template = https://.../xml?data=daily_treasury_yield_curve&field_tdr_date_value_month={year}{month}
//! timeout_secs = 30
//!
//! [log]
//! level = info
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::error::DeskError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
pub const DEFAULT_POOL_SIZE: i64 = 4;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_FEED_URL_TEMPLATE: &str = "https://home.treasury.gov/resource-center/data-chart-center/interest-rates/pages/xml?data=daily_treasury_yield_curve&field_tdr_date_value_month={year}{month}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSettings {
    pub listen: SocketAddr,
}

impl WebSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DeskError> {
        let raw = config
            .get_string("web", "listen")
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen = raw.trim().parse().map_err(|_| DeskError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: format!("'{raw}' is not a socket address (expected host:port)"),
        })?;
        Ok(Self { listen })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub path: String,
    pub pool_size: u32,
}

impl StoreSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DeskError> {
        let path = config
            .get_string("sqlite", "path")
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| DeskError::ConfigMissing {
                section: "sqlite".into(),
                key: "path".into(),
            })?;

        let pool_size = config.get_int("sqlite", "pool_size", DEFAULT_POOL_SIZE);
        let pool_size = u32::try_from(pool_size)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| DeskError::ConfigInvalid {
                section: "sqlite".into(),
                key: "pool_size".into(),
                reason: "pool_size must be a positive integer".into(),
            })?;

        Ok(Self { path, pool_size })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    pub url_template: String,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_FEED_URL_TEMPLATE.to_string(),
            timeout: None,
        }
    }
}

impl FeedSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DeskError> {
        let url_template = config
            .get_string("feed", "url_template")
            .unwrap_or_else(|| DEFAULT_FEED_URL_TEMPLATE.to_string());
        if !url_template.contains("{year}") || !url_template.contains("{month}") {
            return Err(DeskError::ConfigInvalid {
                section: "feed".into(),
                key: "url_template".into(),
                reason: "url_template must contain {year} and {month}".into(),
            });
        }

        let timeout = match config.get_string("feed", "timeout_secs") {
            None => None,
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| DeskError::ConfigInvalid {
                        section: "feed".into(),
                        key: "timeout_secs".into(),
                        reason: "timeout_secs must be a positive integer".into(),
                    })?;
                Some(Duration::from_secs(secs))
            }
        };

        Ok(Self {
            url_template,
            timeout,
        })
    }
}

/// Log filter directive from `[log] level`, defaulting to `info`.
pub fn log_level(config: Option<&dyn ConfigPort>) -> String {
    config
        .and_then(|c| c.get_string("log", "level"))
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Checks every section `serve` needs before anything is started.
pub fn validate_server_config(config: &dyn ConfigPort) -> Result<(), DeskError> {
    WebSettings::from_config(config)?;
    StoreSettings::from_config(config)?;
    FeedSettings::from_config(config)?;
    Ok(())
}
