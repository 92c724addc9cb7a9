//! Runtime configuration
//!
//! All values can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | DELIVERY_SURCHARGE | 0.0 | Flat surcharge applied to delivery orders |
//! | NOTIFY_RECIPIENTS | (empty) | Comma-separated notification recipient ids |
//! | REQUIRE_CASH_COVERS_TOTAL | false | Reject cash amounts below the grand total |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_LEVEL | info | Default tracing filter |

use crate::money::round_money;

/// Storefront core configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Flat surcharge for delivery-mode orders
    pub delivery_surcharge: f64,
    /// Notification recipients (staff chat ids, webhook ids, ...)
    pub notify_recipients: Vec<String>,
    /// Whether a provided cash amount must cover the grand total
    pub require_cash_covers_total: bool,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Default log level
    pub log_level: String,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset variables fall back to defaults. A `.env` file is honored when
    /// present.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            delivery_surcharge: std::env::var("DELIVERY_SURCHARGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(round_money)
                .unwrap_or(0.0),
            notify_recipients: std::env::var("NOTIFY_RECIPIENTS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            require_cash_covers_total: std::env::var("REQUIRE_CASH_COVERS_TOTAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Override the values tests care about
    pub fn with_overrides(delivery_surcharge: f64, notify_recipients: Vec<String>) -> Self {
        let mut config = Self::from_env();
        config.delivery_surcharge = round_money(delivery_surcharge);
        config.notify_recipients = notify_recipients;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
