//! Logging Infrastructure
//!
//! Structured logging setup: console output (pretty in development, JSON in
//! production) plus an optional daily-rotating application log file.

use crate::config::Config;
use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Initialize logging from runtime configuration
///
/// Production gets JSON console output; everything else gets pretty output.
pub fn init_from_config(config: &Config) -> anyhow::Result<()> {
    init_logger(&config.log_level, config.is_production())
}

/// Initialize the logging system with an optional rotating log file
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON output (production) vs pretty output (development)
/// * `log_dir` - Optional directory for daily-rotating `app-*.log` files
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_filter(EnvFilter::new(level));

        if let Some(dir) = log_dir {
            let app_log = rolling_appender(dir)?;
            let file_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_writer(std::sync::Mutex::new(app_log));
            subscriber.with(console_layer).with(file_layer).try_init()?;
        } else {
            subscriber.with(console_layer).try_init()?;
        }
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_filter(EnvFilter::new(level));

        if let Some(dir) = log_dir {
            let app_log = rolling_appender(dir)?;
            let file_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log));
            subscriber.with(console_layer).with(file_layer).try_init()?;
        } else {
            subscriber.with(console_layer).try_init()?;
        }
    }

    Ok(())
}

fn rolling_appender(dir: &str) -> anyhow::Result<RollingFileAppender> {
    let dir = Path::new(dir);
    fs::create_dir_all(dir)?;
    Ok(RollingFileAppender::new(Rotation::DAILY, dir, "app"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_from_config_sets_global_subscriber_once() {
        let mut config = Config::with_overrides(0.0, Vec::new());
        config.log_level = "debug".to_string();
        config.environment = "production".to_string();

        assert!(init_from_config(&config).is_ok());
        // The global subscriber is already set
        assert!(init_from_config(&config).is_err());
    }
}
