//! Structured logging on top of `tracing`.
//!
//! Logs go to stderr so composed topologies printed on stdout stay parseable.
//! Level precedence: `--verbose` > `BDI_LAUNCH_LOG` > `[logging] level` > `warn`.

use crate::error::{LaunchError, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV_VAR: &str = "BDI_LAUNCH_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive: a level (`info`) or per-module list (`bdi_launch::composer=debug`)
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

pub fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Pick the filter directive to use.
pub fn filter_directive(config: &LoggingConfig, verbose: bool) -> String {
    if verbose {
        return "debug".to_string();
    }
    match std::env::var(LOG_ENV_VAR) {
        Ok(directive) if !directive.trim().is_empty() => directive,
        _ => config.level.clone(),
    }
}

/// Install the global subscriber. A subscriber that is already installed is kept.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let directive = filter_directive(config, verbose);
    let filter = EnvFilter::try_new(&directive).map_err(|e| {
        LaunchError::InvalidConfig(format!("Invalid log filter '{}': {}", directive, e))
    })?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Logging already initialized");
    }
    Ok(())
}
