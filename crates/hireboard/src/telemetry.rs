//! Tracing setup for the applicant-tracking service.
//!
//! An explicit `RUST_LOG` wins outright. Otherwise the configured level
//! applies across the crate while the HTTP internals stay at `warn`, so
//! pipeline events are not drowned by per-request noise.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("cannot build a log filter from '{directives}'")]
    Filter {
        directives: String,
        #[source]
        source: ParseError,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn default_directives(config: &TelemetryConfig) -> String {
    format!("{},hyper=warn,tower=warn", config.log_level)
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = default_directives(config);
            EnvFilter::try_new(&directives)
                .map_err(|source| TelemetryError::Filter { directives, source })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}
