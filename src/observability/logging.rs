//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global tracing subscriber
//! - Pick the output format from config
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Pretty format for development, compact for log shippers
//! - Log level configurable via config; `RUST_LOG` wins when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Default directives when `RUST_LOG` is unset.
fn default_directives(level: &str) -> String {
    format!("endpoint_handler={level},tower_http={level}")
}

/// Install the global subscriber. Calling it twice is a no-op after the
/// first success.
pub fn init_logging(config: &ObservabilityConfig) {
    let level = config.log_level.to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&level)));

    let (pretty, compact) = match config.log_format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer().pretty()), None),
        LogFormat::Compact => (None, Some(tracing_subscriber::fmt::layer().compact())),
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(compact)
        .try_init();

    if let Err(e) = result {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}
