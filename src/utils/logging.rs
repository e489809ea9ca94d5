//! Logging setup

use super::config::LoggingSettings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides the configured level. Returns `false` if a
/// subscriber was already installed.
pub fn init_logging(settings: &LoggingSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let registry = tracing_subscriber::registry().with(filter);

    if settings.json_format {
        registry
            .with(fmt::layer().json().with_target(false))
            .try_init()
            .is_ok()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_thread_ids(false))
            .try_init()
            .is_ok()
    }
}
