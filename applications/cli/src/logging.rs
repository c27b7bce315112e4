//! Tracing subscriber setup

use crate::config::Verbosity;
use crate::error::{CliError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter for `verbosity`, unless `RUST_LOG` is set
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
}

/// Install the global subscriber, writing to stderr
///
/// Debug output carries timestamps and targets; other levels print the
/// message alone.
pub fn init(verbosity: Verbosity) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(verbosity));

    let result = if verbosity == Verbosity::Debug {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .without_time()
                    .with_target(false)
                    .with_level(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| CliError::Logging(e.to_string()))
}
