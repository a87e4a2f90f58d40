use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use fixtura_core::{FactoryError, Result};

/// Route factory events to the libtest output capture.
///
/// `filter` uses `EnvFilter` directive syntax, e.g. `fixtura_factory=debug`.
/// Fails if a global subscriber is already installed.
pub fn init_test_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter).map_err(|err| FactoryError::Logging(err.to_string()))?;

    let layer = tracing_subscriber::fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_test_writer();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| FactoryError::Logging(err.to_string()))?;

    Ok(())
}
