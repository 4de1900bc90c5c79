//! Tracing subscriber initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with a human-readable fmt layer.
///
/// The subscriber respects the `RUST_LOG` environment variable.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
