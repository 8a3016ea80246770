//! Tracing subscriber setup

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    subscriber(config, verbose)?
        .try_init()
        .with_context(|| "Failed to install tracing subscriber")
}

/// Pretty or JSON subscriber; both formats write to stderr
fn subscriber(config: &LoggingConfig, verbose: bool) -> Result<Box<dyn Subscriber + Send + Sync>> {
    let filter = build_filter(config, verbose)?;
    let registry = tracing_subscriber::registry().with(filter);

    Ok(match config.format.as_str() {
        "json" => Box::new(
            registry.with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            ),
        ),
        _ => Box::new(
            registry.with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            ),
        ),
    })
}

fn build_filter(config: &LoggingConfig, verbose: bool) -> Result<EnvFilter> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{level},hyper=warn,reqwest=warn")))
        .with_context(|| format!("Invalid log level '{level}'"))
}
