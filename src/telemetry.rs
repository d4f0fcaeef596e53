use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::config::{self, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

/// Installs the global subscriber. Logs go to stderr so they never mix
/// with the feed rendered on stdout.
pub fn init(config: &config::Logging) -> Result<(), TracingInitError> {
    let registry = Registry::default()
        .with(console_layer(config))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)
        .change_context(TracingInitError)
        .attach_printable("already initialized tracing")?;

    Ok(())
}

/// Sets up logging captured by the test harness. Safe to call from
/// every test; only the first call installs a subscriber.
pub fn init_for_tests() {
    let filter = make_env_filter(&std::env::var("RUST_LOG").unwrap_or_default());
    let registry = Registry::default()
        .with(fmt::layer().with_test_writer().with_filter(filter))
        .with(ErrorLayer::default());

    _ = tracing::subscriber::set_global_default(registry);
}

fn console_layer(config: &config::Logging) -> Box<dyn Layer<Registry> + Send + Sync> {
    let filter = make_env_filter(&config.targets);
    let layer = fmt::layer().with_writer(std::io::stderr);

    match config.style {
        LoggingStyle::Compact => layer.compact().with_filter(filter).boxed(),
        LoggingStyle::Full => layer.with_filter(filter).boxed(),
        LoggingStyle::Pretty => layer.pretty().with_filter(filter).boxed(),
        LoggingStyle::Json => layer.json().with_filter(filter).boxed(),
    }
}

fn make_env_filter(targets: &str) -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(targets)
}
