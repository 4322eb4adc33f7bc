//! Tracing subscriber setup for binaries and tests embedding the store

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Filter used when `RUST_LOG` is unset: store crates at `info`, others at `warn`.
pub const DEFAULT_FILTER: &str = "warn,suitcase_store=info,suitcase_fs=info,suitcase_format=info";

/// Install the global subscriber with [`DEFAULT_FILTER`] as the fallback.
///
/// Store operations log at `debug` and translated failures at `warn`, so
/// `RUST_LOG=suitcase_store=debug` traces every filesystem call.
pub fn init() -> Result<(), BoxError> {
    init_with_default(DEFAULT_FILTER)
}

/// Install the global subscriber, falling back to `default_filter` when
/// `RUST_LOG` is unset. Fails if a subscriber is already installed.
pub fn init_with_default(default_filter: &str) -> Result<(), BoxError> {
    subscriber(default_filter)?.try_init()?;
    Ok(())
}

/// Build the subscriber without installing it.
pub fn subscriber(default_filter: &str) -> Result<impl Subscriber + Send + Sync + 'static, BoxError> {
    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    Ok(tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer))
}
