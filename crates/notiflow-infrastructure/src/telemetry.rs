//! Logging initialization.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info` for the notiflow
/// crates and `warn` elsewhere. Calling this more than once is a no-op, so
/// embedders and tests can both call it unconditionally.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,notiflow=info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    });
}
