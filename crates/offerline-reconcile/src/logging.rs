//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::ReconcileConfig;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (wins over `filter`)
/// - `RUST_LOG=offerline_core=trace` - Show every valuation
/// - Otherwise `filter` is used, e.g. `"info,offerline=debug"`
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is kept.
pub fn init_tracing(filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

/// Initializes tracing from a loaded config.
pub fn init_from_config(config: &ReconcileConfig) -> bool {
    init_tracing(&config.logging.filter)
}
