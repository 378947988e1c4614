//! Logging setup based on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,glyphrun_text=debug,glyphrun_render=debug";

/// Install a global fmt subscriber.
///
/// Honors `RUST_LOG` when present and falls back to [`DEFAULT_FILTER`].
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Install a global fmt subscriber with an explicit filter directive string,
/// e.g. `"trace,glyphrun_render=info"`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_with_filter(directives: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .try_init()
        .is_ok()
}
