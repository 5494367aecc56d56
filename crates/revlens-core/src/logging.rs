//! Tracing subscriber setup.
//!
//! Filter directives come from `REVLENS_LOG`, falling back to `revlens=info`.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "REVLENS_LOG";

const DEFAULT_FILTER: &str = "revlens=info,revlens_core=info,revlens_analysis=info";

static INIT: Once = Once::new();

/// Install the global fmt subscriber. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        // Another subscriber may already be installed by the host process.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    });
}
