use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "saiel_budget_core=info";

/// Install a global `tracing` fmt subscriber. Safe to call more than once;
/// a subscriber installed by the host application is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        if fmt().with_env_filter(filter).try_init().is_ok() {
            tracing::info!("Saiel budget core tracing initialized.");
        }
    });
}
