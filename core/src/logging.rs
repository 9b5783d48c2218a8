//! Logging init: human-readable progress on stderr.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,weblate_core=info,weblate=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter;
/// `verbose` raises this crate to `debug`.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,weblate_core=debug,weblate=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    // An already-installed subscriber stays in place.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
