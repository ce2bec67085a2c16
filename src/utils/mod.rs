pub mod build_info;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "proration_core=info";

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` replaces the default `proration_core=info` filter when it is set
/// and valid. Events go to stderr so script output on stdout stays parseable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
