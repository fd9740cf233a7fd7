use std::io;
use tracing_subscriber::{fmt, EnvFilter};

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(crate::DEFAULT_LOG_FILTER))
}

/// Initialize tracing subscriber with compact human-readable output.
/// - Respects `RUST_LOG` if set
/// - Falls back to `filter`, then to `DEFAULT_LOG_FILTER` if `filter` is invalid
/// - Safe to call more than once; later calls are ignored
pub fn init_logging_default(filter: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(filter))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// - Same filter resolution as `init_logging_default`
/// - Keeps targets so repository spans stay attributable
pub fn init_logging_json(filter: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(filter))
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Subscriber for tests: writes through the libtest capture and never fails.
pub fn init_test_logging() {
    let _ = fmt()
        .with_env_filter(env_filter("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_test_logging();
        init_logging_default("info");
        init_logging_json("info");
        tracing::info!(event = "after_init", "still logging");
    }
}
