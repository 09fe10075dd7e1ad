use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset: editor lifecycle events (load,
/// submit, reconciliation) and client responses at debug, everything else
/// at info, with reqwest/hyper internals kept quiet.
pub const EDITOR_FILTER: &str = "info,service::editor=debug,client=debug,reqwest=warn,hyper=warn";

fn filter_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Compact human-readable logs on stdout. Later calls are no-ops.
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(filter_or(EDITOR_FILTER))
        .with_target(true)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// JSON logs for admin front ends that ship events to a collector. Span
/// fields (`id`, editor `event`) are flattened onto each line.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(filter_or(EDITOR_FILTER))
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_writer(io::stdout)
        .try_init();
}

/// Subscriber for tests, captured by the test harness writer.
pub fn init_test_logging() {
    let _ = fmt()
        .with_env_filter(filter_or("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_filter_parses() {
        assert!(EnvFilter::try_new(EDITOR_FILTER).is_ok());
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_test_logging();
        init_test_logging();
        tracing::debug!(event = "logging_ready", "subscriber installed");
    }
}
