use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// JSON-lines subscriber on stdout, filtered by `RUST_LOG`.
///
/// `default_directives` applies when `RUST_LOG` is unset or unparsable.
/// Only the first call installs a subscriber.
pub fn init_tracing(default_directives: &str) {
    let _ = tracing_subscriber::registry()
        .with(log_filter(default_directives))
        .with(fmt::layer().json().with_current_span(false).flatten_event(true))
        .try_init();
}

fn log_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}
