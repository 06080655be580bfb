use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is not set. Keeps the warnings of the
/// log-and-continue output policy visible in a default run.
pub const DEFAULT_FILTER: &str = "info";

/// Filter from `RUST_LOG`, or [`DEFAULT_FILTER`] if it is unset or invalid
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the fmt subscriber, writing to stderr so stdout only carries the run summary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
