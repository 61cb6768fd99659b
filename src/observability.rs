use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// The filter comes from `VITALSTATS_LOG`, then `RUST_LOG`, then
/// `fallback` (usually the configured `log.level`). Stdout stays reserved
/// for command output.
pub fn init(fallback: &str) {
    let directive = std::env::var("VITALSTATS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| fallback.to_string());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    // a second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
    tracing::debug!(filter = %directive, "logging initialized");
}
