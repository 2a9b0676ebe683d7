use tracing_subscriber::EnvFilter;

/// Log filter variable, e.g. `ILJEONG_LOG=debug iljeong 내일 3시 치과`.
pub const LOG_ENV: &str = "ILJEONG_LOG";

/// Installs the stderr subscriber. Stdout stays reserved for the draft.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
