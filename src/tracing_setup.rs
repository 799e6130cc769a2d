use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "PIPELINE_FORECAST_LOG";

/// Installs a stderr subscriber filtered by `PIPELINE_FORECAST_LOG`
/// (`warn` when unset) so stdout stays reserved for reports.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
