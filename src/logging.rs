//! Log subscriber setup
//!
//! Logs go to stderr so stdout carries nothing but reports.

use lessmay::LogFormat;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an EnvFilter directive that overrides the level
const LOG_ENV_VAR: &str = "LESSMAY_LOG";

/// Install the global subscriber
pub fn init_logging(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.without_time().init(),
        LogFormat::Json => builder.json().init(),
    }
}
