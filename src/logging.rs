use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `PIPEGATE_LOG=debug`
pub const LOG_ENV: &str = "PIPEGATE_LOG";

/// Install the stderr subscriber
///
/// Only warnings are shown unless `PIPEGATE_LOG` asks for more, so normal
/// runs leave the pipeline's own stderr untouched.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }
}
