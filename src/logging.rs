//! Logging initialization for the command-line tool

use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initialize tracing for the binary
///
/// `RUST_LOG` takes precedence over the verbosity in `config`. Logs go to
/// stderr so table output on stdout stays clean.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tabkit={}", config.log_level())));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(config.verbose >= 2)
        .with_line_number(config.verbose >= 3)
        .try_init();

    debug!("tabkit started with verbosity level: {}", config.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
