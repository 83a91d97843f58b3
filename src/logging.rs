//! Tracing setup
//!
//! Logs always go to stderr: in stdio mode stdout carries the MCP protocol.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when requested.
pub fn setup_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
