//! Tracing setup

use crate::cli::commands::{Cli, LogFormat};
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter for the given verbosity; `--debug` counts as `-v`
pub fn default_filter(verbose: u8, debug: bool) -> &'static str {
    match verbose.max(u8::from(debug)) {
        0 => "sitepipe=info",
        1 => "sitepipe=debug",
        _ => "sitepipe=trace",
    }
}

/// Initialize tracing based on CLI flags. `RUST_LOG` overrides the level.
/// Logs go to stderr so stdout carries only the summaries.
pub fn init_tracing(cli: &Cli) {
    let filter = default_filter(cli.verbose, cli.debug);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
