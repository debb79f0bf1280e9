//! Tracing initialization for the command-line tool.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `MFG_MC_LOG=manufacturing_mc=debug`.
pub const LOG_ENV: &str = "MFG_MC_LOG";

/// Install the global subscriber, writing to stderr.
///
/// Falls back to `manufacturing_mc=info` (or `=debug` when `verbose`) if
/// `MFG_MC_LOG` is unset or invalid. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose {
            "manufacturing_mc=debug"
        } else {
            "manufacturing_mc=info"
        };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
