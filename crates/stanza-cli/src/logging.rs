//! Logging setup for the `stanza` binary.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,stanza=info";

/// Filter used by `--verbose` when `RUST_LOG` is unset.
pub const VERBOSE_FILTER: &str = "info,stanza=debug";

/// Build the event filter: `RUST_LOG` wins, otherwise the default for the
/// verbosity.
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            VERBOSE_FILTER.into()
        } else {
            DEFAULT_FILTER.into()
        }
    })
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable.
///
/// `log` records from the library crates are captured as well.
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
