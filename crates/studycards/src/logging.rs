//! Logging setup for studycards.
//!
//! The card manager never surfaces remote failures to a UI; it reports them
//! through `tracing` and returns them as `Error`s. What ends up where:
//!
//! - `error`: a remote call failed (`Unable to save card: ...`)
//! - `info`: a load, save, update or delete completed
//! - `debug`: skipped saves, the table endpoint, per-call record counts
//! - `trace`: raw response bodies from the remote table
//!
//! Output goes to stderr so `studycards list --format json` stays pipeable.
//! The API key never appears: request URLs are dropped from transport
//! errors and the store's `Debug` output is redacted.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much the binary logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Failed remote calls only.
    Quiet,
    /// Completed operations and failures.
    #[default]
    Normal,
    /// Adds skipped saves and request details.
    Verbose,
    /// Adds response bodies.
    Trace,
}

impl Verbosity {
    /// Map the `-q` flag and `-v` count to a verbosity. `-q` wins.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level shown.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive scoped to this crate, e.g. `studycards=debug`.
    #[must_use]
    pub fn directive(&self) -> String {
        format!(
            "{}={}",
            env!("CARGO_CRATE_NAME"),
            self.to_level_filter().as_str().to_lowercase()
        )
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` replaces the verbosity-derived filter when set, which allows
/// narrowing to one module, e.g. `RUST_LOG=studycards::store=trace`.
/// Calling this more than once is harmless.
///
/// # Examples
///
/// ```no_run
/// use studycards::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(false, 1));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(verbosity != Verbosity::Normal)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}

/// Initialize logging for tests: warnings and errors into the test writer.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
