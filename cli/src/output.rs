//! Process output: log setup and line writers.
//!
//! Results meant for scripts (downloaded paths, uploaded URIs) go to stdout
//! one per line. Progress and diagnostics go through the `log` facade, which
//! `env_logger` writes to stderr.

use log::LevelFilter;
use std::fmt::Display;
use std::io::Write;

/// Map `-v`/`-q` to a default log level.
///
/// # Examples
///
/// ```
/// use log::LevelFilter;
/// use nexuscli_cli::output::level_filter;
///
/// assert_eq!(level_filter(0, false), LevelFilter::Info);
/// assert_eq!(level_filter(0, true), LevelFilter::Error);
/// assert_eq!(level_filter(2, false), LevelFilter::Trace);
/// ```
#[must_use]
pub const fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialise `env_logger` at the level implied by `-v`/`-q`.
///
/// `RUST_LOG`, when set, overrides the computed level.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let default = level_filter(verbosity, quiet).as_str().to_ascii_lowercase();
    let env = env_logger::Env::default().default_filter_or(default);
    if env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init()
        .is_err()
    {
        // A logger is already installed.
    }
}

/// Write one line, ignoring write failures.
pub fn write_line(out: &mut dyn Write, message: impl Display) {
    if writeln!(out, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}
