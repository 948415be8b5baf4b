//! Error types for the `nexuscli` binary.
//!
//! Library errors are wrapped unchanged so their messages, which already name
//! the URL or path involved, reach the user verbatim.

use camino::Utf8PathBuf;
use nexuscli::ConfigError;
use nexuscli_client::coordinate::CoordinateParseError;
use nexuscli_client::{DownloadError, UploadError};
use thiserror::Error;

/// Errors that end a `nexuscli` run.
#[derive(Debug, Error)]
pub enum CliError {
    /// No host URL was supplied by any source.
    #[error("no repository host URL: pass --host-url, set NEXUS_HOST, or add host_url to {profile}")]
    MissingHostUrl {
        /// The profile path that was consulted.
        profile: String,
    },

    /// The profile could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The working directory could not be used as the default destination.
    #[error("cannot use the current directory as destination: {reason}")]
    CurrentDir {
        /// Description of the failure.
        reason: String,
    },

    /// The artifact list could not be read.
    #[error("cannot read artifact list {path}: {source}")]
    ListRead {
        /// The list file.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A line of the artifact list is not a valid coordinate.
    #[error("{path}:{line}: {source}")]
    ListEntry {
        /// The list file.
        path: Utf8PathBuf,
        /// One-based line number.
        line: usize,
        /// The parse failure.
        #[source]
        source: CoordinateParseError,
    },

    /// The upload target has no usable file name.
    #[error("cannot derive a remote name from {path}; pass --name")]
    MissingRemoteName {
        /// The local file.
        path: Utf8PathBuf,
    },

    /// A single download failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Some downloads in a batch failed.
    #[error("{failed} of {total} download(s) failed")]
    BatchFailed {
        /// Number of failed downloads.
        failed: usize,
        /// Number of attempted downloads.
        total: usize,
    },

    /// An upload failed.
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl CliError {
    /// The process exit status for this error.
    ///
    /// Configuration problems the user must fix before anything can run use
    /// status 2, like clap's usage errors; everything else uses 1.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingHostUrl { .. } | Self::Config(_) | Self::ListEntry { .. } => 2,
            _ => 1,
        }
    }
}

/// A specialized `Result` type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
