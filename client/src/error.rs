//! Error types for the resolve, transfer, verify and upload steps.
//!
//! Each step owns one error enum so that callers can tell which stage of the
//! workflow failed. Every variant names the URL or path involved so the CLI
//! can print it without further context.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures while resolving coordinates against the resolve endpoint.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The request could not be sent or the connection failed.
    #[error("resolve request to {url} failed: {reason}")]
    Request {
        /// The request URL, including query parameters.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("resolve request to {url} timed out")]
    Timeout {
        /// The request URL.
        url: String,
    },

    /// The server answered with a status other than 200.
    #[error("got status {status} while querying {url}")]
    Status {
        /// The HTTP status code returned.
        status: u16,
        /// The request URL.
        url: String,
    },

    /// The response body was not a valid resolution document.
    #[error("could not decode resolution from {url}: {reason}")]
    Decode {
        /// The request URL.
        url: String,
        /// The decoder's message.
        reason: String,
    },
}

/// Failures while fetching artifact bytes or writing them locally.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The request could not be sent or the body could not be read.
    #[error("download from {url} failed: {reason}")]
    Request {
        /// The request URL.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("download from {url} timed out")]
    Timeout {
        /// The request URL.
        url: String,
    },

    /// The server answered with a status other than 200.
    #[error("got status {status} while downloading {url}")]
    Status {
        /// The HTTP status code returned.
        status: u16,
        /// The request URL.
        url: String,
    },

    /// The resolved artifact name would not be a plain file inside the
    /// destination directory.
    #[error("refusing to store artifact under unsafe file name {name:?}")]
    InvalidFileName {
        /// The file name derived from the resolve response.
        name: String,
    },

    /// The destination file could not be created, written or re-read.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The local file involved.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// The downloaded file's SHA-1 does not match the value the server reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sha1 mismatch for {path}: remote={expected}, downloaded={actual}")]
pub struct IntegrityMismatchError {
    /// The file that failed verification.
    pub path: Utf8PathBuf,
    /// The checksum reported by the resolve endpoint.
    pub expected: String,
    /// The checksum computed over the local file.
    pub actual: String,
    /// Whether the file was removed under the active mismatch policy.
    pub removed: bool,
}

/// Failures of the full resolve, download and verify workflow.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Coordinate resolution failed; nothing was downloaded.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The artifact bytes could not be transferred.
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// The artifact was written but failed checksum verification.
    #[error(transparent)]
    IntegrityMismatch(#[from] IntegrityMismatchError),
}

/// Failures while uploading a file to a raw repository.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The local file could not be opened.
    #[error("cannot open {path}: {source}")]
    Open {
        /// The local file that failed to open.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The request could not be sent or the connection failed.
    #[error("upload to {uri} failed: {reason}")]
    Request {
        /// The target URI.
        uri: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("upload to {uri} timed out")]
    Timeout {
        /// The target URI.
        uri: String,
    },

    /// The server answered with a status other than 201.
    #[error("upload to {uri} returned {status}: {body}")]
    Status {
        /// The HTTP status code returned.
        status: u16,
        /// The response body text.
        body: String,
        /// The target URI.
        uri: String,
    },
}
