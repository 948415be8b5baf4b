//! SHA-1 verification of downloaded artifacts.
//!
//! The resolve endpoint reports a hex SHA-1 for every artifact. After a
//! transfer the file is re-read from disk and its digest compared with that
//! value by exact string equality; the workflow only reports success when
//! they agree.

use crate::error::{IntegrityMismatchError, TransferError};
use camino::Utf8Path;
use log::{debug, warn};
use sha1::{Digest, Sha1};
use std::fmt;
use std::fs;
use std::io::Read;

/// What to do with a downloaded file whose checksum does not match.
///
/// # Examples
///
/// ```
/// use nexuscli_client::verify::MismatchPolicy;
///
/// assert_eq!(MismatchPolicy::default(), MismatchPolicy::Keep);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MismatchPolicy {
    /// Leave the file in place for inspection.
    #[default]
    Keep,
    /// Delete the file before reporting the mismatch.
    Remove,
}

impl MismatchPolicy {
    /// Select [`Self::Remove`] when `delete` is true.
    #[must_use]
    pub const fn from_delete_flag(delete: bool) -> Self {
        if delete { Self::Remove } else { Self::Keep }
    }
}

impl fmt::Display for MismatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => write!(f, "keep mismatched downloads"),
            Self::Remove => write!(f, "remove mismatched downloads"),
        }
    }
}

/// Compute the lowercase hex SHA-1 of the file at `path`.
///
/// Reads the file in chunks so memory use does not grow with file size.
///
/// # Errors
///
/// Returns [`TransferError::Io`] if the file cannot be opened or read.
pub fn compute_sha1(path: &Utf8Path) -> Result<String, TransferError> {
    let io_error = |source| TransferError::Io {
        path: path.to_owned(),
        source,
    };
    let mut file = fs::File::open(path).map_err(io_error)?;
    let mut hasher = Sha1::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer).map_err(io_error)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Lowercase hex SHA-1 of an in-memory buffer.
#[must_use]
pub fn sha1_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha1::digest(bytes))
}

/// Verify the file at `path` against the remote checksum `expected`.
///
/// On mismatch the file is handled according to `policy` and an
/// [`IntegrityMismatchError`] naming both digests is returned.
///
/// # Errors
///
/// Returns [`TransferError::Io`] (wrapped) if the file cannot be re-read, or
/// [`IntegrityMismatchError`] if the digests differ.
pub fn verify_file(
    path: &Utf8Path,
    expected: &str,
    policy: MismatchPolicy,
) -> Result<(), VerifyError> {
    let actual = compute_sha1(path)?;
    debug!("remote sha1 {expected}, downloaded sha1 {actual}");
    if actual == expected {
        return Ok(());
    }

    let removed = match policy {
        MismatchPolicy::Keep => false,
        MismatchPolicy::Remove => match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) => {
                warn!("could not remove mismatched download {path}: {e}");
                false
            }
        },
    };
    Err(VerifyError::Mismatch(IntegrityMismatchError {
        path: path.to_owned(),
        expected: expected.to_owned(),
        actual,
        removed,
    }))
}

/// Failure modes of [`verify_file`].
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The file could not be re-read.
    #[error(transparent)]
    Io(#[from] TransferError),

    /// The digests differ.
    #[error(transparent)]
    Mismatch(#[from] IntegrityMismatchError),
}
