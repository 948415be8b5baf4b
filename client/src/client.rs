//! Resolve, download and verify workflow, plus the upload path.
//!
//! [`NexusClient`] owns the credentials and transport for one session and
//! runs each workflow step to completion before starting the next. The
//! client holds no mutable state, so independent workflows can run from
//! separate threads against separate clients.

use crate::coordinate::ArtifactCoordinate;
use crate::credentials::RepositoryCredentials;
use crate::error::{DownloadError, ResolutionError, UploadError};
use crate::resolve::{ResolvedArtifact, resolve_artifact};
use crate::transfer::download_artifact_file;
use crate::transport::{DEFAULT_TIMEOUT, HttpTransport, Transport};
use crate::upload::{UploadTarget, upload_file};
use crate::verify::{MismatchPolicy, VerifyError, verify_file};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::time::Duration;

/// Settings that shape each workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    /// Bound on each network call.
    pub timeout: Duration,
    /// Handling of downloads that fail verification.
    pub mismatch_policy: MismatchPolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            mismatch_policy: MismatchPolicy::default(),
        }
    }
}

/// A repository session.
///
/// # Examples
///
/// ```
/// use nexuscli_client::client::{ClientSettings, NexusClient};
/// use nexuscli_client::credentials::RepositoryCredentials;
///
/// let creds = RepositoryCredentials::new("http://localhost:8081/nexus", "admin", "admin123");
/// let client = NexusClient::new(creds, ClientSettings::default());
/// assert_eq!(client.credentials().username(), "admin");
/// ```
#[derive(Debug)]
pub struct NexusClient<T = HttpTransport> {
    credentials: RepositoryCredentials,
    settings: ClientSettings,
    transport: T,
}

impl NexusClient<HttpTransport> {
    /// Create a client backed by a `ureq` transport.
    #[must_use]
    pub fn new(credentials: RepositoryCredentials, settings: ClientSettings) -> Self {
        let transport = HttpTransport::new(settings.timeout);
        Self::with_transport(credentials, settings, transport)
    }
}

impl<T: Transport> NexusClient<T> {
    /// Create a client with an injected transport.
    pub fn with_transport(
        credentials: RepositoryCredentials,
        settings: ClientSettings,
        transport: T,
    ) -> Self {
        Self {
            credentials,
            settings,
            transport,
        }
    }

    /// The session credentials.
    pub fn credentials(&self) -> &RepositoryCredentials {
        &self.credentials
    }

    /// The session settings.
    pub fn settings(&self) -> ClientSettings {
        self.settings
    }

    /// Resolve `coordinate` without downloading it.
    ///
    /// # Errors
    ///
    /// See [`resolve_artifact`].
    pub fn resolve(
        &self,
        coordinate: &ArtifactCoordinate,
    ) -> Result<ResolvedArtifact, ResolutionError> {
        let coordinate = coordinate.with_derived_repository();
        resolve_artifact(&self.transport, &coordinate, &self.credentials)
    }

    /// Resolve, download and verify `coordinate` into `destination_dir`.
    ///
    /// Returns the path of the verified file.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] naming the failed step; later steps are not
    /// attempted.
    pub fn download(
        &self,
        coordinate: &ArtifactCoordinate,
        destination_dir: &Utf8Path,
    ) -> Result<Utf8PathBuf, DownloadError> {
        download_artifact_with(
            &self.transport,
            &self.credentials,
            coordinate,
            destination_dir,
            self.settings.mismatch_policy,
        )
    }

    /// Upload `target` into the raw repository `repository_id`.
    ///
    /// # Errors
    ///
    /// See [`upload_file`].
    pub fn upload(
        &self,
        repository_id: &str,
        target: &UploadTarget,
    ) -> Result<String, UploadError> {
        upload_file(&self.transport, &self.credentials, repository_id, target)
    }
}

/// Run the resolve, download and verify workflow with an injected transport.
///
/// The repository is derived once up front, so the resolve and redirect
/// requests always carry the same `r` value.
///
/// # Errors
///
/// Returns [`DownloadError::Resolution`] before any download is attempted,
/// [`DownloadError::Transfer`] if the bytes cannot be fetched or stored, and
/// [`DownloadError::IntegrityMismatch`] if the stored file fails
/// verification.
pub fn download_artifact_with(
    transport: &dyn Transport,
    credentials: &RepositoryCredentials,
    coordinate: &ArtifactCoordinate,
    destination_dir: &Utf8Path,
    policy: MismatchPolicy,
) -> Result<Utf8PathBuf, DownloadError> {
    let coordinate = coordinate.with_derived_repository();
    info!("Resolving the artifact to download.");
    let resolved = resolve_artifact(transport, &coordinate, credentials)?;

    let transfer =
        download_artifact_file(transport, &coordinate, credentials, &resolved, destination_dir)?;
    debug!(
        "transferred {} bytes with sha1 {}",
        transfer.bytes_written, transfer.local_checksum
    );

    info!("Got remote sha1: {}", resolved.checksum);
    verify_file(&transfer.local_file_path, &resolved.checksum, policy).map_err(
        |e| match e {
            VerifyError::Io(inner) => DownloadError::from(inner),
            VerifyError::Mismatch(inner) => DownloadError::from(inner),
        },
    )?;
    info!("Successfully downloaded the file {}", transfer.local_file_path);
    Ok(transfer.local_file_path)
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
