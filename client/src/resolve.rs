//! Coordinate resolution against the Maven resolve endpoint.
//!
//! The endpoint maps a coordinate (possibly with version `LATEST`) to the
//! concrete file the repository holds, including its SHA-1.

use crate::coordinate::ArtifactCoordinate;
use crate::credentials::RepositoryCredentials;
use crate::error::ResolutionError;
use crate::query::{Endpoint, build_query};
use crate::transport::{HttpError, Transport};
use log::{debug, info};
use serde::Deserialize;

/// Metadata for a resolved artifact, as reported by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolvedArtifact {
    /// The Maven group id.
    pub group_id: String,
    /// The Maven artifact id.
    pub artifact_id: String,
    /// The concrete version, never `LATEST`.
    pub version: String,
    /// The file extension of the stored artifact.
    pub extension: String,
    /// Whether the version is a snapshot build.
    pub snapshot: bool,
    /// Snapshot build number, zero for releases.
    pub snapshot_build_number: u32,
    /// Snapshot timestamp in milliseconds, zero for releases.
    #[serde(rename = "snapshotTimeStamp")]
    pub snapshot_timestamp: u64,
    /// Hex-encoded SHA-1 of the stored file.
    #[serde(rename = "sha1")]
    pub checksum: String,
    /// Whether the repository holds the file locally.
    pub present_locally: bool,
    /// Path of the file inside the repository.
    #[serde(rename = "repositoryPath")]
    pub remote_repository_path: String,
}

impl ResolvedArtifact {
    /// The local file name: `{artifactId}-{version}.{extension}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nexuscli_client::resolve::ResolvedArtifact;
    ///
    /// let resolved = ResolvedArtifact {
    ///     artifact_id: "artifactA".to_owned(),
    ///     version: "1.2.3".to_owned(),
    ///     extension: "jar".to_owned(),
    ///     ..ResolvedArtifact::default()
    /// };
    /// assert_eq!(resolved.file_name(), "artifactA-1.2.3.jar");
    /// ```
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}-{}.{}", self.artifact_id, self.version, self.extension)
    }
}

/// The resolve endpoint wraps its payload in a `data` object.
#[derive(Debug, Deserialize)]
struct ResolutionEnvelope {
    data: ResolvedArtifact,
}

/// Parse a resolve endpoint response body.
///
/// # Errors
///
/// Returns the decoder's error if the body is not a resolution document.
pub fn parse_resolution(body: &str) -> Result<ResolvedArtifact, serde_json::Error> {
    serde_json::from_str::<ResolutionEnvelope>(body).map(|envelope| envelope.data)
}

/// Resolve `coordinate` to the file the repository would serve.
///
/// # Errors
///
/// Returns [`ResolutionError`] if the request fails, times out, returns a
/// status other than 200, or the body cannot be decoded.
pub fn resolve_artifact(
    transport: &dyn Transport,
    coordinate: &ArtifactCoordinate,
    credentials: &RepositoryCredentials,
) -> Result<ResolvedArtifact, ResolutionError> {
    let query = build_query(Endpoint::Resolve, coordinate, credentials);
    let url = query.url().to_owned();
    debug!("resolving {coordinate} via {url}");

    let reply = transport.get(&query).map_err(|e| match e {
        HttpError::Timeout => ResolutionError::Timeout { url: url.clone() },
        HttpError::Transport(reason) => ResolutionError::Request {
            url: url.clone(),
            reason,
        },
    })?;
    if reply.status != 200 {
        return Err(ResolutionError::Status {
            status: reply.status,
            url,
        });
    }
    info!("/GET {} {url}", reply.status);

    let body = reply.into_text().map_err(|e| ResolutionError::Request {
        url: url.clone(),
        reason: e.to_string(),
    })?;
    parse_resolution(&body).map_err(|e| ResolutionError::Decode {
        url,
        reason: e.to_string(),
    })
}
