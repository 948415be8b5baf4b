//! Upload of local files into a raw (site) repository.

use crate::credentials::RepositoryCredentials;
use crate::error::UploadError;
use crate::transport::{HttpError, Transport};
use camino::Utf8PathBuf;
use log::{debug, info};
use std::fs::File;

/// The single status a raw repository returns for a stored file.
pub const CREATED: u16 = 201;

/// A local file and where it should land inside the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    /// The file to read.
    pub local_file_path: Utf8PathBuf,
    /// The name to store it under.
    pub filename: String,
    /// The directory inside the repository, without leading or trailing `/`.
    pub directory_prefix: String,
}

impl UploadTarget {
    /// Create a target, trimming slashes from `directory_prefix`.
    #[must_use]
    pub fn new(
        local_file_path: impl Into<Utf8PathBuf>,
        filename: impl Into<String>,
        directory_prefix: impl Into<String>,
    ) -> Self {
        let directory_prefix = directory_prefix.into();
        Self {
            local_file_path: local_file_path.into(),
            filename: filename.into(),
            directory_prefix: directory_prefix.trim_matches('/').to_owned(),
        }
    }
}

/// The base URL of a hosted repository.
///
/// # Examples
///
/// ```
/// use nexuscli_client::upload::repository_url;
///
/// assert_eq!(
///     repository_url("http://localhost:8081", "site"),
///     "http://localhost:8081/repository/site"
/// );
/// ```
#[must_use]
pub fn repository_url(host_url: &str, repository_id: &str) -> String {
    format!("{host_url}/repository/{repository_id}")
}

/// The URI a target is uploaded to.
///
/// An empty directory prefix places the file at the repository root.
#[must_use]
pub fn upload_uri(host_url: &str, repository_id: &str, target: &UploadTarget) -> String {
    let base = repository_url(host_url, repository_id);
    if target.directory_prefix.is_empty() {
        format!("{base}/{}", target.filename)
    } else {
        format!("{base}/{}/{}", target.directory_prefix, target.filename)
    }
}

/// Upload `target` into `repository_id` and return its URI.
///
/// The file is streamed as the PUT body.
///
/// # Errors
///
/// Returns [`UploadError`] if the file cannot be opened, the request fails
/// or times out, or the response status is not 201. A rejected upload
/// carries the response body text, or an empty body if it cannot be read.
pub fn upload_file(
    transport: &dyn Transport,
    credentials: &RepositoryCredentials,
    repository_id: &str,
    target: &UploadTarget,
) -> Result<String, UploadError> {
    let file = File::open(&target.local_file_path).map_err(|source| UploadError::Open {
        path: target.local_file_path.clone(),
        source,
    })?;
    let uri = upload_uri(credentials.host_url(), repository_id, target);
    info!("Uploading {} to {uri}", target.local_file_path);

    let reply = transport
        .put(&uri, &credentials.basic_auth_header(), Box::new(file))
        .map_err(|e| match e {
            HttpError::Timeout => UploadError::Timeout { uri: uri.clone() },
            HttpError::Transport(reason) => UploadError::Request {
                uri: uri.clone(),
                reason,
            },
        })?;
    let status = reply.status;
    if status != CREATED {
        let body = reply.into_text().unwrap_or_else(|e| {
            debug!("could not read the body of the {status} reply from {uri}: {e}");
            String::new()
        });
        return Err(UploadError::Status { status, body, uri });
    }
    info!("/PUT {status} {uri}");
    Ok(uri)
}
