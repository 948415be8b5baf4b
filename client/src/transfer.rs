//! Artifact transfer from the redirect endpoint to local storage.
//!
//! The response body is copied to disk through a fixed buffer, so memory use
//! does not depend on artifact size. Each chunk is hashed as it is written,
//! which gives the caller the transferred digest without a second pass.

use crate::coordinate::ArtifactCoordinate;
use crate::credentials::RepositoryCredentials;
use crate::error::TransferError;
use crate::query::{Endpoint, build_query};
use crate::resolve::ResolvedArtifact;
use crate::transport::{HttpError, Transport};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use log::{debug, info};
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// The outcome of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResult {
    /// Where the artifact was written.
    pub local_file_path: Utf8PathBuf,
    /// Number of body bytes written.
    pub bytes_written: u64,
    /// Lowercase hex SHA-1 of the bytes as they were written.
    pub local_checksum: String,
}

/// Writer adapter that hashes everything passing through it.
struct HashingWriter<W> {
    inner: W,
    hasher: Sha1,
}

impl<W: Write> HashingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha1::new(),
        }
    }

    fn finish(mut self) -> io::Result<String> {
        self.inner.flush()?;
        Ok(format!("{:x}", self.hasher.finalize()))
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.hasher.update(buf.get(..written).unwrap_or_default());
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// The path an artifact is written to inside `destination_dir`.
///
/// The file name comes from the resolve response and must be a single plain
/// path component, so the artifact always lands directly in
/// `destination_dir`.
///
/// # Errors
///
/// Returns [`TransferError::InvalidFileName`] if the name is absolute,
/// contains a separator, or is `.` or `..`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use nexuscli_client::resolve::ResolvedArtifact;
/// use nexuscli_client::transfer::destination_path;
///
/// let resolved = ResolvedArtifact {
///     artifact_id: "artifactA".to_owned(),
///     version: "1.2.3".to_owned(),
///     extension: "jar".to_owned(),
///     ..ResolvedArtifact::default()
/// };
/// let path = destination_path(Utf8Path::new("/srv/libs"), &resolved).unwrap();
/// assert_eq!(path, "/srv/libs/artifactA-1.2.3.jar");
/// ```
pub fn destination_path(
    destination_dir: &Utf8Path,
    resolved: &ResolvedArtifact,
) -> Result<Utf8PathBuf, TransferError> {
    let name = resolved.file_name();
    if !is_plain_file_name(&name) {
        return Err(TransferError::InvalidFileName { name });
    }
    Ok(destination_dir.join(name))
}

fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Utf8Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Utf8Component::Normal(_)), None)
    )
}

/// Download the artifact named by `coordinate` into `destination_dir`.
///
/// The request goes to the redirect endpoint with the same parameters the
/// resolve step used; `resolved` supplies the file name. An existing file
/// at the destination is truncated and overwritten.
///
/// # Errors
///
/// Returns [`TransferError`] if the resolved file name is unsafe, the
/// request fails or times out, the status is not 200, or the file cannot be
/// created or written. An unsafe name is rejected before any request is
/// sent. A partially written file is left in place.
pub fn download_artifact_file(
    transport: &dyn Transport,
    coordinate: &ArtifactCoordinate,
    credentials: &RepositoryCredentials,
    resolved: &ResolvedArtifact,
    destination_dir: &Utf8Path,
) -> Result<TransferResult, TransferError> {
    let path = destination_path(destination_dir, resolved)?;
    let query = build_query(Endpoint::Redirect, coordinate, credentials);
    let url = query.url().to_owned();

    info!(
        "Downloading file {}:{}:{}:{}",
        resolved.group_id, resolved.artifact_id, resolved.version, resolved.extension
    );
    let reply = transport.get(&query).map_err(|e| match e {
        HttpError::Timeout => TransferError::Timeout { url: url.clone() },
        HttpError::Transport(reason) => TransferError::Request {
            url: url.clone(),
            reason,
        },
    })?;
    if reply.status != 200 {
        return Err(TransferError::Status {
            status: reply.status,
            url,
        });
    }
    info!("/GET {} {url}", reply.status);

    let file = File::create(&path).map_err(|source| TransferError::Io {
        path: path.clone(),
        source,
    })?;
    let mut writer = HashingWriter::new(BufWriter::new(file));
    let mut body = reply.body;
    let bytes_written = copy_body(&mut body, &mut writer, &url, &path)?;
    let local_checksum = writer.finish().map_err(|source| TransferError::Io {
        path: path.clone(),
        source,
    })?;
    debug!("wrote {bytes_written} bytes to {path}");

    Ok(TransferResult {
        local_file_path: path,
        bytes_written,
        local_checksum,
    })
}

/// Copy `body` into `writer`, attributing read failures to the network and
/// write failures to the file. A read that times out is a
/// [`TransferError::Timeout`].
fn copy_body(
    body: &mut dyn io::Read,
    writer: &mut dyn Write,
    url: &str,
    path: &Utf8Path,
) -> Result<u64, TransferError> {
    let mut buffer = [0u8; 8192];
    let mut total: u64 = 0;
    loop {
        let bytes_read = match body.read(&mut buffer) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                return Err(TransferError::Timeout {
                    url: url.to_owned(),
                });
            }
            Err(e) => {
                return Err(TransferError::Request {
                    url: url.to_owned(),
                    reason: e.to_string(),
                });
            }
        };
        writer
            .write_all(buffer.get(..bytes_read).unwrap_or_default())
            .map_err(|source| TransferError::Io {
                path: path.to_owned(),
                source,
            })?;
        total += bytes_read as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpReply, MockTransport};
    use crate::verify::sha1_hex;
    use rstest::{fixture, rstest};
    use std::io::{Cursor, Read};

    const PAYLOAD: &[u8] = b"fake jar content";

    struct Fixture {
        _temp: tempfile::TempDir,
        dir: Utf8PathBuf,
        creds: RepositoryCredentials,
        coordinate: ArtifactCoordinate,
        resolved: ResolvedArtifact,
    }

    #[fixture]
    fn fixture() -> Fixture {
        let temp = tempfile::tempdir().expect("temp dir");
        let dir = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 path");
        Fixture {
            _temp: temp,
            dir,
            creds: RepositoryCredentials::new("http://nexus.test", "admin", "admin123"),
            coordinate: ArtifactCoordinate::new("com.example", "artifactA", "LATEST", "jar"),
            resolved: ResolvedArtifact {
                group_id: "com.example".to_owned(),
                artifact_id: "artifactA".to_owned(),
                version: "1.2.3".to_owned(),
                extension: "jar".to_owned(),
                checksum: sha1_hex(PAYLOAD),
                ..ResolvedArtifact::default()
            },
        }
    }

    fn serving(payload: &'static [u8]) -> MockTransport {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|query| {
                query.accept() == "application/xml" && query.url().contains("/maven/redirect?")
            })
            .returning(move |_| Ok(HttpReply::new(200, Cursor::new(payload))));
        transport
    }

    #[rstest]
    fn writes_body_to_deterministic_path(fixture: Fixture) {
        let transport = serving(PAYLOAD);
        let result = download_artifact_file(
            &transport,
            &fixture.coordinate,
            &fixture.creds,
            &fixture.resolved,
            &fixture.dir,
        )
        .expect("transfer succeeds");

        assert_eq!(result.local_file_path, fixture.dir.join("artifactA-1.2.3.jar"));
        assert_eq!(result.bytes_written, PAYLOAD.len() as u64);
        assert_eq!(result.local_checksum, sha1_hex(PAYLOAD));
        assert_eq!(std::fs::read(&result.local_file_path).expect("read"), PAYLOAD);
    }

    #[rstest]
    fn overwrites_existing_file(fixture: Fixture) {
        let target = fixture.dir.join("artifactA-1.2.3.jar");
        std::fs::write(&target, b"a much longer stale artifact body").expect("seed");

        let transport = serving(PAYLOAD);
        download_artifact_file(
            &transport,
            &fixture.coordinate,
            &fixture.creds,
            &fixture.resolved,
            &fixture.dir,
        )
        .expect("transfer succeeds");

        assert_eq!(std::fs::read(&target).expect("read"), PAYLOAD);
    }

    #[rstest]
    fn non_ok_status_creates_no_file(fixture: Fixture) {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_| Ok(HttpReply::new(404, Cursor::new(Vec::new()))));

        let err = download_artifact_file(
            &transport,
            &fixture.coordinate,
            &fixture.creds,
            &fixture.resolved,
            &fixture.dir,
        )
        .expect_err("must fail");

        assert!(matches!(err, TransferError::Status { status: 404, .. }));
        assert!(!fixture.dir.join("artifactA-1.2.3.jar").exists());
    }

    #[rstest]
    fn missing_destination_dir_is_io_error(fixture: Fixture) {
        let transport = serving(PAYLOAD);
        let missing = fixture.dir.join("does-not-exist");
        let err = download_artifact_file(
            &transport,
            &fixture.coordinate,
            &fixture.creds,
            &fixture.resolved,
            &missing,
        )
        .expect_err("must fail");
        assert!(matches!(err, TransferError::Io { .. }));
    }

    #[rstest]
    #[case::absolute_artifact_id("/etc/outside", "1", "jar")]
    #[case::parent_in_version("artifactA", "1/../../escape", "jar")]
    #[case::nested_extension("artifactA", "1", "jar/evil")]
    #[case::backslash("artifactA", "1\\..\\escape", "jar")]
    fn unsafe_file_name_is_rejected_before_request(
        fixture: Fixture,
        #[case] artifact_id: &str,
        #[case] version: &str,
        #[case] extension: &str,
    ) {
        let transport = MockTransport::new();
        let resolved = ResolvedArtifact {
            artifact_id: artifact_id.to_owned(),
            version: version.to_owned(),
            extension: extension.to_owned(),
            ..fixture.resolved.clone()
        };

        let err = download_artifact_file(
            &transport,
            &fixture.coordinate,
            &fixture.creds,
            &resolved,
            &fixture.dir,
        )
        .expect_err("must fail");

        assert!(
            matches!(&err, TransferError::InvalidFileName { name } if *name == resolved.file_name()),
            "{err:?}"
        );
        assert_eq!(std::fs::read_dir(&fixture.dir).expect("list").count(), 0);
    }

    #[rstest]
    #[case::dots_inside("artifactA", "1.0..2", "jar")]
    #[case::snapshot("artifactA", "2.0.0-20240101.120000-3", "jar")]
    fn dotted_versions_stay_in_destination(
        fixture: Fixture,
        #[case] artifact_id: &str,
        #[case] version: &str,
        #[case] extension: &str,
    ) {
        let resolved = ResolvedArtifact {
            artifact_id: artifact_id.to_owned(),
            version: version.to_owned(),
            extension: extension.to_owned(),
            ..fixture.resolved.clone()
        };
        let path = destination_path(&fixture.dir, &resolved).expect("plain name");
        assert_eq!(path.parent(), Some(fixture.dir.as_path()));
    }

    struct FailingReader(io::ErrorKind);

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "reset by peer"))
        }
    }

    #[rstest]
    fn body_read_failure_is_request_error(fixture: Fixture) {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_| {
                Ok(HttpReply::new(
                    200,
                    FailingReader(io::ErrorKind::ConnectionReset),
                ))
            });
        let err = download_artifact_file(
            &transport,
            &fixture.coordinate,
            &fixture.creds,
            &fixture.resolved,
            &fixture.dir,
        )
        .expect_err("must fail");
        assert!(matches!(err, TransferError::Request { reason, .. } if reason.contains("reset")));
    }

    #[rstest]
    fn body_read_timeout_is_timeout_error(fixture: Fixture) {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_| Ok(HttpReply::new(200, FailingReader(io::ErrorKind::TimedOut))));
        let err = download_artifact_file(
            &transport,
            &fixture.coordinate,
            &fixture.creds,
            &fixture.resolved,
            &fixture.dir,
        )
        .expect_err("must fail");
        assert!(matches!(err, TransferError::Timeout { url } if url.contains("/maven/redirect?")));
    }

    #[test]
    fn hashing_writer_digests_written_bytes() {
        let mut writer = HashingWriter::new(Vec::new());
        writer.write_all(b"fo").expect("write");
        writer.write_all(b"o").expect("write");
        assert_eq!(writer.finish().expect("finish"), sha1_hex(b"foo"));
    }
}
