//! Unit tests for the download workflow with a mocked transport.

use super::*;
use crate::error::IntegrityMismatchError;
use crate::query::Endpoint;
use crate::transport::{HttpError, HttpReply, MockTransport};
use crate::verify::sha1_hex;
use rstest::{fixture, rstest};
use std::io::Cursor;

const PAYLOAD: &[u8] = b"fake jar content";

struct Fixture {
    _temp: tempfile::TempDir,
    dir: Utf8PathBuf,
    creds: RepositoryCredentials,
}

#[fixture]
fn fixture() -> Fixture {
    let temp = tempfile::tempdir().expect("temp dir");
    let dir = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 path");
    Fixture {
        _temp: temp,
        dir,
        creds: RepositoryCredentials::new("http://nexus.test", "admin", "admin123"),
    }
}

fn resolution(version: &str, sha1: &str) -> Vec<u8> {
    format!(
        r#"{{"data":{{"groupId":"com.example","artifactId":"artifactA","version":"{version}","extension":"jar","sha1":"{sha1}"}}}}"#
    )
    .into_bytes()
}

/// A transport that answers the resolve endpoint with `sha1` and the
/// redirect endpoint with `PAYLOAD`.
fn repository(sha1: String, expected_repo: &'static str) -> MockTransport {
    let mut transport = MockTransport::new();
    let marker = format!("r={expected_repo}&");
    let resolve_marker = marker.clone();
    transport
        .expect_get()
        .withf(move |query| {
            query.url().contains(Endpoint::Resolve.path()) && query.url().contains(&resolve_marker)
        })
        .times(1)
        .returning(move |_| Ok(HttpReply::new(200, Cursor::new(resolution("1.2.3", &sha1)))));
    transport
        .expect_get()
        .withf(move |query| {
            query.url().contains(Endpoint::Redirect.path()) && query.url().contains(&marker)
        })
        .times(1)
        .returning(|_| Ok(HttpReply::new(200, Cursor::new(PAYLOAD))));
    transport
}

#[rstest]
fn latest_release_downloads_and_verifies(fixture: Fixture) {
    let transport = repository(sha1_hex(PAYLOAD), "releases");
    let coordinate = ArtifactCoordinate::new("com.example", "artifactA", "LATEST", "jar");

    let path = download_artifact_with(
        &transport,
        &fixture.creds,
        &coordinate,
        &fixture.dir,
        MismatchPolicy::Keep,
    )
    .expect("download succeeds");

    assert_eq!(path, fixture.dir.join("artifactA-1.2.3.jar"));
    assert_eq!(std::fs::read(&path).expect("read"), PAYLOAD);
}

#[rstest]
fn snapshot_version_queries_snapshots(fixture: Fixture) {
    let transport = repository(sha1_hex(PAYLOAD), "snapshots");
    let coordinate = ArtifactCoordinate::new("com.example", "artifactA", "2.0.0-SNAPSHOT", "jar");
    download_artifact_with(
        &transport,
        &fixture.creds,
        &coordinate,
        &fixture.dir,
        MismatchPolicy::Keep,
    )
    .expect("download succeeds");
}

#[rstest]
#[case::keep(MismatchPolicy::Keep, true)]
#[case::remove(MismatchPolicy::Remove, false)]
fn mismatch_reports_both_digests(
    fixture: Fixture,
    #[case] policy: MismatchPolicy,
    #[case] file_survives: bool,
) {
    let remote = "a".repeat(40);
    let transport = repository(remote.clone(), "releases");
    let coordinate = ArtifactCoordinate::new("com.example", "artifactA", "LATEST", "jar");

    let err = download_artifact_with(&transport, &fixture.creds, &coordinate, &fixture.dir, policy)
        .expect_err("must fail");

    let DownloadError::IntegrityMismatch(mismatch) = err else {
        panic!("expected IntegrityMismatch, got {err:?}");
    };
    assert_eq!(mismatch.expected, remote);
    assert_eq!(mismatch.actual, sha1_hex(PAYLOAD));
    assert_eq!(mismatch.removed, !file_survives);
    assert_eq!(fixture.dir.join("artifactA-1.2.3.jar").exists(), file_survives);
}

#[rstest]
fn resolution_failure_skips_transfer(fixture: Fixture) {
    let mut transport = MockTransport::new();
    transport
        .expect_get()
        .withf(|query| query.url().contains(Endpoint::Resolve.path()))
        .times(1)
        .returning(|_| Ok(HttpReply::new(404, Cursor::new(Vec::new()))));
    let coordinate = ArtifactCoordinate::new("com.example", "missing", "LATEST", "jar");

    let err = download_artifact_with(
        &transport,
        &fixture.creds,
        &coordinate,
        &fixture.dir,
        MismatchPolicy::Keep,
    )
    .expect_err("must fail");

    assert!(matches!(
        err,
        DownloadError::Resolution(ResolutionError::Status { status: 404, .. })
    ));
    assert_eq!(std::fs::read_dir(&fixture.dir).expect("list").count(), 0);
}

#[rstest]
fn transfer_timeout_is_transfer_error(fixture: Fixture) {
    let sha1 = sha1_hex(PAYLOAD);
    let mut transport = MockTransport::new();
    transport
        .expect_get()
        .withf(|query| query.url().contains(Endpoint::Resolve.path()))
        .returning(move |_| Ok(HttpReply::new(200, Cursor::new(resolution("1.2.3", &sha1)))));
    transport
        .expect_get()
        .withf(|query| query.url().contains(Endpoint::Redirect.path()))
        .returning(|_| Err(HttpError::Timeout));
    let coordinate = ArtifactCoordinate::new("com.example", "artifactA", "LATEST", "jar");

    let err = download_artifact_with(
        &transport,
        &fixture.creds,
        &coordinate,
        &fixture.dir,
        MismatchPolicy::Keep,
    )
    .expect_err("must fail");
    assert!(matches!(
        err,
        DownloadError::Transfer(crate::error::TransferError::Timeout { .. })
    ));
}

#[rstest]
fn client_download_uses_configured_policy(fixture: Fixture) {
    let transport = repository("b".repeat(40), "releases");
    let settings = ClientSettings {
        mismatch_policy: MismatchPolicy::Remove,
        ..ClientSettings::default()
    };
    let client = NexusClient::with_transport(fixture.creds.clone(), settings, transport);
    let coordinate = ArtifactCoordinate::new("com.example", "artifactA", "LATEST", "jar");

    let err = client
        .download(&coordinate, &fixture.dir)
        .expect_err("must fail");
    assert!(matches!(
        err,
        DownloadError::IntegrityMismatch(IntegrityMismatchError { removed: true, .. })
    ));
}

#[test]
fn default_settings_use_five_minute_timeout() {
    let settings = ClientSettings::default();
    assert_eq!(settings.timeout, Duration::from_secs(300));
    assert_eq!(settings.mismatch_policy, MismatchPolicy::Keep);
}
