//! Nexus repository client library.
//!
//! This crate resolves Maven coordinates against a Nexus repository,
//! downloads the resolved artifact, verifies it against the SHA-1 the
//! repository reports, and uploads files into raw (site) repositories. It is
//! used by the `nexuscli` binary and can be driven directly from other
//! programs or tests.
//!
//! # Modules
//!
//! - [`client`] - Session facade and the resolve, download and verify workflow
//! - [`coordinate`] - Artifact coordinates and repository derivation
//! - [`credentials`] - Host URL and basic authentication
//! - [`error`] - Per-step error types
//! - [`query`] - Service query construction
//! - [`resolve`] - Coordinate resolution
//! - [`transfer`] - Streaming download to disk
//! - [`transport`] - HTTP abstraction and the `ureq` implementation
//! - [`upload`] - Raw repository uploads
//! - [`verify`] - SHA-1 verification and mismatch handling

pub mod client;
pub mod coordinate;
pub mod credentials;
pub mod error;
pub mod query;
pub mod resolve;
pub mod transfer;
pub mod transport;
pub mod upload;
pub mod verify;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use client::{ClientSettings, NexusClient};
pub use coordinate::ArtifactCoordinate;
pub use credentials::RepositoryCredentials;
pub use error::{DownloadError, IntegrityMismatchError, ResolutionError, TransferError, UploadError};
pub use verify::MismatchPolicy;
