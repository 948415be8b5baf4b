//! Blocking HTTP transport for repository requests.
//!
//! Provides a trait-based abstraction over the two request shapes the client
//! needs (an authenticated GET and an authenticated streaming PUT), enabling
//! dependency injection for testing. [`HttpTransport`] is the `ureq`
//! implementation used in production.

use crate::query::ServiceQuery;
use std::fmt;
use std::io::Read;
use std::time::Duration;
use ureq::config::RedirectAuthHeaders;

/// Default bound on a single network call, connect through last body byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// A response whose status has not been judged yet.
///
/// The body is a stream; callers read as much as they need and drop it to
/// release the connection.
pub struct HttpReply {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Box<dyn Read + Send>,
}

impl HttpReply {
    /// Wrap a status and a body reader.
    #[must_use]
    pub fn new(status: u16, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }

    /// Consume the reply and read the body as UTF-8 text.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected so that
    /// error bodies can always be surfaced.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the body fails.
    pub fn into_text(mut self) -> std::io::Result<String> {
        let mut bytes = Vec::new();
        self.body.read_to_end(&mut bytes)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Debug for HttpReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpReply")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Failures below the HTTP status level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    /// The call exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection, TLS, redirect or protocol failure.
    #[error("{0}")]
    Transport(String),
}

/// Trait for issuing repository HTTP requests.
///
/// Implementations return every status as a reply; judging the status is
/// the caller's job.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Issue an authenticated GET for `query`, following redirects.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained.
    fn get(&self, query: &ServiceQuery) -> Result<HttpReply, HttpError>;

    /// Issue an authenticated PUT of `body` to `uri`.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained.
    fn put(
        &self,
        uri: &str,
        authorization: &str,
        body: Box<dyn Read + Send>,
    ) -> Result<HttpReply, HttpError>;
}

/// HTTP transport using a `ureq` agent.
///
/// Each instance owns its agent, so independent clients share no state.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport whose calls are bounded by `timeout`.
    ///
    /// Credentials follow redirects only while they stay on the same host.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .redirect_auth_headers(RedirectAuthHeaders::SameHost)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            timeout,
        }
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for HttpTransport {
    fn get(&self, query: &ServiceQuery) -> Result<HttpReply, HttpError> {
        let response = self
            .agent
            .get(query.url())
            .header("Accept", query.accept())
            .header("Authorization", query.authorization())
            .call()
            .map_err(|e| map_ureq_error(&e))?;
        let status = response.status().as_u16();
        Ok(HttpReply::new(status, response.into_body().into_reader()))
    }

    fn put(
        &self,
        uri: &str,
        authorization: &str,
        mut body: Box<dyn Read + Send>,
    ) -> Result<HttpReply, HttpError> {
        let response = self
            .agent
            .put(uri)
            .header("Authorization", authorization)
            .send(ureq::SendBody::from_reader(&mut body))
            .map_err(|e| map_ureq_error(&e))?;
        let status = response.status().as_u16();
        Ok(HttpReply::new(status, response.into_body().into_reader()))
    }
}

/// Map a ureq error to an [`HttpError`].
fn map_ureq_error(err: &ureq::Error) -> HttpError {
    match err {
        ureq::Error::Timeout(_) => HttpError::Timeout,
        other => HttpError::Transport(other.to_string()),
    }
}
