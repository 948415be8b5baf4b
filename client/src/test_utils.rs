//! Shared test utilities for the client crate.

use crate::query::ServiceQuery;
use crate::transport::{HttpError, HttpReply, Transport};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Cursor, Read};

/// Builds a resolve endpoint response body.
pub fn resolution_json(artifact_id: &str, version: &str, extension: &str, sha1: &str) -> String {
    format!(
        concat!(
            r#"{{"data":{{"presentLocally":true,"groupId":"com.example","#,
            r#""artifactId":"{artifact_id}","version":"{version}","extension":"{extension}","#,
            r#""snapshot":{snapshot},"sha1":"{sha1}"}}}}"#
        ),
        artifact_id = artifact_id,
        version = version,
        extension = extension,
        snapshot = version.contains("SNAPSHOT"),
        sha1 = sha1,
    )
}

pub use crate::verify::sha1_hex;

/// A request observed by [`StubTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedRequest {
    /// A GET with its full URL and `Accept` value.
    Get {
        /// The request URL.
        url: String,
        /// The `Accept` header value.
        accept: String,
    },
    /// A PUT with its URI and the body bytes.
    Put {
        /// The target URI.
        uri: String,
        /// The uploaded bytes.
        body: Vec<u8>,
    },
}

/// A scripted reply: a status and body, or a transport failure.
pub type ScriptedReply = Result<(u16, Vec<u8>), HttpError>;

/// A stub implementation of [`Transport`] for testing.
///
/// Replies are served in order regardless of the request, and every request
/// is recorded so tests can assert on what was sent. A request arriving after
/// the script is exhausted panics.
#[derive(Debug, Default)]
pub struct StubTransport {
    replies: RefCell<VecDeque<ScriptedReply>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl StubTransport {
    /// Creates a stub that serves `replies` in order.
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// The requests seen so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    /// Asserts that every scripted reply has been consumed.
    ///
    /// # Panics
    ///
    /// Panics if replies remain.
    pub fn assert_finished(&self) {
        assert!(
            self.replies.borrow().is_empty(),
            "expected no further requests to be scripted"
        );
    }

    fn next_reply(&self) -> Result<HttpReply, HttpError> {
        let Some(reply) = self.replies.borrow_mut().pop_front() else {
            panic!("unexpected request: no scripted replies remain");
        };
        reply.map(|(status, body)| HttpReply::new(status, Cursor::new(body)))
    }
}

impl Transport for StubTransport {
    fn get(&self, query: &ServiceQuery) -> Result<HttpReply, HttpError> {
        self.requests.borrow_mut().push(RecordedRequest::Get {
            url: query.url().to_owned(),
            accept: query.accept().to_owned(),
        });
        self.next_reply()
    }

    fn put(
        &self,
        uri: &str,
        _authorization: &str,
        mut body: Box<dyn Read + Send>,
    ) -> Result<HttpReply, HttpError> {
        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes)
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        self.requests.borrow_mut().push(RecordedRequest::Put {
            uri: uri.to_owned(),
            body: bytes,
        });
        self.next_reply()
    }
}
