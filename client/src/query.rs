//! Authenticated query construction for the Maven artifact endpoints.
//!
//! The resolve and redirect endpoints take the same `r, g, v, a, p`
//! parameters and differ only in path and `Accept` header, so both are built
//! here from an [`Endpoint`].

use crate::coordinate::ArtifactCoordinate;
use crate::credentials::RepositoryCredentials;
use url::form_urlencoded;

/// Path of the endpoint that returns artifact metadata.
pub const MAVEN_RESOLVE_PATH: &str = "/service/local/artifact/maven/resolve";

/// Path of the endpoint that serves (or redirects to) artifact bytes.
pub const MAVEN_REDIRECT_PATH: &str = "/service/local/artifact/maven/redirect";

/// The Maven artifact endpoints of the repository manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Metadata lookup, answered as JSON.
    Resolve,
    /// Artifact content, possibly via redirect.
    Redirect,
}

impl Endpoint {
    /// The path appended to the host URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Resolve => MAVEN_RESOLVE_PATH,
            Self::Redirect => MAVEN_REDIRECT_PATH,
        }
    }

    /// The `Accept` header value sent to this endpoint.
    ///
    /// The redirect endpoint selects its response form from this header.
    #[must_use]
    pub const fn accept(self) -> &'static str {
        match self {
            Self::Resolve => "application/json",
            Self::Redirect => "application/xml",
        }
    }
}

/// A fully parameterized, authenticated GET request.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceQuery {
    url: String,
    accept: &'static str,
    authorization: String,
}

impl ServiceQuery {
    /// The request URL including the encoded query string.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The `Accept` header value.
    #[must_use]
    pub fn accept(&self) -> &'static str {
        self.accept
    }

    /// The `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> &str {
        &self.authorization
    }
}

impl std::fmt::Debug for ServiceQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceQuery")
            .field("url", &self.url)
            .field("accept", &self.accept)
            .finish_non_exhaustive()
    }
}

/// Build the query for `endpoint`.
///
/// The repository parameter is derived from the version when the coordinate
/// does not pin one. Coordinates are passed through unvalidated.
///
/// # Examples
///
/// ```
/// use nexuscli_client::coordinate::ArtifactCoordinate;
/// use nexuscli_client::credentials::RepositoryCredentials;
/// use nexuscli_client::query::{Endpoint, build_query};
///
/// let creds = RepositoryCredentials::new("http://localhost:8081/nexus", "admin", "admin123");
/// let coordinate = ArtifactCoordinate::new("com.example", "artifactA", "2.0.0-SNAPSHOT", "jar");
/// let query = build_query(Endpoint::Resolve, &coordinate, &creds);
/// assert!(query.url().contains("r=snapshots"));
/// ```
#[must_use]
pub fn build_query(
    endpoint: Endpoint,
    coordinate: &ArtifactCoordinate,
    credentials: &RepositoryCredentials,
) -> ServiceQuery {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("r", coordinate.repository())
        .append_pair("g", coordinate.group())
        .append_pair("v", coordinate.version())
        .append_pair("a", coordinate.artifact())
        .append_pair("p", coordinate.packaging())
        .finish();
    ServiceQuery {
        url: format!("{}{}?{query}", credentials.host_url(), endpoint.path()),
        accept: endpoint.accept(),
        authorization: credentials.basic_auth_header(),
    }
}
