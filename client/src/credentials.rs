//! Repository host and basic-authentication credentials.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Host URL and login shared by every request in a session.
///
/// Constructed once by the caller and passed by reference into each
/// workflow; nothing in the client mutates it.
#[derive(Clone, PartialEq, Eq)]
pub struct RepositoryCredentials {
    host_url: String,
    username: String,
    password: String,
}

impl RepositoryCredentials {
    /// Create credentials for `host_url`.
    ///
    /// Trailing slashes on the host are dropped so that endpoint paths can
    /// be appended directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use nexuscli_client::credentials::RepositoryCredentials;
    ///
    /// let creds = RepositoryCredentials::new("http://localhost:8081/nexus/", "admin", "admin123");
    /// assert_eq!(creds.host_url(), "http://localhost:8081/nexus");
    /// ```
    #[must_use]
    pub fn new(
        host_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let host_url = host_url.into();
        Self {
            host_url: host_url.trim_end_matches('/').to_owned(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// The repository manager base URL, without a trailing slash.
    #[must_use]
    pub fn host_url(&self) -> &str {
        &self.host_url
    }

    /// The login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The `Authorization` header value for HTTP basic authentication.
    #[must_use]
    pub fn basic_auth_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

impl fmt::Debug for RepositoryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryCredentials")
            .field("host_url", &self.host_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_header_encodes_user_and_password() {
        let creds = RepositoryCredentials::new("http://localhost:8081", "admin", "admin123");
        assert_eq!(creds.basic_auth_header(), "Basic YWRtaW46YWRtaW4xMjM=");
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = RepositoryCredentials::new("http://localhost:8081", "admin", "s3cret");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("admin"));
    }

    #[test]
    fn host_url_keeps_context_path() {
        let creds = RepositoryCredentials::new("https://repo.example.com/nexus//", "u", "p");
        assert_eq!(creds.host_url(), "https://repo.example.com/nexus");
    }
}
