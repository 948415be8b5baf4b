//! Profile configuration loader backed by `toml`.
//!
//! A profile supplies defaults for the connection settings and download
//! options so that they need not be repeated on every invocation. It is read
//! from `~/.nexuscli.toml` unless a path is given explicitly. Every key is
//! optional; command-line flags and environment variables take precedence
//! over whatever the profile holds.

use crate::dirs::BaseDirs;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use std::io;
use thiserror::Error;

/// File name of the default profile inside the home directory.
pub const PROFILE_FILE_NAME: &str = ".nexuscli.toml";

/// Settings read from a profile file.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Base URL of the repository manager, including any context path.
    pub host_url: Option<String>,
    /// Basic authentication user name.
    pub username: Option<String>,
    /// Basic authentication password.
    pub password: Option<String>,
    /// Directory downloads are written to.
    pub destination: Option<Utf8PathBuf>,
    /// Bound on each network call, in seconds.
    pub timeout_secs: Option<u64>,
    /// Remove downloads that fail checksum verification.
    pub delete_on_mismatch: Option<bool>,
}

impl ProfileConfig {
    /// Parse a profile from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// [`ConfigError::Invalid`] for a zero timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use nexuscli::config::ProfileConfig;
    ///
    /// let profile = ProfileConfig::parse(
    ///     "host_url = \"http://localhost:8081/nexus\"\n",
    ///     Utf8Path::new("inline.toml"),
    /// )
    /// .expect("valid profile");
    /// assert_eq!(profile.host_url.as_deref(), Some("http://localhost:8081/nexus"));
    /// ```
    pub fn parse(source: &str, path: &Utf8Path) -> Result<Self, ConfigError> {
        let profile = toml::from_str::<Self>(source).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        if profile.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                path: path.to_owned(),
                reason: "timeout_secs must be greater than zero".to_owned(),
            });
        }
        Ok(profile)
    }
}

/// Failures while locating or reading a profile.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested profile does not exist.
    #[error("profile {path} not found")]
    NotFound {
        /// The requested path.
        path: Utf8PathBuf,
    },

    /// The profile exists but could not be read.
    #[error("cannot read profile {path}: {source}")]
    Read {
        /// The profile path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The profile is not valid TOML or contains unknown keys.
    #[error("invalid profile {path}: {reason}")]
    Parse {
        /// The profile path.
        path: Utf8PathBuf,
        /// The parser's message.
        reason: String,
    },

    /// A value is well-formed but unusable.
    #[error("invalid profile {path}: {reason}")]
    Invalid {
        /// The profile path.
        path: Utf8PathBuf,
        /// What is wrong with the value.
        reason: String,
    },
}

/// The default profile location, `~/.nexuscli.toml`.
#[must_use]
pub fn default_profile_path(dirs: &dyn BaseDirs) -> Option<Utf8PathBuf> {
    dirs.home_dir().map(|home| home.join(PROFILE_FILE_NAME))
}

/// Load the profile at `explicit`, or the default profile when `None`.
///
/// A missing default profile (or an undeterminable home directory) yields
/// an empty profile. A missing explicit profile is an error.
///
/// # Errors
///
/// Returns [`ConfigError`] if an explicit profile is missing, or if the
/// chosen file cannot be read or parsed.
pub fn load_profile(
    explicit: Option<&Utf8Path>,
    dirs: &dyn BaseDirs,
) -> Result<ProfileConfig, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_owned(), true),
        None => match default_profile_path(dirs) {
            Some(path) => (path, false),
            None => {
                debug!("no home directory; using an empty profile");
                return Ok(ProfileConfig::default());
            }
        },
    };

    match std::fs::read_to_string(&path) {
        Ok(source) => {
            debug!("loaded profile from {path}");
            ProfileConfig::parse(&source, &path)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::NotFound { path })
            } else {
                debug!("no profile at {path}");
                Ok(ProfileConfig::default())
            }
        }
        Err(source) => Err(ConfigError::Read { path, source }),
    }
}
