//! Maven artifact coordinates and repository classifier derivation.
//!
//! A coordinate names a logical artifact by group, artifact, version and
//! packaging. When no repository is supplied, the repository is derived from
//! the version: snapshot versions resolve from `snapshots`, everything else
//! from `releases`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Version requested when the caller does not pin one.
pub const LATEST_VERSION: &str = "LATEST";

/// Repository used for versions ending in [`SNAPSHOT_SUFFIX`].
pub const SNAPSHOTS_REPOSITORY: &str = "snapshots";

/// Repository used for every other version.
pub const RELEASES_REPOSITORY: &str = "releases";

/// Version suffix that marks a snapshot build.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Return the default repository for `version`.
///
/// # Examples
///
/// ```
/// use nexuscli_client::coordinate::repository_for_version;
///
/// assert_eq!(repository_for_version("2.0.0-SNAPSHOT"), "snapshots");
/// assert_eq!(repository_for_version("LATEST"), "releases");
/// ```
#[must_use]
pub fn repository_for_version(version: &str) -> &'static str {
    if version.ends_with(SNAPSHOT_SUFFIX) {
        SNAPSHOTS_REPOSITORY
    } else {
        RELEASES_REPOSITORY
    }
}

/// Identifies one artifact in a Maven-layout repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCoordinate {
    group: String,
    artifact: String,
    version: String,
    packaging: String,
    repository: Option<String>,
}

impl ArtifactCoordinate {
    /// Create a coordinate with no explicit repository.
    ///
    /// An empty `version` is replaced by [`LATEST_VERSION`].
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
        packaging: impl Into<String>,
    ) -> Self {
        let version = version.into();
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: if version.trim().is_empty() {
                LATEST_VERSION.to_owned()
            } else {
                version
            },
            packaging: packaging.into(),
            repository: None,
        }
    }

    /// Pin the repository to resolve from.
    ///
    /// Blank values leave the repository unset so that it is derived from
    /// the version instead.
    #[must_use]
    pub fn with_repository(mut self, repository: Option<impl Into<String>>) -> Self {
        self.repository = repository
            .map(Into::into)
            .filter(|value: &String| !value.trim().is_empty());
        self
    }

    /// The Maven group id.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The Maven artifact id.
    #[must_use]
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// The requested version, possibly `LATEST`.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The packaging, e.g. `jar` or `war`.
    #[must_use]
    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    /// The repository pinned by the caller, if any.
    #[must_use]
    pub fn explicit_repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    /// The repository queries will use: the pinned one, or the one derived
    /// from the version.
    #[must_use]
    pub fn repository(&self) -> &str {
        self.repository
            .as_deref()
            .unwrap_or_else(|| repository_for_version(&self.version))
    }

    /// Return a copy whose repository is always set.
    #[must_use]
    pub fn with_derived_repository(&self) -> Self {
        let repository = self.repository().to_owned();
        Self {
            repository: Some(repository),
            ..self.clone()
        }
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group, self.artifact, self.version, self.packaging
        )
    }
}

/// A `group:artifact:version:packaging` string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid coordinate \"{value}\": {reason}")]
pub struct CoordinateParseError {
    /// The rejected input.
    pub value: String,
    /// Description of the problem.
    pub reason: String,
}

impl FromStr for ArtifactCoordinate {
    type Err = CoordinateParseError;

    /// Parse the `G:A:V:P` form used by artifact list files.
    ///
    /// # Examples
    ///
    /// ```
    /// use nexuscli_client::coordinate::ArtifactCoordinate;
    ///
    /// let coordinate: ArtifactCoordinate = "com.baz.group:foo:1.0.0:jar".parse().unwrap();
    /// assert_eq!(coordinate.artifact(), "foo");
    /// assert_eq!(coordinate.repository(), "releases");
    /// ```
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = value.trim().split(':').map(str::trim).collect();
        let [group, artifact, version, packaging] = fields.as_slice() else {
            return Err(CoordinateParseError {
                value: value.to_owned(),
                reason: format!(
                    "expected group:artifact:version:packaging, got {} field(s)",
                    fields.len()
                ),
            });
        };
        if let Some(name) = [("group", group), ("artifact", artifact), ("packaging", packaging)]
            .iter()
            .find_map(|(name, field)| field.is_empty().then_some(*name))
        {
            return Err(CoordinateParseError {
                value: value.to_owned(),
                reason: format!("{name} must not be empty"),
            });
        }
        Ok(Self::new(*group, *artifact, *version, *packaging))
    }
}
