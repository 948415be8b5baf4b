//! Directory resolution abstraction for platform-specific paths.
//!
//! The profile loader only needs the user's home directory. Hiding it behind
//! [`BaseDirs`] lets tests point the loader at a temporary directory.

use camino::Utf8PathBuf;

/// Source of well-known user directories.
pub trait BaseDirs {
    /// The current user's home directory, if it can be determined and is
    /// valid UTF-8.
    fn home_dir(&self) -> Option<Utf8PathBuf>;
}

/// [`BaseDirs`] backed by the operating system via `directories-next`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn home_dir(&self) -> Option<Utf8PathBuf> {
        let dirs = directories_next::BaseDirs::new()?;
        Utf8PathBuf::from_path_buf(dirs.home_dir().to_path_buf()).ok()
    }
}

/// [`BaseDirs`] rooted at a fixed directory.
#[derive(Debug, Clone, Default)]
pub struct FixedBaseDirs {
    home: Option<Utf8PathBuf>,
}

impl FixedBaseDirs {
    /// Use `home` as the home directory.
    #[must_use]
    pub fn new(home: impl Into<Utf8PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// A directory source with no home directory.
    #[must_use]
    pub fn homeless() -> Self {
        Self { home: None }
    }
}

impl BaseDirs for FixedBaseDirs {
    fn home_dir(&self) -> Option<Utf8PathBuf> {
        self.home.clone()
    }
}
