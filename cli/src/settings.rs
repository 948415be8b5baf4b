//! Merging of command-line, environment and profile settings.
//!
//! Clap has already folded environment variables into [`GlobalArgs`], so the
//! precedence left to apply here is: argument, then profile, then the
//! built-in default.

use crate::cli::GlobalArgs;
use crate::error::{CliError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use nexuscli::ProfileConfig;
use nexuscli_client::transport::DEFAULT_TIMEOUT;
use nexuscli_client::{ClientSettings, MismatchPolicy, RepositoryCredentials};
use std::time::Duration;

/// Everything needed to open a repository session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Host URL and basic authentication.
    pub credentials: RepositoryCredentials,
    /// Timeout and mismatch policy.
    pub client: ClientSettings,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Merge connection settings from the arguments and the profile.
///
/// `profile_label` names the profile in the error raised when no host URL
/// is available.
///
/// # Errors
///
/// Returns [`CliError::MissingHostUrl`] when neither source supplies a
/// non-blank host URL.
///
/// # Examples
///
/// ```
/// use nexuscli::ProfileConfig;
/// use nexuscli_cli::cli::GlobalArgs;
/// use nexuscli_cli::settings::resolve_session;
///
/// let args = GlobalArgs {
///     host_url: Some("http://localhost:8081/nexus".to_owned()),
///     ..GlobalArgs::default()
/// };
/// let session = resolve_session(&args, &ProfileConfig::default(), "~/.nexuscli.toml", false)
///     .expect("host supplied");
/// assert_eq!(session.credentials.host_url(), "http://localhost:8081/nexus");
/// ```
pub fn resolve_session(
    args: &GlobalArgs,
    profile: &ProfileConfig,
    profile_label: &str,
    delete_on_mismatch: bool,
) -> Result<SessionSettings> {
    let host_url = non_blank(args.host_url.as_ref())
        .or_else(|| non_blank(profile.host_url.as_ref()))
        .ok_or_else(|| CliError::MissingHostUrl {
            profile: profile_label.to_owned(),
        })?;
    let username = args
        .username
        .as_deref()
        .or(profile.username.as_deref())
        .unwrap_or_default();
    let password = args
        .password
        .as_deref()
        .or(profile.password.as_deref())
        .unwrap_or_default();

    let timeout = args
        .timeout_secs
        .or(profile.timeout_secs)
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);
    let mismatch_policy = MismatchPolicy::from_delete_flag(
        delete_on_mismatch || profile.delete_on_mismatch.unwrap_or(false),
    );

    Ok(SessionSettings {
        credentials: RepositoryCredentials::new(host_url, username, password),
        client: ClientSettings {
            timeout,
            mismatch_policy,
        },
    })
}

/// Pick the download directory: argument, then profile, then `cwd`.
///
/// # Errors
///
/// Returns [`CliError::CurrentDir`] if the fallback is needed and `cwd`
/// fails.
pub fn resolve_destination(
    flag: Option<&Utf8Path>,
    profile: &ProfileConfig,
    cwd: impl FnOnce() -> Result<Utf8PathBuf>,
) -> Result<Utf8PathBuf> {
    match flag.or(profile.destination.as_deref()) {
        Some(dir) => Ok(dir.to_owned()),
        None => cwd(),
    }
}

/// The process working directory as a UTF-8 path.
///
/// # Errors
///
/// Returns [`CliError::CurrentDir`] if the directory cannot be read or is
/// not valid UTF-8.
pub fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| CliError::CurrentDir {
        reason: e.to_string(),
    })?;
    Utf8PathBuf::try_from(cwd).map_err(|e| CliError::CurrentDir {
        reason: format!("path is not valid UTF-8: {e}"),
    })
}
