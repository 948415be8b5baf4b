//! CLI argument definitions for `nexuscli`.
//!
//! Connection options are global so that every subcommand accepts them in
//! the same place. Values left unset here fall back to environment
//! variables (handled by clap) and then to the profile file.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Download and upload artifacts against a Nexus repository manager.
#[derive(Parser, Debug, Clone)]
#[command(name = "nexuscli")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Download the latest release of an artifact:\n",
    "    $ nexuscli -H http://localhost:8081/nexus download -g com.example -a app -p jar\n\n",
    "  Download every coordinate listed in a file:\n",
    "    $ nexuscli multi-download -f artifacts.txt -d ./lib\n\n",
    "  Publish a file into a raw site repository:\n",
    "    $ nexuscli site-upload -r site -f build/index.html -D docs\n\n",
    "Connection settings may also come from NEXUS_HOST, NEXUS_USERNAME,\n",
    "NEXUS_PASSWORD or the profile file ~/.nexuscli.toml.",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Connection and output options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options accepted by every subcommand.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Repository manager URL including protocol and context path.
    #[arg(short = 'H', long, env = "NEXUS_HOST", global = true, value_name = "URL")]
    pub host_url: Option<String>,

    /// User name for basic authentication.
    #[arg(short = 'U', long, env = "NEXUS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for basic authentication.
    #[arg(
        short = 'P',
        long,
        env = "NEXUS_PASSWORD",
        global = true,
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Profile file to read instead of ~/.nexuscli.toml.
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Bound on each network call, in seconds [default: 300].
    #[arg(long = "timeout", global = true, value_name = "SECS",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Increase log verbosity (repeatable: -v, -vv). Must precede the
    /// subcommand, where `-v` selects the artifact version.
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Resolve, download and verify one artifact.
    Download(DownloadArgs),

    /// Download every artifact listed in a file.
    MultiDownload(MultiDownloadArgs),

    /// Upload a file into a raw (site) repository.
    SiteUpload(SiteUploadArgs),
}

/// Arguments for the download command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DownloadArgs {
    /// Maven group id.
    #[arg(short, long = "group-id", value_name = "GROUP")]
    pub group_id: String,

    /// Maven artifact id.
    #[arg(short, long = "artifact-id", value_name = "ARTIFACT")]
    pub artifact_id: String,

    /// Artifact version, or LATEST.
    #[arg(
        short = 'v',
        long = "version-id",
        value_name = "VERSION",
        default_value = "LATEST"
    )]
    pub version: String,

    /// Packaging (file extension), for example jar or war.
    #[arg(short, long, value_name = "PACKAGING")]
    pub packaging: String,

    /// Repository id [default: derived from the version].
    #[arg(short, long = "repository-id", value_name = "REPO")]
    pub repository: Option<String>,

    /// Directory to write the artifact to [default: current directory].
    #[arg(short, long = "destination", value_name = "DIR")]
    pub destination: Option<Utf8PathBuf>,

    /// Delete the file if its checksum does not match.
    #[arg(long)]
    pub delete_on_mismatch: bool,
}

/// Arguments for the multi-download command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MultiDownloadArgs {
    /// File listing one group:artifact:version:packaging per line.
    #[arg(short, long = "file", value_name = "FILE")]
    pub file: Utf8PathBuf,

    /// Directory to write the artifacts to [default: current directory].
    #[arg(short, long = "destination", value_name = "DIR")]
    pub destination: Option<Utf8PathBuf>,

    /// Delete files whose checksum does not match.
    #[arg(long)]
    pub delete_on_mismatch: bool,
}

/// Arguments for the site-upload command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SiteUploadArgs {
    /// Raw repository id.
    #[arg(short, long = "repository-id", value_name = "REPO")]
    pub repository: String,

    /// Local file to upload.
    #[arg(short, long = "file", value_name = "FILE")]
    pub file: Utf8PathBuf,

    /// Name to store the file under [default: the local file name].
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Directory inside the repository.
    #[arg(short = 'D', long = "directory", value_name = "DIR", default_value = "")]
    pub directory: String,
}

impl SiteUploadArgs {
    /// The name the file is stored under.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8PathBuf;
    /// use nexuscli_cli::cli::SiteUploadArgs;
    ///
    /// let args = SiteUploadArgs {
    ///     repository: "site".to_owned(),
    ///     file: Utf8PathBuf::from("build/index.html"),
    ///     name: None,
    ///     directory: String::new(),
    /// };
    /// assert_eq!(args.remote_name(), Some("index.html".to_owned()));
    /// ```
    #[must_use]
    pub fn remote_name(&self) -> Option<String> {
        self.name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.file.file_name().map(str::to_owned))
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
