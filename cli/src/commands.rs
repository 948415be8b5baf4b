//! Subcommand execution.
//!
//! [`run`] loads the profile, merges settings and dispatches to the
//! subcommand. Results are written to `stdout`; failures come back as
//! [`CliError`] for `main` to report.

use crate::batch::{read_artifact_list, run_batch};
use crate::cli::{Cli, Command, DownloadArgs, MultiDownloadArgs, SiteUploadArgs};
use crate::error::{CliError, Result};
use crate::output::write_line;
use crate::settings::{SessionSettings, current_dir, resolve_destination, resolve_session};
use camino::Utf8PathBuf;
use log::info;
use nexuscli::ProfileConfig;
use nexuscli::config::{PROFILE_FILE_NAME, default_profile_path, load_profile};
use nexuscli::dirs::BaseDirs;
use nexuscli_client::upload::UploadTarget;
use nexuscli_client::{ArtifactCoordinate, NexusClient};
use std::io::Write;

/// Inputs shared by every subcommand.
struct RunContext<'a> {
    cli: &'a Cli,
    profile: ProfileConfig,
    profile_label: String,
}

impl RunContext<'_> {
    fn session(&self, delete_on_mismatch: bool) -> Result<SessionSettings> {
        resolve_session(
            &self.cli.global,
            &self.profile,
            &self.profile_label,
            delete_on_mismatch,
        )
    }
}

fn client_for(session: SessionSettings) -> NexusClient {
    NexusClient::new(session.credentials, session.client)
}

/// Execute the parsed command line.
///
/// # Errors
///
/// Returns [`CliError`] if the profile cannot be loaded, settings are
/// incomplete, or the subcommand fails.
pub fn run(cli: &Cli, dirs: &dyn BaseDirs, stdout: &mut dyn Write) -> Result<()> {
    let profile = load_profile(cli.global.config.as_deref(), dirs)?;
    let profile_label = cli
        .global
        .config
        .clone()
        .or_else(|| default_profile_path(dirs))
        .map_or_else(|| format!("~/{PROFILE_FILE_NAME}"), Utf8PathBuf::into_string);
    let context = RunContext {
        cli,
        profile,
        profile_label,
    };

    match &cli.command {
        Command::Download(args) => run_download(&context, args, stdout),
        Command::MultiDownload(args) => run_multi_download(&context, args, stdout),
        Command::SiteUpload(args) => run_site_upload(&context, args, stdout),
    }
}

fn run_download(
    context: &RunContext<'_>,
    args: &DownloadArgs,
    stdout: &mut dyn Write,
) -> Result<()> {
    let session = context.session(args.delete_on_mismatch)?;
    let destination =
        resolve_destination(args.destination.as_deref(), &context.profile, current_dir)?;
    let coordinate = ArtifactCoordinate::new(
        &args.group_id,
        &args.artifact_id,
        &args.version,
        &args.packaging,
    )
    .with_repository(args.repository.as_deref());

    let path = client_for(session).download(&coordinate, &destination)?;
    write_line(stdout, path);
    Ok(())
}

fn run_multi_download(
    context: &RunContext<'_>,
    args: &MultiDownloadArgs,
    stdout: &mut dyn Write,
) -> Result<()> {
    let entries = read_artifact_list(&args.file)?;
    let session = context.session(args.delete_on_mismatch)?;
    let destination =
        resolve_destination(args.destination.as_deref(), &context.profile, current_dir)?;
    info!("downloading {} artifact(s) to {destination}", entries.len());

    let client = client_for(session);
    let report = run_batch(entries, |coordinate| client.download(coordinate, &destination));
    for path in report.downloaded() {
        write_line(stdout, path);
    }
    report.into_result()
}

fn run_site_upload(
    context: &RunContext<'_>,
    args: &SiteUploadArgs,
    stdout: &mut dyn Write,
) -> Result<()> {
    let session = context.session(false)?;
    let name = args
        .remote_name()
        .ok_or_else(|| CliError::MissingRemoteName {
            path: args.file.clone(),
        })?;
    let target = UploadTarget::new(args.file.clone(), name, args.directory.clone());

    let uri = client_for(session).upload(&args.repository, &target)?;
    info!("Uploaded {} to {uri}", args.file);
    write_line(stdout, uri);
    Ok(())
}
