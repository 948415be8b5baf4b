//! Batch downloads driven by an artifact list file.
//!
//! The list holds one `group:artifact:version:packaging` coordinate per
//! line. Blank lines and `#` comments are skipped. Every line is parsed
//! before the first download starts, so a typo on line 40 does not leave
//! 39 artifacts behind.

use crate::error::{CliError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::{error, info};
use nexuscli_client::{ArtifactCoordinate, DownloadError};

/// A coordinate and the list line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// One-based line number.
    pub line: usize,
    /// The parsed coordinate.
    pub coordinate: ArtifactCoordinate,
}

/// Parse artifact list text.
///
/// # Errors
///
/// Returns [`CliError::ListEntry`] for the first malformed line.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use nexuscli_cli::batch::parse_artifact_list;
///
/// let entries = parse_artifact_list(
///     "# runtime\ncom.example:app:1.0:jar\n\n",
///     Utf8Path::new("list.txt"),
/// )
/// .expect("valid list");
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].line, 2);
/// ```
pub fn parse_artifact_list(source: &str, path: &Utf8Path) -> Result<Vec<ListEntry>> {
    source
        .lines()
        .enumerate()
        .map(|(index, raw)| (index + 1, raw.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, text)| {
            text.parse::<ArtifactCoordinate>()
                .map(|coordinate| ListEntry { line, coordinate })
                .map_err(|source| CliError::ListEntry {
                    path: path.to_owned(),
                    line,
                    source,
                })
        })
        .collect()
}

/// Read and parse the artifact list at `path`.
///
/// # Errors
///
/// Returns [`CliError::ListRead`] if the file cannot be read, or
/// [`CliError::ListEntry`] for a malformed line.
pub fn read_artifact_list(path: &Utf8Path) -> Result<Vec<ListEntry>> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::ListRead {
        path: path.to_owned(),
        source,
    })?;
    parse_artifact_list(&source, path)
}

/// The outcome of one batch entry.
#[derive(Debug)]
pub struct EntryOutcome {
    /// The entry that was attempted.
    pub entry: ListEntry,
    /// The verified file path, or why it failed.
    pub result: std::result::Result<Utf8PathBuf, DownloadError>,
}

/// Per-entry results of a batch run, in list order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One outcome per attempted entry.
    pub outcomes: Vec<EntryOutcome>,
}

impl BatchReport {
    /// Paths of the successful downloads.
    pub fn downloaded(&self) -> impl Iterator<Item = &Utf8Path> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok().map(Utf8PathBuf::as_path))
    }

    /// Number of successful downloads.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.downloaded().count()
    }

    /// Number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Convert the report into the run's result.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::BatchFailed`] when any entry failed.
    pub fn into_result(self) -> Result<()> {
        match self.failed() {
            0 => Ok(()),
            failed => Err(CliError::BatchFailed {
                failed,
                total: self.outcomes.len(),
            }),
        }
    }
}

/// Run `download` for every entry in order, continuing past failures.
pub fn run_batch<F>(entries: Vec<ListEntry>, mut download: F) -> BatchReport
where
    F: FnMut(&ArtifactCoordinate) -> std::result::Result<Utf8PathBuf, DownloadError>,
{
    let total = entries.len();
    let mut report = BatchReport::default();
    for (position, entry) in entries.into_iter().enumerate() {
        info!("[{}/{total}] {}", position + 1, entry.coordinate);
        let result = download(&entry.coordinate);
        if let Err(e) = &result {
            error!("line {}: {} failed: {e}", entry.line, entry.coordinate);
        }
        report.outcomes.push(EntryOutcome { entry, result });
    }
    info!(
        "batch finished: {} downloaded, {} failed",
        report.succeeded(),
        report.failed()
    );
    report
}
