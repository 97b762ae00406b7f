//! Report Delivery
//!
//! Hands rendered report bytes to the user in two steps. `stage` does the
//! slow work (writing the bytes) and `commit` makes the report visible. A
//! staged report that is dropped without being committed leaves nothing
//! behind, so a report for a superseded session is never published.

use std::io::Write;
use std::path::{Path, PathBuf};

use casefile_backend::ReportArtifact;
use tempfile::NamedTempFile;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_dir;

/// Destination for exported reports.
///
/// `stage` is blocking; callers run it off the async runtime.
pub trait DownloadSink: Send + Sync {
    /// Prepare `artifact` for delivery as `file_name` without publishing it.
    fn stage(&self, file_name: &str, artifact: &ReportArtifact) -> AppResult<Box<dyn StagedReport>>;
}

/// A report ready to be published. Dropping it discards the report.
pub trait StagedReport: Send {
    /// Publish the report and return where it ended up. Must be quick; it
    /// runs while the session is locked.
    fn commit(self: Box<Self>) -> AppResult<PathBuf>;
}

/// Writes reports into a directory on disk.
#[derive(Debug, Clone)]
pub struct FileDownloadSink {
    dir: PathBuf,
}

impl FileDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for FileDownloadSink {
    fn stage(&self, file_name: &str, artifact: &ReportArtifact) -> AppResult<Box<dyn StagedReport>> {
        let file_name = sanitize_file_name(file_name)?;
        ensure_dir(&self.dir)?;

        // Dropping the staging file on any early return removes it.
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(&artifact.bytes)?;
        staged.as_file().sync_all()?;

        Ok(Box::new(StagedFile {
            staged,
            target: self.dir.join(file_name),
            len: artifact.len(),
        }))
    }
}

/// Report bytes in a temporary file next to their final name.
struct StagedFile {
    staged: NamedTempFile,
    target: PathBuf,
    len: usize,
}

impl StagedReport for StagedFile {
    fn commit(self: Box<Self>) -> AppResult<PathBuf> {
        let StagedFile {
            staged,
            target,
            len,
        } = *self;
        staged.persist(&target).map_err(|e| AppError::Io(e.error))?;
        tracing::info!("[Download] wrote {} bytes to {}", len, target.display());
        Ok(target)
    }
}

/// Strip path components so a document name can never escape the download
/// directory.
fn sanitize_file_name(name: &str) -> AppResult<String> {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        return Err(AppError::validation(format!("invalid report file name '{}'", name)));
    }
    Ok(cleaned)
}
