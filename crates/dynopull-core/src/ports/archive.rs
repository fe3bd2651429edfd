//! Archive creation port.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result of packaging a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Where the archive was written.
    pub path: PathBuf,
    /// Number of regular files stored.
    pub files: usize,
    /// Size of the archive on disk in bytes.
    pub bytes: u64,
}

/// Errors that can occur while creating an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The directory to package does not exist.
    #[error("Nothing to package: {0} does not exist")]
    SourceMissing(PathBuf),

    /// The source directory is not below the entry-name base.
    #[error("{source_dir} is not inside {base}")]
    OutsideBase { source_dir: PathBuf, base: PathBuf },

    /// Filesystem error while reading sources or writing the archive.
    #[error("Failed to access {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    /// The archive writer rejected an entry.
    #[error("Failed to write archive: {0}")]
    Zip(String),
}

/// Packages a directory tree into a single archive file.
#[async_trait]
pub trait Archiver: Send + Sync {
    /// Store every regular file under `source` in a new archive at `dest`.
    ///
    /// Entry names are the file paths relative to `base`, using `/` as the
    /// separator. `source` must be `base` or one of its descendants.
    async fn zip_dir(
        &self,
        source: &Path,
        base: &Path,
        dest: &Path,
    ) -> Result<ArchiveSummary, ArchiveError>;
}
