//! Zip packaging for exported container files.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dynopull_core::ports::{ArchiveError, ArchiveSummary, Archiver};
use tracing::debug;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Writes deflate-compressed zip archives.
///
/// Only regular files are stored; directories are implied by entry names
/// and symlinks are skipped, so a hostile image cannot point the archiver
/// at files outside the export.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Archiver for ZipArchiver {
    async fn zip_dir(
        &self,
        source: &Path,
        base: &Path,
        dest: &Path,
    ) -> Result<ArchiveSummary, ArchiveError> {
        let source = source.to_path_buf();
        let base = base.to_path_buf();
        let dest = dest.to_path_buf();

        tokio::task::spawn_blocking(move || write_archive(&source, &base, &dest))
            .await
            .map_err(|e| ArchiveError::Zip(format!("archive task failed: {e}")))?
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> ArchiveError + '_ {
    move |e| ArchiveError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn write_archive(source: &Path, base: &Path, dest: &Path) -> Result<ArchiveSummary, ArchiveError> {
    if !source.is_dir() {
        return Err(ArchiveError::SourceMissing(source.to_path_buf()));
    }
    if !source.starts_with(base) {
        return Err(ArchiveError::OutsideBase {
            source_dir: source.to_path_buf(),
            base: base.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    collect_files(source, &mut files)?;

    let out = File::create(dest).map_err(io_err(dest))?;
    let mut zip = ZipWriter::new(BufWriter::new(out));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(true);

    for path in &files {
        let name = entry_name(path, base)?;
        zip.start_file(name.as_str(), options)
            .map_err(|e| ArchiveError::Zip(e.to_string()))?;
        let mut input = File::open(path).map_err(io_err(path))?;
        io::copy(&mut input, &mut zip).map_err(io_err(path))?;
        debug!(entry = %name, "Added archive entry");
    }

    let mut writer = zip.finish().map_err(|e| ArchiveError::Zip(e.to_string()))?;
    io::Write::flush(&mut writer).map_err(io_err(dest))?;
    drop(writer);

    let bytes = fs::metadata(dest).map_err(io_err(dest))?.len();
    Ok(ArchiveSummary {
        path: dest.to_path_buf(),
        files: files.len(),
        bytes,
    })
}

/// Collect regular files below `dir`, depth first, in name order.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ArchiveError> {
    let mut entries = fs::read_dir(dir)
        .map_err(io_err(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err(dir))?;
    entries.sort();

    for path in entries {
        let file_type = fs::symlink_metadata(&path)
            .map_err(io_err(&path))?
            .file_type();
        if file_type.is_dir() {
            collect_files(&path, out)?;
        } else if file_type.is_file() {
            out.push(path);
        } else {
            debug!(path = %path.display(), "Skipping non-regular file");
        }
    }
    Ok(())
}

/// Zip entry name for `path`: relative to `base`, `/`-separated.
fn entry_name(path: &Path, base: &Path) -> Result<String, ArchiveError> {
    let relative = path
        .strip_prefix(base)
        .map_err(|_| ArchiveError::OutsideBase {
            source_dir: path.to_path_buf(),
            base: base.to_path_buf(),
        })?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
