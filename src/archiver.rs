//! The archive-writing collaborator.
//!
//! Serializes a resource's files into a compressed zip artifact. The
//! interface is handle-based: create an archive, add directories and files,
//! then finalize to get the byte count. A failure propagates as a
//! per-resource packaging failure.

use crate::core::BlocksmithError;
use crate::utils::fs::ensure_dir;
use anyhow::Result;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// An open zip archive being written.
pub struct ZipArchiver {
    writer: zip::ZipWriter<File>,
    path: PathBuf,
}

impl ZipArchiver {
    /// Create the archive file at `path`, creating parent directories.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let file = File::create(path).map_err(|e| Self::failed(path, e))?;
        Ok(Self { writer: zip::ZipWriter::new(file), path: path.to_path_buf() })
    }

    fn options() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
    }

    fn failed(path: &Path, reason: impl ToString) -> BlocksmithError {
        BlocksmithError::ArchiveFailed {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Add a single file as `dest` (forward-slash path inside the archive).
    pub fn add_file(&mut self, source: &Path, dest: &str) -> Result<()> {
        self.writer
            .start_file(dest, Self::options())
            .map_err(|e| Self::failed(&self.path, e))?;
        let mut file = File::open(source).map_err(|e| Self::failed(&self.path, e))?;
        io::copy(&mut file, &mut self.writer).map_err(|e| Self::failed(&self.path, e))?;
        Ok(())
    }

    /// Add file bytes directly as `dest`.
    pub fn add_bytes(&mut self, content: &[u8], dest: &str) -> Result<()> {
        self.writer
            .start_file(dest, Self::options())
            .map_err(|e| Self::failed(&self.path, e))?;
        self.writer.write_all(content).map_err(|e| Self::failed(&self.path, e))?;
        Ok(())
    }

    /// Add a directory tree rooted at `source` under `dest`.
    ///
    /// Entries are walked in sorted order so archives are deterministic for
    /// identical inputs.
    pub fn add_directory(&mut self, source: &Path, dest: &str) -> Result<()> {
        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry.map_err(|e| Self::failed(&self.path, e))?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|e| Self::failed(&self.path, e))?;
            if relative.as_os_str().is_empty() {
                continue;
            }
            let archived = archive_path(dest, relative);
            if entry.file_type().is_dir() {
                self.writer
                    .add_directory(archived, Self::options())
                    .map_err(|e| Self::failed(&self.path, e))?;
            } else if entry.file_type().is_file() {
                self.add_file(entry.path(), &archived)?;
            }
        }
        Ok(())
    }

    /// Write the central directory and return the archive size in bytes.
    pub fn finalize(self) -> Result<u64> {
        let path = self.path;
        let file = self.writer.finish().map_err(|e| {
            anyhow::Error::from(BlocksmithError::ArchiveFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        })?;
        let metadata = file.metadata().map_err(|e| Self::failed(&path, e))?;
        Ok(metadata.len())
    }
}

/// Join `dest` and a relative path with forward slashes (the zip separator),
/// regardless of platform.
fn archive_path(dest: &str, relative: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !dest.is_empty() {
        parts.push(dest.trim_matches('/').to_string());
    }
    for component in relative.components() {
        parts.push(component.as_os_str().to_string_lossy().to_string());
    }
    parts.join("/")
}
