//! File writer for outputting generated declarations.
//!
//! This module handles writing generated TypeScript files to disk,
//! with support for dry-run mode, and comparing a fresh generation with
//! the files already on disk.

use crate::error::{CliResult, WriteError};
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use tsdecl::OutputFile;

/// Result of a write operation.
#[derive(Debug)]
pub enum WriteResult {
    /// File was written successfully.
    Written {
        /// Path to the written file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// Dry run - content was not written.
    DryRun {
        /// Content that would have been written.
        content: String,
        /// Path where content would have been written.
        path: PathBuf,
    },
}

/// A generated file whose on-disk copy is out of date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift {
    /// The file does not exist.
    Missing(PathBuf),
    /// The file exists with different content.
    Changed(PathBuf),
}

impl Drift {
    pub fn path(&self) -> &Path {
        match self {
            Drift::Missing(path) | Drift::Changed(path) => path,
        }
    }
}

/// File writer with dry-run support.
#[derive(Debug)]
pub struct FileWriter {
    /// Whether to run in dry-run mode.
    dry_run: bool,
}

impl FileWriter {
    /// Create a new file writer.
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write content to a file.
    ///
    /// In dry-run mode, returns the content without writing.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: content.to_string(),
                path: path.to_path_buf(),
            });
        }

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(path, content).map_err(|e| WriteError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "wrote file");

        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }

    /// Write every generated file below `out_dir`.
    ///
    /// All paths are validated before the first file is written.
    pub fn write_all(&self, out_dir: &Path, files: &[OutputFile]) -> CliResult<Vec<WriteResult>> {
        let targets = files
            .iter()
            .map(|file| output_path(out_dir, &file.path).map(|path| (path, file)))
            .collect::<Result<Vec<_>, _>>()?;

        targets
            .into_iter()
            .map(|(path, file)| self.write(&path, &file.source))
            .collect()
    }

    /// Check if running in dry-run mode.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl WriteResult {
    /// Get the path associated with this result.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } => path,
            WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Check if the write was successful (not dry-run).
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Get the number of bytes written (0 for dry-run).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            WriteResult::DryRun { .. } => 0,
        }
    }
}

/// Compare generated files with their copies below `out_dir`.
pub fn find_drift(out_dir: &Path, files: &[OutputFile]) -> CliResult<Vec<Drift>> {
    let mut drift = Vec::new();
    for file in files {
        let path = output_path(out_dir, &file.path)?;
        match std::fs::read_to_string(&path) {
            Ok(existing) if existing == file.source => {}
            Ok(_) => drift.push(Drift::Changed(path)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => drift.push(Drift::Missing(path)),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(drift)
}

/// Join a generated relative path onto `out_dir`.
fn output_path(out_dir: &Path, relative: &str) -> Result<PathBuf, WriteError> {
    let relative_path = Path::new(relative);
    let escapes = relative_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if relative.is_empty() || escapes {
        return Err(WriteError::OutsideOutputDir {
            path: relative.to_string(),
        });
    }
    Ok(out_dir.join(relative_path))
}
