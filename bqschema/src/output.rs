//! Writing the generated file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// The generated file could not be written.
#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct FileWriteError {
    /// Path being written.
    pub path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    pub source: io::Error,
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// The content goes to a uniquely named temporary file in the target
/// directory and is persisted over `path`, so an existing file is either
/// kept or fully replaced. The temporary file is removed on failure.
///
/// # Errors
/// Returns `FileWriteError` naming the path that could not be created,
/// written or replaced.
pub fn write_output(path: &Path, content: &[u8]) -> Result<(), FileWriteError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !parent.exists() {
        tracing::debug!("Creating directory {}", parent.display());
        fs::create_dir_all(parent).map_err(|source| FileWriteError {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|source| FileWriteError {
        path: parent.to_path_buf(),
        source,
    })?;
    temp_file.write_all(content).map_err(|source| FileWriteError {
        path: temp_file.path().to_path_buf(),
        source,
    })?;

    temp_file.persist(path).map_err(|e| FileWriteError {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
