//! Document reads, backups and atomic writes

use std::path::{Path, PathBuf};
use thiserror::Error;
use weekly_review_core::Document;

/// Suffix appended to the file name of a pre-write copy
pub const BACKUP_SUFFIX: &str = ".backup";

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to back up {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a weekly file as UTF-8
pub fn read_document(path: &Path) -> Result<Document, VaultError> {
    let text = std::fs::read_to_string(path).map_err(|source| VaultError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Document::new(path, text))
}

/// `<file>.backup` next to `path`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy `path` byte for byte to its backup path
pub fn create_backup(path: &Path) -> Result<PathBuf, VaultError> {
    let backup = backup_path(path);
    std::fs::copy(path, &backup).map_err(|source| VaultError::Backup {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(backup)
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), VaultError> {
    let wrap = |source| VaultError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut temp_name = path.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    std::fs::write(&temp_path, data).map_err(wrap)?;
    std::fs::rename(&temp_path, path).map_err(|source| {
        let _ = std::fs::remove_file(&temp_path);
        wrap(source)
    })?;
    Ok(())
}
