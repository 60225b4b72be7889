//! Resume token persistence
//!
//! A single opaque token in a plain file, written after a successful save and
//! removed after a successful submit.

use crate::config::project_dirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Resume token storage failed: {0}")]
    Io(#[from] io::Error),

    #[error("No data directory available for the resume token")]
    NoDataDir,
}

/// File-backed resume token store
#[derive(Debug, Clone)]
pub struct ResumeStore {
    path: PathBuf,
}

impl ResumeStore {
    /// Store backed by the file at `path`
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the user's data directory
    pub fn default_location() -> Result<Self, StorageError> {
        project_dirs()
            .map(|dirs| Self::at(dirs.data_dir().join("resume")))
            .ok_or(StorageError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored token; a missing or blank file means none
    pub fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn store(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        tracing::debug!(path = %self.path.display(), "Stored resume token");
        Ok(())
    }

    /// Remove the token; clearing an absent token succeeds
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Cleared resume token");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
