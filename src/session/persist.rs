// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Persistence backends for the session record.
//!
//! The record is stored as raw JSON; parsing (and corrupt-record recovery)
//! happens in the session service so a backend stays a dumb byte store.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::SESSION_STORAGE_KEY;

/// Error type for session persistence.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Byte store for the single session record.
pub trait SessionBackend: Send + Sync {
    /// Load the persisted record, or `None` when absent.
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Replace the persisted record.
    fn save(&self, record: &str) -> Result<(), SessionError>;

    /// Remove the persisted record. Removing an absent record is not an
    /// error.
    fn clear(&self) -> Result<(), SessionError>;
}

/// File-backed session record.
///
/// Writes go to a temp file first and are renamed into place, so a reader
/// never observes a partially written record.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Store the record as `<dir>/userInfo.json`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_STORAGE_KEY}.json")),
        }
    }

    /// Resolve the directory from the `DATA_DIR` environment variable,
    /// falling back to the current directory.
    pub fn from_env() -> Self {
        let dir = std::env::var(crate::config::DATA_DIR_ENV).unwrap_or_else(|_| ".".to_string());
        Self::new(dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionBackend for FileBackend {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, record: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(record.as_bytes())?;
            writer.flush()?;
        }
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory session record, for tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    record: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with a raw record, as if a previous run wrote it.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(record.into())),
        }
    }

    /// The raw record currently held, if any.
    pub fn raw(&self) -> Option<String> {
        self.record.lock().expect("backend lock poisoned").clone()
    }
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.raw())
    }

    fn save(&self, record: &str) -> Result<(), SessionError> {
        *self.record.lock().expect("backend lock poisoned") = Some(record.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.record.lock().expect("backend lock poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_backend_round_trips_record() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());

        assert!(backend.load().unwrap().is_none());

        backend.save(r#"{"role":"student"}"#).unwrap();
        assert_eq!(
            backend.load().unwrap().as_deref(),
            Some(r#"{"role":"student"}"#)
        );

        backend.clear().unwrap();
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn file_backend_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());
        backend.clear().unwrap();
        backend.clear().unwrap();
    }

    #[test]
    fn file_backend_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path().join("nested/sessions"));
        backend.save("{}").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn file_backend_uses_well_known_key() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());
        assert!(backend
            .path()
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with(SESSION_STORAGE_KEY));
    }

    #[test]
    fn memory_backend_round_trips_record() {
        let backend = MemoryBackend::new();
        backend.save("x").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("x"));
        backend.clear().unwrap();
        assert!(backend.load().unwrap().is_none());
    }
}
