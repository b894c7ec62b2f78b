//! File IO at the edge of the editor.
//!
//! Everything goes through the [`Storage`] trait so workspace flows can be
//! tested against an in-memory store. [`FsStorage`] is the real filesystem.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait Storage {
    /// File contents split into lines (no terminators).
    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StorageError>;
    fn write_text(&self, path: &Path, text: &str) -> Result<(), StorageError>;
    /// Absolute form of `path`, used as the saved-place key.
    fn absolute(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StorageError> {
        let content = std::fs::read_to_string(path).map_err(|source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(content.lines().map(str::to_string).collect())
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), StorageError> {
        std::fs::write(path, text).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Result of attempting to open a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenFileResult {
    Opened { lines: Vec<String> },
    /// Display message for the user.
    Error(String),
}

pub fn open_file(storage: &dyn Storage, path: &Path) -> OpenFileResult {
    match storage.read_lines(path) {
        Ok(lines) => {
            tracing::info!(target: "io", path = %path.display(), lines = lines.len(), "file_opened");
            OpenFileResult::Opened { lines }
        }
        Err(e) => {
            tracing::error!(target: "io", ?e, "file_open_error");
            OpenFileResult::Error(e.to_string())
        }
    }
}

/// Result of a write attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteFileResult {
    Written,
    NoFilename,
    Error(String),
}

pub fn write_file(storage: &dyn Storage, target: Option<&Path>, text: &str) -> WriteFileResult {
    let Some(path) = target else {
        return WriteFileResult::NoFilename;
    };
    match storage.write_text(path, text) {
        Ok(()) => {
            tracing::info!(target: "io", path = %path.display(), bytes = text.len(), "file_written");
            WriteFileResult::Written
        }
        Err(e) => {
            tracing::error!(target: "io", ?e, "file_write_error");
            WriteFileResult::Error(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn write_then_open_round_trips_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        assert_eq!(
            write_file(&FsStorage, Some(&path), "one\n\ttwo\nthree"),
            WriteFileResult::Written
        );
        assert_eq!(
            open_file(&FsStorage, &path),
            OpenFileResult::Opened {
                lines: vec!["one".into(), "\ttwo".into(), "three".into()]
            }
        );
    }

    #[test]
    fn crlf_terminators_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dos.txt");
        std::fs::write(&path, "a\r\nb\r\n").unwrap();
        assert_eq!(
            FsStorage.read_lines(&path).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn missing_file_reports_error_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        match open_file(&FsStorage, &path) {
            OpenFileResult::Error(msg) => assert!(msg.contains("absent.txt"), "{msg}"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn write_without_target_needs_a_name() {
        assert_eq!(write_file(&FsStorage, None, "x"), WriteFileResult::NoFilename);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/file.txt");
        assert!(matches!(
            write_file(&FsStorage, Some(&path), "x"),
            WriteFileResult::Error(_)
        ));
    }
}
