//! Error types for prompt generation.

use std::path::PathBuf;

use serde::Serialize;
use stencil_validate::ValidationError;
use thiserror::Error;

/// Result type alias for prompt operations.
pub type PromptResult<T> = Result<T, PromptError>;

/// Environment failures while reading templates or writing output.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("Template not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Parent directory does not exist: {}", .0.display())]
    ParentMissing(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path),
            _ => FsError::ReadFailed { path, source },
        }
    }

    /// Classify an I/O error raised while writing `path`.
    pub fn from_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path),
            _ => FsError::WriteFailed { path, source },
        }
    }
}

/// Which side of the fence a failure falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller's input is wrong ("fix my input").
    Validation,
    /// The environment is wrong ("check my environment").
    FileSystem,
}

/// Errors that can occur while generating a prompt.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("File system error: {0}")]
    FileSystem(#[from] FsError),
}

impl PromptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PromptError::Validation(_) => ErrorKind::Validation,
            PromptError::FileSystem(_) => ErrorKind::FileSystem,
        }
    }
}
