//! Error types for mirrorsync

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error types for mirrorsync operations
///
/// Filesystem variants carry the offending path so a single log line is
/// enough to locate the problem.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error without path context
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata (stat) could not be read
    #[error("Cannot read metadata of {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory listing failed
    #[error("Cannot list directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory creation failed
    #[error("Cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File or directory removal failed
    #[error("Cannot remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Both the metadata-preserving copy and the content-only fallback failed
    #[error(
        "Copy failed for {} -> {}: {source} (metadata-preserving attempt: {metadata_error})",
        src.display(),
        dst.display()
    )]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        metadata_error: std::io::Error,
        #[source]
        source: std::io::Error,
    },

    /// Source and destination disagree on entry kind (file vs directory)
    #[error("Kind mismatch at {}: source is a {expected}, destination is not", path.display())]
    KindMismatch { path: PathBuf, expected: &'static str },

    /// Directory nesting exceeds the configured maximum depth
    #[error("Maximum depth {max_depth} exceeded at {}", path.display())]
    DepthLimit { path: PathBuf, max_depth: usize },

    /// Source root is missing at pass start
    #[error("Source folder does not exist - {}", .0.display())]
    SourceMissing(PathBuf),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging could not be initialised
    #[error("Logging error: {0}")]
    Logging(String),
}

impl SyncError {
    /// Path the error is about, if it has one
    pub fn path(&self) -> Option<&Path> {
        match self {
            SyncError::Metadata { path, .. }
            | SyncError::ReadDir { path, .. }
            | SyncError::CreateDir { path, .. }
            | SyncError::Remove { path, .. }
            | SyncError::KindMismatch { path, .. }
            | SyncError::DepthLimit { path, .. } => Some(path),
            SyncError::Copy { src, .. } => Some(src),
            SyncError::SourceMissing(path) => Some(path),
            SyncError::Io(_) | SyncError::Config(_) | SyncError::Logging(_) => None,
        }
    }

    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        self.io_kind() == Some(ErrorKind::PermissionDenied)
    }

    /// Check if the entry vanished (or never existed)
    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(ErrorKind::NotFound)
    }

    fn io_kind(&self) -> Option<ErrorKind> {
        match self {
            SyncError::Io(source)
            | SyncError::Metadata { source, .. }
            | SyncError::ReadDir { source, .. }
            | SyncError::CreateDir { source, .. }
            | SyncError::Remove { source, .. }
            | SyncError::Copy { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}
