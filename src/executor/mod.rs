//! Executor module for file operations

pub mod copy;

use crate::diff::is_stale;
use crate::types::{EventSink, SyncError, SyncEvent};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub use copy::{copy_file, CopyOutcome};

/// What [`sync_file`] did with one source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Destination was missing and has been created
    Created(CopyOutcome),
    /// Destination was stale and has been replaced
    Updated(CopyOutcome),
    /// Timestamps matched; nothing was written
    Unchanged,
}

impl FileAction {
    /// Bytes written for this file
    pub fn bytes_copied(&self) -> u64 {
        match self {
            FileAction::Created(outcome) | FileAction::Updated(outcome) => outcome.bytes,
            FileAction::Unchanged => 0,
        }
    }
}

/// Bring one destination file in line with its source
///
/// - `dst` missing: copy `src` to `dst`.
/// - `dst` present and stale: remove it, then copy `src` into `dst_dir`
///   under the source's file name.
/// - `dst` present with the same timestamp: leave it alone.
///
/// A directory standing where the source has a file is reported as
/// `KindMismatch` and left in place.
///
/// Errors are returned, not swallowed: the tree walk is the per-entry
/// boundary that logs them and moves on.
pub fn sync_file(
    dst_dir: &Path,
    dst: &Path,
    src: &Path,
    sink: &dyn EventSink,
) -> Result<FileAction, SyncError> {
    let existing = match fs::symlink_metadata(dst) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return copy_file(src, dst, sink).map(FileAction::Created);
        }
        Err(source) => {
            return Err(SyncError::Metadata {
                path: dst.to_path_buf(),
                source,
            })
        }
    };

    if existing.is_dir() {
        return Err(SyncError::KindMismatch {
            path: dst.to_path_buf(),
            expected: "file",
        });
    }

    if !is_stale(src, dst)? {
        return Ok(FileAction::Unchanged);
    }

    fs::remove_file(dst).map_err(|source| SyncError::Remove {
        path: dst.to_path_buf(),
        source,
    })?;
    sink.emit(&SyncEvent::StaleFileRemoved { path: dst });

    let target = match src.file_name() {
        Some(name) => dst_dir.join(name),
        None => dst.to_path_buf(),
    };
    copy_file(src, &target, sink).map(FileAction::Updated)
}
