//! Recursive reconciliation of a destination tree against a source tree
//!
//! Neither tree is materialized: each directory is listed on demand, in
//! filesystem listing order (not sorted, so the order of side effects is
//! not deterministic across platforms). Every entry is handled
//! independently; a failure is reported through the sink, counted, and the
//! walk moves on to the next sibling.

mod prune;

use crate::executor::{sync_file, FileAction};
use crate::types::{CopyMode, EventSink, PassStats, SyncError, SyncEvent};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Default bound on directory nesting below the root
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Walks one source/destination directory pair per pass
pub struct TreeReconciler<'a> {
    sink: &'a dyn EventSink,
    max_depth: usize,
    stats: PassStats,
}

impl<'a> TreeReconciler<'a> {
    /// Create a reconciler reporting to `sink`
    pub fn new(sink: &'a dyn EventSink, max_depth: usize) -> Self {
        Self {
            sink,
            max_depth,
            stats: PassStats::default(),
        }
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> &PassStats {
        &self.stats
    }

    /// Consume the reconciler, returning its counters
    pub fn finish(self) -> PassStats {
        self.stats
    }

    /// Mirror `src_dir` onto `dst_dir`
    ///
    /// Creates `dst_dir` if needed, syncs every source entry (recursing into
    /// directories), then prunes destination entries the source lacks.
    pub fn sync_directories(&mut self, src_dir: &Path, dst_dir: &Path) {
        self.sync_at_depth(src_dir, dst_dir, 0);
    }

    /// Remove everything under `dst_dir` with no counterpart under `src_dir`
    pub fn remove_extra_items(&mut self, src_dir: &Path, dst_dir: &Path) {
        self.prune_at_depth(src_dir, dst_dir, 0, true);
    }

    fn sync_at_depth(&mut self, src_dir: &Path, dst_dir: &Path, depth: usize) {
        if depth > self.max_depth {
            self.fail(
                src_dir,
                SyncError::DepthLimit {
                    path: src_dir.to_path_buf(),
                    max_depth: self.max_depth,
                },
            );
            return;
        }

        if let Err(error) = self.ensure_directory(dst_dir) {
            self.fail(dst_dir, error);
            return;
        }

        let listing = match fs::read_dir(src_dir) {
            Ok(listing) => listing,
            Err(source) => {
                self.fail(
                    src_dir,
                    SyncError::ReadDir {
                        path: src_dir.to_path_buf(),
                        source,
                    },
                );
                return;
            }
        };

        for entry in listing {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    self.fail(
                        src_dir,
                        SyncError::ReadDir {
                            path: src_dir.to_path_buf(),
                            source,
                        },
                    );
                    continue;
                }
            };

            let src_path = entry.path();
            let dst_path = dst_dir.join(entry.file_name());

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(source) => {
                    self.fail(
                        &src_path,
                        SyncError::Metadata {
                            path: src_path.clone(),
                            source,
                        },
                    );
                    continue;
                }
            };

            if file_type.is_dir() {
                self.sync_at_depth(&src_path, &dst_path, depth + 1);
            } else if file_type.is_file() {
                match sync_file(dst_dir, &dst_path, &src_path, self.sink) {
                    Ok(action) => self.record(action),
                    Err(error) => self.fail(&dst_path, error),
                }
            } else {
                let reason = if file_type.is_symlink() {
                    "symbolic links are not mirrored"
                } else {
                    "special files are not mirrored"
                };
                self.stats.entries_skipped += 1;
                self.sink.emit(&SyncEvent::EntrySkipped {
                    path: &src_path,
                    reason,
                });
            }
        }

        self.prune_at_depth(src_dir, dst_dir, depth, false);
    }

    /// Create `dir` unless a directory is already there
    fn ensure_directory(&mut self, dir: &Path) -> Result<(), SyncError> {
        match fs::symlink_metadata(dir) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(SyncError::KindMismatch {
                path: dir.to_path_buf(),
                expected: "directory",
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(dir).map_err(|source| SyncError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
                self.stats.directories_created += 1;
                self.sink.emit(&SyncEvent::DirectoryCreated { path: dir });
                Ok(())
            }
            Err(source) => Err(SyncError::Metadata {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }

    fn record(&mut self, action: FileAction) {
        let outcome = match action {
            FileAction::Created(outcome) => {
                self.stats.files_copied += 1;
                outcome
            }
            FileAction::Updated(outcome) => {
                self.stats.files_updated += 1;
                outcome
            }
            FileAction::Unchanged => {
                self.stats.files_unchanged += 1;
                return;
            }
        };
        self.stats.bytes_copied += outcome.bytes;
        if outcome.mode == CopyMode::ContentOnly {
            self.stats.metadata_fallbacks += 1;
        }
    }

    /// Per-entry boundary: report, count, carry on
    fn fail(&mut self, path: &Path, error: SyncError) {
        self.stats.failures += 1;
        self.sink.emit(&SyncEvent::EntryFailed {
            path,
            error: &error,
        });
    }
}
