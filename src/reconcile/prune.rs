//! Removal of destination entries that have no source counterpart

use super::TreeReconciler;
use crate::types::{SyncError, SyncEvent};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

impl TreeReconciler<'_> {
    /// Prune `dst_dir` against `src_dir`
    ///
    /// - Source path missing, destination is a directory: empty it with the
    ///   same logic (every child is extra), then remove it.
    /// - Source path missing, destination is anything else: remove it as a
    ///   file (symlinks are not followed).
    /// - Both sides are directories: descend without deleting, to catch
    ///   nested extras, only when `descend_shared` is set. The sync walk
    ///   prunes each shared directory on its own visit and passes `false`.
    pub(super) fn prune_at_depth(
        &mut self,
        src_dir: &Path,
        dst_dir: &Path,
        depth: usize,
        descend_shared: bool,
    ) {
        if depth > self.max_depth {
            self.fail(
                dst_dir,
                SyncError::DepthLimit {
                    path: dst_dir.to_path_buf(),
                    max_depth: self.max_depth,
                },
            );
            return;
        }

        let listing = match fs::read_dir(dst_dir) {
            Ok(listing) => listing,
            Err(source) => {
                self.fail(
                    dst_dir,
                    SyncError::ReadDir {
                        path: dst_dir.to_path_buf(),
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
                        dst_dir,
                        SyncError::ReadDir {
                            path: dst_dir.to_path_buf(),
                            source,
                        },
                    );
                    continue;
                }
            };

            let dst_path = entry.path();
            let src_path = src_dir.join(entry.file_name());

            let dst_is_dir = match entry.file_type() {
                Ok(file_type) => file_type.is_dir(),
                Err(source) => {
                    self.fail(
                        &dst_path,
                        SyncError::Metadata {
                            path: dst_path.clone(),
                            source,
                        },
                    );
                    continue;
                }
            };

            let src_is_dir = match fs::symlink_metadata(&src_path) {
                Ok(metadata) => Some(metadata.is_dir()),
                Err(e) if e.kind() == ErrorKind::NotFound => None,
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

            match (src_is_dir, dst_is_dir) {
                (None, true) => self.remove_extra_directory(&src_path, &dst_path, depth),
                (None, false) => self.remove_extra_file(&dst_path),
                (Some(true), true) if descend_shared => {
                    self.prune_at_depth(&src_path, &dst_path, depth + 1, true)
                }
                (Some(_), _) => {}
            }
        }
    }

    fn remove_extra_directory(&mut self, src_path: &Path, dst_path: &Path, depth: usize) {
        let failures_before = self.stats.failures;
        // Nothing under a missing source path is shared
        self.prune_at_depth(src_path, dst_path, depth + 1, true);
        if self.stats.failures > failures_before {
            // Something inside could not be removed; rmdir would only fail again
            return;
        }

        match fs::remove_dir(dst_path) {
            Ok(()) => {
                self.stats.directories_removed += 1;
                self.sink
                    .emit(&SyncEvent::ExtraDirectoryRemoved { path: dst_path });
            }
            Err(source) => self.fail(
                dst_path,
                SyncError::Remove {
                    path: dst_path.to_path_buf(),
                    source,
                },
            ),
        }
    }

    fn remove_extra_file(&mut self, dst_path: &Path) {
        match fs::remove_file(dst_path) {
            Ok(()) => {
                self.stats.files_removed += 1;
                self.sink.emit(&SyncEvent::ExtraFileRemoved { path: dst_path });
            }
            Err(source) => self.fail(
                dst_path,
                SyncError::Remove {
                    path: dst_path.to_path_buf(),
                    source,
                },
            ),
        }
    }
}
