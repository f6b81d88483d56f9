//! SyncEvent - What the reconcilers report while they work

use super::{PassStats, SyncError};
use std::path::Path;
use std::time::Duration;

/// How a single file copy was materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Content, modification time and permission bits
    WithMetadata,
    /// Content only (degraded fallback)
    ContentOnly,
}

/// Events emitted during a run.
///
/// Borrowed data only: sinks that need to keep anything must copy it out.
#[derive(Debug)]
pub enum SyncEvent<'a> {
    /// A pass is about to walk the source tree.
    PassStarted { number: u32 },
    /// A pass finished walking (entry failures included in `stats`).
    PassFinished { number: u32, stats: &'a PassStats },
    /// Source root was missing; the pass was skipped.
    SourceMissing { number: u32, error: &'a SyncError },
    /// Sleeping before the next pass.
    Waiting { interval: Duration },
    /// Diagnostic digest of one source file.
    Fingerprint { path: &'a Path, digest: &'a str },
    /// Diagnostic digest could not be computed.
    FingerprintFailed { path: &'a Path, error: &'a SyncError },
    /// A destination directory was created.
    DirectoryCreated { path: &'a Path },
    /// A file was written to the destination.
    FileCopied {
        src: &'a Path,
        dst: &'a Path,
        bytes: u64,
        mode: CopyMode,
    },
    /// The metadata-preserving copy failed; falling back to content only.
    MetadataCopyFailed { src: &'a Path, error: &'a SyncError },
    /// A stale destination file was removed before re-copy.
    StaleFileRemoved { path: &'a Path },
    /// A destination file with no source counterpart was removed.
    ExtraFileRemoved { path: &'a Path },
    /// A destination directory with no source counterpart was removed.
    ExtraDirectoryRemoved { path: &'a Path },
    /// A source entry of an unsupported kind was not mirrored.
    EntrySkipped { path: &'a Path, reason: &'static str },
    /// An entry-local operation failed; the walk continues.
    EntryFailed { path: &'a Path, error: &'a SyncError },
}

impl SyncEvent<'_> {
    /// Short stable name, used by tests and summaries
    pub fn label(&self) -> &'static str {
        match self {
            SyncEvent::PassStarted { .. } => "pass-started",
            SyncEvent::PassFinished { .. } => "pass-finished",
            SyncEvent::SourceMissing { .. } => "source-missing",
            SyncEvent::Waiting { .. } => "waiting",
            SyncEvent::Fingerprint { .. } => "fingerprint",
            SyncEvent::FingerprintFailed { .. } => "fingerprint-failed",
            SyncEvent::DirectoryCreated { .. } => "dir-created",
            SyncEvent::FileCopied { .. } => "file-copied",
            SyncEvent::MetadataCopyFailed { .. } => "metadata-copy-failed",
            SyncEvent::StaleFileRemoved { .. } => "stale-removed",
            SyncEvent::ExtraFileRemoved { .. } => "extra-file-removed",
            SyncEvent::ExtraDirectoryRemoved { .. } => "extra-dir-removed",
            SyncEvent::EntrySkipped { .. } => "entry-skipped",
            SyncEvent::EntryFailed { .. } => "entry-failed",
        }
    }

    /// Whether this event reports a failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            SyncEvent::SourceMissing { .. }
                | SyncEvent::FingerprintFailed { .. }
                | SyncEvent::MetadataCopyFailed { .. }
                | SyncEvent::EntryFailed { .. }
        )
    }
}

/// Receiver for [`SyncEvent`]s, injected into every component.
pub trait EventSink {
    fn emit(&self, event: &SyncEvent<'_>);
}

impl<F> EventSink for F
where
    F: Fn(&SyncEvent<'_>),
{
    fn emit(&self, event: &SyncEvent<'_>) {
        self(event)
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &SyncEvent<'_>) {}
}
