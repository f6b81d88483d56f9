//! Log output: tracing subscriber setup and the event-to-log sink

use crate::types::{CopyMode, EventSink, PassStats, SyncError, SyncEvent};
use indicatif::HumanBytes;
use std::fmt;
use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Local wall-clock timestamps, `2024-05-01 13:45:02,123`
struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"))
    }
}

/// Install the process-wide subscriber: log file (truncated) + stdout
///
/// Uses `RUST_LOG` when set, `info` otherwise. Call once, from the binary;
/// library code only ever talks to an [`EventSink`].
pub fn init_logging(log_file: &Path) -> Result<(), SyncError> {
    let file = File::create(log_file).map_err(|e| {
        SyncError::Logging(format!("Cannot create log file {}: {}", log_file.display(), e))
    })?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(LocalTimestamp);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(false)
        .with_timer(LocalTimestamp);

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| SyncError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| SyncError::Logging(e.to_string()))
}

/// Production sink: every event becomes one `tracing` record
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &SyncEvent<'_>) {
        if event.is_error() {
            log_failure(event)
        } else {
            log_progress(event)
        }
    }
}

fn log_progress(event: &SyncEvent<'_>) {
    match event {
        SyncEvent::PassStarted { number } => {
            info!("--- Synchronization {} started ---", number)
        }
        SyncEvent::PassFinished { number, stats } => {
            info!("--- Synchronization {} finished ---", number);
            info!("{}", summarize(stats));
        }
        SyncEvent::Waiting { interval } => {
            info!(
                "Waiting {} seconds before next sync",
                interval.as_secs_f64()
            )
        }
        SyncEvent::Fingerprint { path, digest } => {
            info!("BLAKE3 of first file found ({}): {}", path.display(), digest)
        }
        SyncEvent::DirectoryCreated { path } => {
            info!("Created directory: {}", path.display())
        }
        SyncEvent::FileCopied { src, mode, .. } => match mode {
            CopyMode::WithMetadata => {
                info!("File copied with metadata: {}", src.display())
            }
            CopyMode::ContentOnly => {
                info!("File copied without metadata: {}", src.display())
            }
        },
        SyncEvent::StaleFileRemoved { path } => {
            info!("Removed outdated file: {}", path.display())
        }
        SyncEvent::ExtraFileRemoved { path } => {
            info!("Removed extra file: {}", path.display())
        }
        SyncEvent::ExtraDirectoryRemoved { path } => {
            info!("Removed extra directory: {}", path.display())
        }
        SyncEvent::EntrySkipped { path, reason } => {
            warn!("Skipped {}: {}", path.display(), reason)
        }
        SyncEvent::SourceMissing { .. }
        | SyncEvent::FingerprintFailed { .. }
        | SyncEvent::MetadataCopyFailed { .. }
        | SyncEvent::EntryFailed { .. } => log_failure(event),
    }
}

/// ERROR records, with a hint when the OS refused access
fn log_failure(event: &SyncEvent<'_>) {
    match event {
        SyncEvent::SourceMissing { error, .. } => error!("{}", error),
        SyncEvent::FingerprintFailed { path, error } => {
            error!("Failed to calculate BLAKE3 for {}: {}", path.display(), error)
        }
        SyncEvent::MetadataCopyFailed { src, error } => {
            error!("Failed to copy with metadata {}: {}", src.display(), error)
        }
        SyncEvent::EntryFailed { path, error } if error.is_permission_error() => {
            error!(
                "Failed to sync {}: {} (check permissions on both trees)",
                path.display(),
                error
            )
        }
        SyncEvent::EntryFailed { path, error } => {
            error!("Failed to sync {}: {}", path.display(), error)
        }
        other => error!("{}", other.label()),
    }
}

fn summarize(stats: &PassStats) -> String {
    format!(
        "Copied: {}  Updated: {}  Unchanged: {}  Removed: {} file(s), {} dir(s)  Created dirs: {}  Skipped: {}  Failures: {}  Transferred: {}",
        stats.files_copied,
        stats.files_updated,
        stats.files_unchanged,
        stats.files_removed,
        stats.directories_removed,
        stats.directories_created,
        stats.entries_skipped,
        stats.failures,
        HumanBytes(stats.bytes_copied)
    )
}
