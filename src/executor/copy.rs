//! Single-file copy with metadata preservation and a content-only fallback

use crate::types::{CopyMode, EventSink, SyncError, SyncEvent};
use filetime::FileTime;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

/// Result of a successful [`copy_file`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Bytes written to the destination
    pub bytes: u64,
    /// Which copy path succeeded
    pub mode: CopyMode,
}

/// Copy `src` to `dst`, preserving metadata when possible
///
/// 1. Stream content, then apply the source's access/modification times and
///    permission bits.
/// 2. If any step fails, report `MetadataCopyFailed` and retry once with a
///    content-only copy.
/// 3. If the fallback fails too, return `SyncError::Copy` carrying both
///    causes. The caller decides whether that is fatal (it never is inside a
///    tree walk).
///
/// # Example
/// ```no_run
/// use mirrorsync::executor::copy_file;
/// use mirrorsync::types::NullSink;
/// use std::path::Path;
///
/// let outcome = copy_file(Path::new("source.txt"), Path::new("dest.txt"), &NullSink)?;
/// println!("{} bytes", outcome.bytes);
/// # Ok::<(), mirrorsync::types::SyncError>(())
/// ```
pub fn copy_file(src: &Path, dst: &Path, sink: &dyn EventSink) -> Result<CopyOutcome, SyncError> {
    copy_file_with(src, dst, sink, copy_with_metadata)
}

/// Copy with an explicit metadata-preserving step; content-only is the fallback
fn copy_file_with(
    src: &Path,
    dst: &Path,
    sink: &dyn EventSink,
    metadata_step: fn(&Path, &Path) -> io::Result<u64>,
) -> Result<CopyOutcome, SyncError> {
    let outcome = match metadata_step(src, dst) {
        Ok(bytes) => CopyOutcome {
            bytes,
            mode: CopyMode::WithMetadata,
        },
        Err(metadata_error) => {
            sink.emit(&SyncEvent::MetadataCopyFailed {
                src,
                error: &SyncError::Io(clone_io_error(&metadata_error)),
            });

            let bytes = copy_content_only(src, dst).map_err(|source| SyncError::Copy {
                src: src.to_path_buf(),
                dst: dst.to_path_buf(),
                metadata_error,
                source,
            })?;
            CopyOutcome {
                bytes,
                mode: CopyMode::ContentOnly,
            }
        }
    };

    sink.emit(&SyncEvent::FileCopied {
        src,
        dst,
        bytes: outcome.bytes,
        mode: outcome.mode,
    });
    Ok(outcome)
}

fn clone_io_error(error: &io::Error) -> io::Error {
    io::Error::new(error.kind(), error.to_string())
}

/// Content + mtime/atime + permission bits
fn copy_with_metadata(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_metadata = fs::metadata(src)?;
    let bytes = stream_contents(src, dst)?;

    // Times before permissions: a read-only mode must not block the utime call
    let atime = FileTime::from_last_access_time(&src_metadata);
    let mtime = FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_times(dst, atime, mtime)?;
    fs::set_permissions(dst, src_metadata.permissions())?;

    Ok(bytes)
}

/// Content only; destination gets fresh timestamps and default permissions
fn copy_content_only(src: &Path, dst: &Path) -> io::Result<u64> {
    stream_contents(src, dst)
}

fn stream_contents(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut src_file = File::open(src)?;
    let mut dst_file = File::create(dst)?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        dst_file.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    dst_file.flush()?;
    Ok(total_bytes)
}
