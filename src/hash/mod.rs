//! Hashing utilities and the per-pass source fingerprint hook
//!
//! The fingerprint is diagnostic only. Nothing in reconciliation reads it.

use crate::types::{EventSink, SyncError, SyncEvent};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compute the Blake3 hash of a file
///
/// The file is streamed in 64KB chunks.
///
/// # Example
/// ```no_run
/// use mirrorsync::hash::compute_hash;
/// use std::path::Path;
///
/// let hash = compute_hash(Path::new("file.txt"))?;
/// println!("{}", hash.to_hex());
/// # Ok::<(), mirrorsync::types::SyncError>(())
/// ```
pub fn compute_hash(file_path: &Path) -> Result<blake3::Hash, SyncError> {
    let mut file = File::open(file_path)?;

    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize())
}

/// Hook run against the source root before each pass
pub trait SourceProbe {
    fn probe(&self, source_root: &Path, sink: &dyn EventSink);
}

/// Hash whichever regular file the walker reaches first and report it
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFileDigest;

impl SourceProbe for FirstFileDigest {
    fn probe(&self, source_root: &Path, sink: &dyn EventSink) {
        let walker = ignore::WalkBuilder::new(source_root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        let first_file = walker
            .filter_map(Result::ok)
            .find(|entry| entry.file_type().is_some_and(|ft| ft.is_file()));

        let Some(entry) = first_file else {
            return;
        };

        match compute_hash(entry.path()) {
            Ok(hash) => sink.emit(&SyncEvent::Fingerprint {
                path: entry.path(),
                digest: hash.to_hex().as_str(),
            }),
            Err(error) => sink.emit(&SyncEvent::FingerprintFailed {
                path: entry.path(),
                error: &error,
            }),
        }
    }
}

/// Disabled fingerprinting
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl SourceProbe for NoProbe {
    fn probe(&self, _source_root: &Path, _sink: &dyn EventSink) {}
}
