//! File comparison logic

use crate::types::SyncError;
use filetime::FileTime;
use std::fs;
use std::path::Path;

/// Decide whether the destination copy of a file must be replaced
///
/// Purely metadata-based: the destination is stale iff its last-modified
/// timestamp differs from the source's. Equality is exact to the
/// nanosecond; a filesystem that truncates timestamps will make every
/// pass re-copy the file. Sizes and content are not consulted.
///
/// # Arguments
/// * `src` - Source file path
/// * `dst` - Destination file path
///
/// # Returns
/// * `Ok(true)` - Timestamps differ, destination must be replaced
/// * `Ok(false)` - Timestamps equal, destination is left untouched
/// * `Err(SyncError::Metadata)` - Either side could not be stat'ed
///
/// # Example
/// ```no_run
/// use mirrorsync::diff::is_stale;
/// use std::path::Path;
///
/// if is_stale(Path::new("src/a.txt"), Path::new("dst/a.txt"))? {
///     println!("needs copy");
/// }
/// # Ok::<(), mirrorsync::types::SyncError>(())
/// ```
pub fn is_stale(src: &Path, dst: &Path) -> Result<bool, SyncError> {
    let src_mtime = modification_time(src)?;
    let dst_mtime = modification_time(dst)?;

    Ok(src_mtime != dst_mtime)
}

/// Last-modified timestamp of `path`, following symlinks
fn modification_time(path: &Path) -> Result<FileTime, SyncError> {
    let metadata = fs::metadata(path).map_err(|source| SyncError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(FileTime::from_last_modification_time(&metadata))
}
