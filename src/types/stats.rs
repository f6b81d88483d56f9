//! PassStats - Counters for one reconciliation pass

use std::ops::AddAssign;

/// Counters gathered while reconciling one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Destination directories created
    pub directories_created: usize,
    /// Files copied because the destination had none
    pub files_copied: usize,
    /// Stale destination files replaced
    pub files_updated: usize,
    /// Files whose timestamps already matched
    pub files_unchanged: usize,
    /// Aggregate copied bytes (new + updated)
    pub bytes_copied: u64,
    /// Copies that fell back to content-only
    pub metadata_fallbacks: usize,
    /// Extra destination files removed
    pub files_removed: usize,
    /// Extra destination directories removed
    pub directories_removed: usize,
    /// Source entries of unsupported kinds
    pub entries_skipped: usize,
    /// Entry-local failures
    pub failures: usize,
}

impl PassStats {
    /// Number of filesystem mutations performed
    pub fn changes(&self) -> usize {
        self.directories_created
            + self.files_copied
            + self.files_updated
            + self.files_removed
            + self.directories_removed
    }

    /// True when the pass hit no entry-local failure
    pub fn is_clean(&self) -> bool {
        self.failures == 0
    }
}

impl AddAssign<&PassStats> for PassStats {
    fn add_assign(&mut self, other: &PassStats) {
        self.directories_created += other.directories_created;
        self.files_copied += other.files_copied;
        self.files_updated += other.files_updated;
        self.files_unchanged += other.files_unchanged;
        self.bytes_copied += other.bytes_copied;
        self.metadata_fallbacks += other.metadata_fallbacks;
        self.files_removed += other.files_removed;
        self.directories_removed += other.directories_removed;
        self.entries_skipped += other.entries_skipped;
        self.failures += other.failures;
    }
}
