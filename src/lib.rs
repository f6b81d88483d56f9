//! # mirrorsync - One-way, repeated directory mirroring
//!
//! Each pass walks the source tree, copies files whose destination is
//! missing or carries a different modification time, and prunes destination
//! entries the source no longer has. A failing entry is reported and
//! skipped; it never aborts the pass.

// Module declarations
pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod hash;
pub mod reconcile;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use commands::sync::{RunSummary, SyncDriver};
pub use config::Config;
pub use reconcile::TreeReconciler;
pub use types::{EventSink, PassStats, SyncError, SyncEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
