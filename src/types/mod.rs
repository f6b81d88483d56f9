//! Core type definitions for mirrorsync

mod error;
mod event;
mod stats;

pub use error::SyncError;
pub use event::{CopyMode, EventSink, NullSink, SyncEvent};
pub use stats::PassStats;
