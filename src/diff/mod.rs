//! Staleness decisions between a source file and its destination copy

mod compare;

pub use compare::is_stale;
