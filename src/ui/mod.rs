//! User-facing output

mod log;

pub use log::{init_logging, TracingSink};
