//! Configuration management

use crate::reconcile::DEFAULT_MAX_DEPTH;
use crate::types::SyncError;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Command-line arguments
///
/// Exactly five positionals; anything beyond them is a usage error.
#[derive(Debug, Parser)]
#[command(name = "mirrorsync", version, about = "Mirror a directory tree onto another, repeatedly")]
pub struct Cli {
    /// Directory to mirror from
    pub source: PathBuf,

    /// Directory to mirror into (created if missing)
    pub destination: PathBuf,

    /// Seconds to wait between passes (fractions allowed)
    pub interval: f64,

    /// Number of passes to run
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Log file (overwritten at start)
    pub log_file: PathBuf,

    /// Maximum directory nesting below the roots
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Skip the per-pass source fingerprint
    #[arg(long)]
    pub no_fingerprint: bool,
}

/// Global configuration for mirrorsync
#[derive(Debug, Clone)]
pub struct Config {
    /// Source directory
    pub source: PathBuf,

    /// Destination directory
    pub destination: PathBuf,

    /// Wait between passes
    pub interval: Duration,

    /// Number of passes
    pub count: u32,

    /// Log file path
    pub log_file: PathBuf,

    /// Maximum directory nesting below the roots
    pub max_depth: usize,

    /// Compute the diagnostic source fingerprint before each pass?
    pub fingerprint: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            interval: Duration::ZERO,
            count: 1,
            log_file: PathBuf::from("mirrorsync.log"),
            max_depth: DEFAULT_MAX_DEPTH,
            fingerprint: true,
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let config = Config {
            source: cli.source,
            destination: cli.destination,
            interval: parse_interval(cli.interval)?,
            count: cli.count,
            log_file: cli.log_file,
            max_depth: cli.max_depth,
            fingerprint: !cli.no_fingerprint,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Validate configuration
    ///
    /// A missing source is deliberately accepted: it only skips passes.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.count == 0 {
            return Err(SyncError::Config(
                "Pass count must be a positive integer".to_string(),
            ));
        }

        if self.max_depth == 0 {
            return Err(SyncError::Config(
                "Maximum depth must be at least 1".to_string(),
            ));
        }

        if self.source == self.destination {
            return Err(SyncError::Config(
                "Source and destination cannot be the same".to_string(),
            ));
        }

        if is_nested(&self.source, &self.destination) {
            return Err(SyncError::Config(format!(
                "Destination {:?} lies inside source {:?}",
                self.destination, self.source
            )));
        }

        // Pruning the destination would delete the source itself
        if is_nested(&self.destination, &self.source) {
            return Err(SyncError::Config(format!(
                "Source {:?} lies inside destination {:?}",
                self.source, self.destination
            )));
        }

        Ok(())
    }
}

fn parse_interval(seconds: f64) -> Result<Duration, SyncError> {
    Duration::try_from_secs_f64(seconds).map_err(|_| {
        SyncError::Config(format!(
            "Interval must be a non-negative number of seconds, got {seconds}"
        ))
    })
}

/// True if `inner` is `outer` or below it, comparing canonical paths when
/// both exist and lexical paths otherwise
fn is_nested(outer: &Path, inner: &Path) -> bool {
    match (outer.canonicalize(), inner.canonicalize()) {
        (Ok(outer), Ok(inner)) => inner.starts_with(outer),
        _ => inner.starts_with(outer),
    }
}
