//! Main sync command: a bounded run of reconciliation passes

use crate::hash::{FirstFileDigest, NoProbe, SourceProbe};
use crate::reconcile::TreeReconciler;
use crate::types::{EventSink, PassStats, SyncError, SyncEvent};
use crate::Config;
use std::thread;

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Passes that walked the tree
    pub passes_run: u32,
    /// Passes skipped because the source root was missing
    pub passes_skipped: u32,
    /// Counters summed over every pass that ran
    pub totals: PassStats,
}

/// Runs `config.count` passes with `config.interval` between them
pub struct SyncDriver<'a> {
    config: &'a Config,
    sink: &'a dyn EventSink,
    probe: &'a dyn SourceProbe,
}

impl<'a> SyncDriver<'a> {
    /// Create a driver; the source fingerprint follows `config.fingerprint`
    pub fn new(config: &'a Config, sink: &'a dyn EventSink) -> Self {
        let probe: &'a dyn SourceProbe = if config.fingerprint {
            &FirstFileDigest
        } else {
            &NoProbe
        };
        Self {
            config,
            sink,
            probe,
        }
    }

    /// Replace the pre-pass fingerprint hook
    pub fn with_probe(mut self, probe: &'a dyn SourceProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Run every pass, sleeping between them
    ///
    /// Never fails: entry-local errors are reported through the sink and a
    /// missing source root only skips that pass.
    pub fn run(&self) -> RunSummary {
        let mut summary = RunSummary::default();

        for number in 1..=self.config.count {
            match self.run_pass(number) {
                Some(stats) => {
                    summary.passes_run += 1;
                    summary.totals += &stats;
                }
                None => summary.passes_skipped += 1,
            }

            if number < self.config.count {
                self.sink.emit(&SyncEvent::Waiting {
                    interval: self.config.interval,
                });
                thread::sleep(self.config.interval);
            }
        }

        summary
    }

    /// One pass; `None` when the source root is missing
    pub fn run_pass(&self, number: u32) -> Option<PassStats> {
        if !self.config.source.exists() {
            let error = SyncError::SourceMissing(self.config.source.clone());
            self.sink
                .emit(&SyncEvent::SourceMissing { number, error: &error });
            return None;
        }

        self.probe.probe(&self.config.source, self.sink);
        self.sink.emit(&SyncEvent::PassStarted { number });

        let mut reconciler = TreeReconciler::new(self.sink, self.config.max_depth);
        reconciler.sync_directories(&self.config.source, &self.config.destination);
        let stats = reconciler.finish();

        self.sink.emit(&SyncEvent::PassFinished {
            number,
            stats: &stats,
        });
        Some(stats)
    }
}

/// Run the sync operation
pub fn run(config: &Config, sink: &dyn EventSink) -> RunSummary {
    SyncDriver::new(config, sink).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NullSink;
    use std::cell::{Cell, RefCell};
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    fn config_for(source: &Path, destination: &Path, count: u32) -> Config {
        Config {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            count,
            interval: Duration::ZERO,
            ..Config::default()
        }
    }

    struct CountingProbe(Cell<u32>);

    impl SourceProbe for CountingProbe {
        fn probe(&self, _source_root: &Path, _sink: &dyn EventSink) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_event_sequence_for_two_passes() {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");
        fs::write(src.path().join("a.txt"), b"X").expect("write src file");
        let mut config = config_for(src.path(), dst.path(), 2);
        config.fingerprint = false;

        let labels = RefCell::new(Vec::new());
        let sink = |event: &SyncEvent<'_>| labels.borrow_mut().push(event.label());

        let summary = run(&config, &sink);

        assert_eq!(summary.passes_run, 2);
        assert_eq!(summary.passes_skipped, 0);
        assert_eq!(summary.totals.files_copied, 1);
        assert_eq!(summary.totals.files_unchanged, 1);
        assert_eq!(
            *labels.borrow(),
            vec![
                "pass-started",
                "file-copied",
                "pass-finished",
                "waiting",
                "pass-started",
                "pass-finished",
            ]
        );
    }

    #[test]
    fn test_missing_source_skips_every_pass() {
        let dst = TempDir::new().expect("create dst tempdir");
        fs::write(dst.path().join("keep.txt"), b"k").expect("write dst file");
        let config = config_for(&dst.path().join("absent"), &dst.path().join("mirror"), 3);

        let summary = run(&config, &NullSink);

        assert_eq!(summary.passes_run, 0);
        assert_eq!(summary.passes_skipped, 3);
        assert!(!dst.path().join("mirror").exists());
        assert!(dst.path().join("keep.txt").exists());
    }

    #[test]
    fn test_probe_runs_once_per_walked_pass() {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");
        let config = config_for(src.path(), dst.path(), 3);
        let probe = CountingProbe(Cell::new(0));

        SyncDriver::new(&config, &NullSink).with_probe(&probe).run();

        assert_eq!(probe.0.get(), 3);
    }

    #[test]
    fn test_no_wait_after_last_pass() {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");
        let config = config_for(src.path(), dst.path(), 1);

        let waits = Cell::new(0);
        let sink = |event: &SyncEvent<'_>| {
            if matches!(event, SyncEvent::Waiting { .. }) {
                waits.set(waits.get() + 1);
            }
        };

        run(&config, &sink);
        assert_eq!(waits.get(), 0);
    }
}
