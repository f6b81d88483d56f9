use clap::Parser;
use mirrorsync::config::Cli;
use mirrorsync::ui::{init_logging, TracingSink};
use mirrorsync::{Config, SyncDriver};

fn main() -> anyhow::Result<()> {
    // Wrong argument count exits here with a usage error
    let cli = Cli::parse();

    let config = Config::try_from(cli)?;
    init_logging(&config.log_file)?;

    tracing::info!(
        "mirrorsync v{}: {} -> {}, every {} seconds, {} pass(es), log {}",
        mirrorsync::VERSION,
        config.source.display(),
        config.destination.display(),
        config.interval.as_secs_f64(),
        config.count,
        config.log_file.display()
    );

    let summary = SyncDriver::new(&config, &TracingSink).run();

    tracing::info!(
        "Run complete: {} pass(es) run, {} skipped, {} failure(s)",
        summary.passes_run,
        summary.passes_skipped,
        summary.totals.failures
    );

    Ok(())
}
