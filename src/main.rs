use clap::Parser;
use console::style;
use homesync::commands::sync::{run, suggestion_for};
use homesync::config::Cli;
use homesync::Config;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = try_main(cli) {
        eprintln!("{} {}", style("ERROR").red().bold(), err);
        if let Some(hint) = err
            .downcast_ref::<homesync::SyncError>()
            .and_then(suggestion_for)
        {
            eprintln!("  Try: {}", hint);
        }
        std::process::exit(1);
    }
}

fn try_main(cli: Cli) -> anyhow::Result<()> {
    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;
    run(&config)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
