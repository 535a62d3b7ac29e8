use clap::Parser;
use tracing_subscriber::EnvFilter;

mod adapters;
mod aggregate;
mod cli;
mod core;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("beacon_relay=debug,info")
    } else {
        EnvFilter::new("beacon_relay=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Query(args) => {
            cli::query::run(args, cli.format, cli.verbose).await?;
        }
        cli::Commands::Beacons(args) => {
            cli::beacons::run(args, cli.format)?;
        }
    }

    Ok(())
}
