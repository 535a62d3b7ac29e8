use clap::Args;
use serde::Serialize;

use crate::aggregate::{BeaconNetwork, NetworkConfig};
use crate::cli::OutputFormat;
use crate::core::Reference;

#[derive(Args)]
pub struct BeaconsArgs {}

#[derive(Serialize)]
struct BeaconListing<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    homepage: Option<&'a str>,
    references: &'a [Reference],
}

/// Execute beacons subcommand: list the registry.
///
/// # Errors
///
/// Returns an error only if the network cannot be built.
pub fn run(_args: BeaconsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let network = BeaconNetwork::with_default_beacons(NetworkConfig::default())?;

    match format {
        OutputFormat::Json => {
            let listings: Vec<BeaconListing<'_>> = network
                .adapters()
                .map(|adapter| BeaconListing {
                    id: &adapter.descriptor().id,
                    name: &adapter.descriptor().name,
                    homepage: adapter.descriptor().homepage.as_deref(),
                    references: adapter.supported_references(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listings)?);
        }
        OutputFormat::Text => {
            println!("{:<16} {:<24} {}", "ID", "NAME", "BUILDS");
            for adapter in network.adapters() {
                let builds: Vec<String> = adapter
                    .supported_references()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!(
                    "{:<16} {:<24} {}",
                    adapter.descriptor().id,
                    adapter.descriptor().name,
                    builds.join(", ")
                );
            }
        }
    }

    Ok(())
}
