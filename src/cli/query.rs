use std::time::Duration;

use clap::Args;
use serde::Serialize;

use crate::aggregate::{BeaconNetwork, NetworkConfig};
use crate::cli::OutputFormat;
use crate::core::{BeaconResponse, NormalizedQuery, QueryField};

#[derive(Args)]
pub struct QueryArgs {
    /// Chromosome (1-22, X, Y, MT; chr/chrom prefixes tolerated)
    #[arg(long = "chrom")]
    pub chromosome: String,

    /// Position on the chromosome
    #[arg(long = "pos")]
    pub position: String,

    /// Allele: a base sequence, or D (deletion) / I (insertion)
    #[arg(long)]
    pub allele: String,

    /// Genome build; omit to query every build each beacon supports
    #[arg(long = "ref")]
    pub reference: Option<String>,

    /// Query a single beacon by id instead of the whole network
    #[arg(long)]
    pub beacon: Option<String>,

    /// Per-query deadline in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,
}

/// JSON envelope for the query subcommand
#[derive(Serialize)]
struct QueryReport<'a> {
    query: &'a crate::core::Query,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    invalid_fields: Vec<QueryField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    converted_fields: Vec<QueryField>,
    responses: &'a [BeaconResponse],
}

/// Execute query subcommand
///
/// # Errors
///
/// Returns an error if the network cannot be built or an unknown beacon id
/// is given; bad variant fields only degrade individual answers.
pub async fn run(args: QueryArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let normalized = NormalizedQuery::normalize(
        &args.chromosome,
        &args.position,
        &args.allele,
        args.reference.as_deref(),
    );

    if verbose {
        for field in &normalized.invalid {
            eprintln!("warning: {field} '{}' is invalid and was ignored", raw_field(&args, *field));
        }
    }

    let network = BeaconNetwork::with_default_beacons(NetworkConfig {
        query_timeout: Duration::from_secs(args.timeout_secs),
    })?;

    // Distinguish a bad beacon id from "queried, no data" up front
    if let Some(id) = &args.beacon {
        if network.descriptor(id).is_none() {
            anyhow::bail!("unknown beacon: {id} (run 'beacon-relay beacons' to list them)");
        }
    }

    let responses = network.query(&normalized, args.beacon.as_deref()).await;

    match format {
        OutputFormat::Json => {
            let report = QueryReport {
                query: &normalized.query,
                invalid_fields: normalized.invalid.iter().copied().collect(),
                converted_fields: normalized.converted.iter().copied().collect(),
                responses: &responses,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_text(&responses),
    }

    Ok(())
}

fn print_text(responses: &[BeaconResponse]) {
    if responses.is_empty() {
        println!("No beacon could be asked this query.");
        return;
    }

    println!("{:<16} {:<8} {}", "BEACON", "BUILD", "ANSWER");
    for response in responses {
        let build = response
            .query
            .reference
            .map_or_else(|| "-".to_string(), |r| r.to_string());
        println!(
            "{:<16} {:<8} {}",
            response.beacon.id, build, response.response
        );
    }
}

fn raw_field(args: &QueryArgs, field: QueryField) -> &str {
    match field {
        QueryField::Chromosome => &args.chromosome,
        QueryField::Position => &args.position,
        QueryField::Allele => &args.allele,
        QueryField::Reference => args.reference.as_deref().unwrap_or(""),
    }
}
