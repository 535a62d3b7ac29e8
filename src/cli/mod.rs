//! Command-line interface for beacon-relay.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **query**: Ask every registered beacon (or one) about a variant
//! - **beacons**: List the registered beacons and their supported builds
//!
//! ## Usage
//!
//! ```text
//! # Ask every beacon about a variant, across every build each supports
//! beacon-relay query --chrom 13 --pos 32888799 --allele G
//!
//! # Pin the genome build (aliases accepted: hg19, GRCh37, b37, ...)
//! beacon-relay query --chrom 13 --pos 32888799 --allele G --ref grch37
//!
//! # Ask a single beacon
//! beacon-relay query --chrom 13 --pos 32888799 --allele G --beacon ucsc
//!
//! # JSON output for scripting
//! beacon-relay query --chrom 13 --pos 32888799 --allele G --format json
//!
//! # List registered beacons
//! beacon-relay beacons
//! ```

use clap::{Parser, Subcommand};

pub mod beacons;
pub mod query;

#[derive(Parser)]
#[command(name = "beacon-relay")]
#[command(version)]
#[command(about = "Query many genomic beacons at once and aggregate their answers")]
#[command(
    long_about = "beacon-relay asks a set of genomic beacon services whether any of them has observed a given allele at a given chromosome position.\n\nEach beacon answers yes, no, or unknown; answers are collected concurrently under a shared deadline and reported per (beacon, genome build) pair."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query the beacon network for a variant
    Query(query::QueryArgs),

    /// List registered beacons
    Beacons(beacons::BeaconsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
