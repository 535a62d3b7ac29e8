//! # beacon-relay
//!
//! A library for querying many genomic beacon services at once.
//!
//! A *beacon* answers one narrow question: "do you have an observation of
//! this allele, at this position, on this chromosome, in this genome
//! build?" Every provider spells the question and the answer differently:
//! some want `chr`-prefixed chromosomes, some return free-text yes/no, some
//! return JSON match counts.
//!
//! `beacon-relay` normalizes the query once, fans it out concurrently to
//! every registered provider adapter, and aggregates the answers into a
//! uniform list of tri-state responses (present / absent / unknown) in a
//! deterministic order. A provider that fails, answers garbage, or misses
//! the deadline degrades to `unknown` for that provider only; it never
//! takes the rest of the request down with it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use beacon_relay::{BeaconNetwork, NetworkConfig, NormalizedQuery};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let network = BeaconNetwork::with_default_beacons(NetworkConfig::default())?;
//!
//! // Raw inputs are validated field by field; invalid fields are reported
//! // but never abort the query
//! let query = NormalizedQuery::normalize("chr13", "32888799", "g", Some("GRCh37"));
//!
//! for response in network.query(&query, None).await {
//!     println!("{} ({}): {}",
//!         response.beacon.id,
//!         response.query.reference.unwrap(),
//!         response.response,
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Query, chromosome, allele, reference and response types
//! - [`adapters`]: The provider contract and the built-in provider set
//! - [`aggregate`]: The registry and the concurrent dispatcher
//! - [`cli`]: Command-line interface implementation

pub mod adapters;
pub mod aggregate;
pub mod cli;
pub mod core;

// Re-export commonly used types for convenience
pub use adapters::{AdapterError, BeaconAdapter, BeaconRequest};
pub use aggregate::{BeaconNetwork, NetworkConfig, RegistryError};
pub use core::{
    Allele, BeaconDescriptor, BeaconResponse, Chromosome, NormalizedQuery, Presence, Query,
    QueryField, Reference,
};
