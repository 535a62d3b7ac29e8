//! Beacon aggregation: the registry of providers and the concurrent
//! dispatcher that fans a query out across them.
//!
//! This module provides the core aggregation functionality:
//!
//! - [`BeaconNetwork`]: registry + dispatcher, built once at start-up
//! - [`NetworkConfig`]: per-query deadline configuration
//!
//! ## Dispatch Algorithm
//!
//! For a normalized query, the network launches one tokio task per
//! (beacon, reference) pair:
//!
//! 1. **Working set**: all registered beacons, or a single beacon when a
//!    filter id is given (an unknown id yields an empty result, not an
//!    error).
//! 2. **References**: the query's reference if the beacon supports it
//!    (otherwise the beacon is skipped), or every build the beacon supports
//!    for reference-agnostic queries.
//! 3. **Deadline**: every unit shares one deadline; a unit that misses it is
//!    aborted and reported as `Unknown`, never dropped.
//! 4. **Isolation**: an error or panic in one unit degrades only that unit's
//!    answer; siblings are unaffected.
//! 5. **Ordering**: results are assembled in beacon registration order, then
//!    supported-reference order, regardless of completion timing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use beacon_relay::aggregate::{BeaconNetwork, NetworkConfig};
//! use beacon_relay::core::NormalizedQuery;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let network = BeaconNetwork::with_default_beacons(NetworkConfig::default())?;
//! let query = NormalizedQuery::normalize("13", "32888799", "G", Some("hg19"));
//!
//! for response in network.query(&query, None).await {
//!     println!("{}: {}", response.beacon.id, response.response);
//! }
//! # Ok(())
//! # }
//! ```

pub mod engine;

pub use engine::{BeaconNetwork, NetworkConfig, RegistryError};
