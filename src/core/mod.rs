//! Core data types for beacon queries and responses.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Chromosome`]: A canonical chromosome (1-22, X, Y, MT) with lenient parsing
//! - [`Allele`]: A base sequence or a structural `D`/`I` token
//! - [`Reference`]: A canonical genome build, with alias resolution
//! - [`Query`], [`NormalizedQuery`]: The normalized query plus invalid-field report
//! - [`Presence`], [`BeaconDescriptor`], [`BeaconResponse`]: The uniform answer model
//!
//! ## Chromosome Naming
//!
//! Incoming queries use a mix of naming conventions:
//!
//! | Style  | Chromosome 17 | Mitochondrial |
//! |--------|---------------|---------------|
//! | UCSC   | chr17         | chrM          |
//! | NCBI   | 17            | MT            |
//! | Loose  | chrom17       | M             |
//!
//! Normalization strips the decoration and stores the NCBI spelling; adapters
//! that need a `chr` prefix re-add it when building their request.

pub mod allele;
pub mod chromosome;
pub mod query;
pub mod reference;
pub mod response;

pub use allele::Allele;
pub use chromosome::Chromosome;
pub use query::{NormalizedQuery, Query, QueryField};
pub use reference::Reference;
pub use response::{BeaconDescriptor, BeaconResponse, Presence};
