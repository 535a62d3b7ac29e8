//! Provider adapters: the translation layer between the canonical query
//! model and each external beacon service's wire format.
//!
//! Every provider implements [`BeaconAdapter`]:
//!
//! - **`build_request`** maps a normalized query onto the provider's URL
//!   scheme; providers that cannot express a query (absent fields, or a
//!   structural allele against a sequence-only service) signal
//!   [`AdapterError::MalformedRequest`], a normal outcome rather than a bug.
//! - **`execute`** performs the network call through the shared
//!   [`HttpTransport`]; the dispatcher imposes the deadline.
//! - **`parse_response`** is a pure function from the provider's native
//!   response grammar (yes/no text, JSON count fields, JSON envelopes) to
//!   the tri-state [`Presence`]. Anything unexpected yields
//!   [`Presence::Unknown`], never `Absent`.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::{Allele, BeaconDescriptor, Chromosome, Presence, Query, Reference};

pub mod cafe_variome;
pub mod http;
pub mod ncbi;
pub mod ucsc;

pub use cafe_variome::CafeVariomeBeacon;
pub use http::HttpTransport;
pub use ncbi::NcbiBeacon;
pub use ucsc::UcscBeacon;

#[derive(Error, Debug)]
pub enum AdapterError {
    /// The provider cannot express this query at all
    #[error("cannot express query: {0}")]
    MalformedRequest(String),

    /// Network-level failure (connect, send, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned status {0}")]
    Status(reqwest::StatusCode),
}

/// An opaque, fully-built provider request, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconRequest {
    pub url: String,
}

impl BeaconRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// The capability set every beacon provider implements.
///
/// Implementations are stateless apart from their immutable descriptor and
/// the shared HTTP transport, so one instance serves all concurrent requests.
#[async_trait]
pub trait BeaconAdapter: Send + Sync {
    /// Static identity of this beacon.
    fn descriptor(&self) -> &BeaconDescriptor;

    /// The genome builds this provider can answer for. Slice order defines
    /// the per-beacon ordering of fan-out results.
    fn supported_references(&self) -> &[Reference];

    /// Construct the provider-specific request for `query` against
    /// `reference`.
    fn build_request(
        &self,
        query: &Query,
        reference: Reference,
    ) -> Result<BeaconRequest, AdapterError>;

    /// Perform the network call and return the raw response body.
    async fn execute(&self, request: &BeaconRequest) -> Result<String, AdapterError>;

    /// Translate the provider's raw response into a tri-state answer.
    fn parse_response(&self, raw: &str) -> Presence;
}

/// Pull out the chromosome, position and allele a provider URL needs,
/// rejecting queries where any of them failed normalization.
pub(crate) fn require_coordinates(
    query: &Query,
) -> Result<(Chromosome, u64, &Allele), AdapterError> {
    let chromosome = query
        .chromosome
        .ok_or_else(|| AdapterError::MalformedRequest("chromosome is absent".into()))?;
    let position = query
        .position
        .ok_or_else(|| AdapterError::MalformedRequest("position is absent".into()))?;
    let allele = query
        .allele
        .as_ref()
        .ok_or_else(|| AdapterError::MalformedRequest("allele is absent".into()))?;

    Ok((chromosome, position, allele))
}
