//! The NCBI beacon service.
//!
//! Wire format: GET with NCBI-style (bare) chromosome names and an explicit
//! assembly parameter; the response is JSON carrying a match count.

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::{
    require_coordinates, AdapterError, BeaconAdapter, BeaconRequest, HttpTransport,
};
use crate::core::{BeaconDescriptor, Presence, Query, Reference};

const BASE_URL: &str = "https://www.ncbi.nlm.nih.gov/projects/genome/beacon/beacon.cgi";
const SUPPORTED_REFS: &[Reference] = &[Reference::Hg19, Reference::Hg38];

pub struct NcbiBeacon {
    descriptor: BeaconDescriptor,
    transport: HttpTransport,
}

impl NcbiBeacon {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            descriptor: BeaconDescriptor::new("ncbi", "NCBI")
                .with_homepage("https://www.ncbi.nlm.nih.gov/"),
            transport,
        }
    }
}

#[async_trait]
impl BeaconAdapter for NcbiBeacon {
    fn descriptor(&self) -> &BeaconDescriptor {
        &self.descriptor
    }

    fn supported_references(&self) -> &[Reference] {
        SUPPORTED_REFS
    }

    fn build_request(
        &self,
        query: &Query,
        reference: Reference,
    ) -> Result<BeaconRequest, AdapterError> {
        let (chromosome, position, allele) = require_coordinates(query)?;

        Ok(BeaconRequest::get(format!(
            "{BASE_URL}?chrom={chromosome}&pos={position}&allele={allele}&assembly={reference}"
        )))
    }

    async fn execute(&self, request: &BeaconRequest) -> Result<String, AdapterError> {
        self.transport.get(&request.url).await
    }

    fn parse_response(&self, raw: &str) -> Presence {
        parse_match_count(raw)
    }
}

/// Read the `num_matches` count out of an NCBI JSON response.
///
/// A positive count is a confirmed hit, zero is a confirmed miss. A body
/// that is not JSON, or JSON without the count field, is `Unknown`.
pub fn parse_match_count(raw: &str) -> Presence {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "NCBI response is not valid JSON");
            return Presence::Unknown;
        }
    };

    match value.get("num_matches").and_then(serde_json::Value::as_u64) {
        Some(count) => Presence::from_bool(count > 0),
        None => Presence::Unknown,
    }
}
