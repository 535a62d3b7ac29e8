//! The Cafe Variome discovery service.
//!
//! Wire format: GET against the central discovery endpoint; the response is
//! a JSON envelope listing per-source record counts, which are summed. The
//! URL scheme has no way to spell structural alleles, so `D`/`I` queries are
//! rejected at request-build time and degrade to `Unknown`.

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::{
    require_coordinates, AdapterError, BeaconAdapter, BeaconRequest, HttpTransport,
};
use crate::core::{BeaconDescriptor, Presence, Query, Reference};

const BASE_URL: &str = "http://beacon.cafevariome.org/query";
const SUPPORTED_REFS: &[Reference] = &[Reference::Hg19];

pub struct CafeVariomeBeacon {
    descriptor: BeaconDescriptor,
    transport: HttpTransport,
}

impl CafeVariomeBeacon {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            descriptor: BeaconDescriptor::new("cafe-variome", "Cafe Variome")
                .with_homepage("http://www.cafevariome.org/"),
            transport,
        }
    }
}

#[async_trait]
impl BeaconAdapter for CafeVariomeBeacon {
    fn descriptor(&self) -> &BeaconDescriptor {
        &self.descriptor
    }

    fn supported_references(&self) -> &[Reference] {
        SUPPORTED_REFS
    }

    fn build_request(
        &self,
        query: &Query,
        _reference: Reference,
    ) -> Result<BeaconRequest, AdapterError> {
        let (chromosome, position, allele) = require_coordinates(query)?;

        if allele.is_structural() {
            return Err(AdapterError::MalformedRequest(
                "structural alleles are not expressible in the Cafe Variome query scheme".into(),
            ));
        }

        Ok(BeaconRequest::get(format!(
            "{BASE_URL}?chrom={chromosome}&pos={position}&allele={allele}"
        )))
    }

    async fn execute(&self, request: &BeaconRequest) -> Result<String, AdapterError> {
        self.transport.get(&request.url).await
    }

    fn parse_response(&self, raw: &str) -> Presence {
        parse_source_counts(raw)
    }
}

/// Sum the per-source record counts in a Cafe Variome JSON envelope.
///
/// Expected shape: `{"sources": [{"name": ..., "count": N}, ...]}`. A
/// missing or malformed envelope is `Unknown`; an envelope whose counts sum
/// to zero is a confirmed miss.
pub fn parse_source_counts(raw: &str) -> Presence {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "Cafe Variome response is not valid JSON");
            return Presence::Unknown;
        }
    };

    let Some(sources) = value.get("sources").and_then(serde_json::Value::as_array) else {
        return Presence::Unknown;
    };

    let mut total: u64 = 0;
    for source in sources {
        match source.get("count").and_then(serde_json::Value::as_u64) {
            Some(count) => total += count,
            // One unreadable source makes the whole verdict unreliable
            None => return Presence::Unknown,
        }
    }

    Presence::from_bool(total > 0)
}
