//! The GA4GH beacon service at UCSC.
//!
//! Wire format: plain GET with UCSC-style (`chr`-prefixed) chromosome names;
//! the response body is free text containing a `yes` or `no` token.

use async_trait::async_trait;

use crate::adapters::{
    require_coordinates, AdapterError, BeaconAdapter, BeaconRequest, HttpTransport,
};
use crate::core::{BeaconDescriptor, Presence, Query, Reference};

const BASE_URL: &str = "http://hgwdev-max.cse.ucsc.edu/cgi-bin/beacon/query";
const SUPPORTED_REFS: &[Reference] = &[Reference::Hg19];

pub struct UcscBeacon {
    descriptor: BeaconDescriptor,
    transport: HttpTransport,
}

impl UcscBeacon {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            descriptor: BeaconDescriptor::new("ucsc", "UCSC")
                .with_homepage("http://genome.ucsc.edu/"),
            transport,
        }
    }
}

#[async_trait]
impl BeaconAdapter for UcscBeacon {
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

        // UCSC wants chr-prefixed chromosome names
        Ok(BeaconRequest::get(format!(
            "{BASE_URL}?track={}&chrom=chr{chromosome}&pos={position}&allele={allele}",
            self.descriptor.id
        )))
    }

    async fn execute(&self, request: &BeaconRequest) -> Result<String, AdapterError> {
        self.transport.get(&request.url).await
    }

    fn parse_response(&self, raw: &str) -> Presence {
        parse_yes_no(raw)
    }
}

/// Find a case-insensitive `yes`/`no` token in free text.
///
/// Token-wise scan rather than substring search, so words like "nothing" or
/// "yesterday" in an error page do not register as answers. A body with no
/// recognizable token is `Unknown`.
pub fn parse_yes_no(raw: &str) -> Presence {
    for token in raw.split(|c: char| !c.is_ascii_alphanumeric()) {
        match token.to_lowercase().as_str() {
            "yes" => return Presence::Present,
            "no" => return Presence::Absent,
            _ => {}
        }
    }

    Presence::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NormalizedQuery;

    fn beacon() -> UcscBeacon {
        UcscBeacon::new(HttpTransport::new().unwrap())
    }

    #[test]
    fn test_build_request_prefixes_chromosome() {
        let nq = NormalizedQuery::normalize("13", "32888799", "G", None);
        let request = beacon().build_request(&nq.query, Reference::Hg19).unwrap();

        assert!(request.url.contains("chrom=chr13"));
        assert!(request.url.contains("pos=32888799"));
        assert!(request.url.contains("allele=G"));
    }

    #[test]
    fn test_build_request_absent_chromosome() {
        let nq = NormalizedQuery::normalize("30", "32888799", "G", None);
        let err = beacon().build_request(&nq.query, Reference::Hg19).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedRequest(_)));
    }

    #[test]
    fn test_parse_yes() {
        assert_eq!(parse_yes_no("yes"), Presence::Present);
        assert_eq!(parse_yes_no("YES\n"), Presence::Present);
        assert_eq!(parse_yes_no("Beacon response: Yes."), Presence::Present);
    }

    #[test]
    fn test_parse_no() {
        assert_eq!(parse_yes_no("no"), Presence::Absent);
        assert_eq!(parse_yes_no("No\n"), Presence::Absent);
    }

    #[test]
    fn test_parse_unexpected_body() {
        assert_eq!(parse_yes_no(""), Presence::Unknown);
        assert_eq!(parse_yes_no("internal server error"), Presence::Unknown);
        // Substrings of other words must not count as answers
        assert_eq!(parse_yes_no("nothing found yesterday"), Presence::Unknown);
        assert_eq!(parse_yes_no("<html>503</html>"), Presence::Unknown);
    }

    #[test]
    fn test_supported_references() {
        assert_eq!(beacon().supported_references(), &[Reference::Hg19]);
    }
}
