use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use crate::adapters::{
    AdapterError, BeaconAdapter, CafeVariomeBeacon, HttpTransport, NcbiBeacon, UcscBeacon,
};
use crate::core::{BeaconDescriptor, BeaconResponse, NormalizedQuery, Presence, Query, Reference};

#[derive(Error, Debug)]
pub enum RegistryError {
    /// Two adapters registered under the same id; a configuration bug
    #[error("duplicate beacon id: {0}")]
    DuplicateBeacon(String),

    /// The shared HTTP transport could not be built
    #[error(transparent)]
    Transport(#[from] AdapterError),
}

/// Default per-query deadline
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the beacon network
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Shared deadline for all (beacon, reference) units of one query
    pub query_timeout: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

/// The registry of beacon adapters plus the concurrent dispatcher.
///
/// Constructed once at start-up and read-only afterwards, so a single
/// instance is safely shared by any number of concurrent queries. All
/// per-query state lives on the `query` call stack.
pub struct BeaconNetwork {
    /// Adapters in registration order; result ordering follows this
    adapters: Vec<Arc<dyn BeaconAdapter>>,

    /// Index: beacon id -> index in adapters vec
    id_to_index: HashMap<String, usize>,

    config: NetworkConfig,
}

/// One dispatched (beacon, reference) unit awaiting its answer.
struct Unit {
    beacon: BeaconDescriptor,
    query: Query,
    handle: JoinHandle<Presence>,
}

impl BeaconNetwork {
    /// Build a network from an explicit adapter list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateBeacon`] if two adapters share an
    /// id. This is the only failure mode: bad end-user queries never fail
    /// the network, only degrade individual answers.
    pub fn new(
        adapters: Vec<Arc<dyn BeaconAdapter>>,
        config: NetworkConfig,
    ) -> Result<Self, RegistryError> {
        let mut id_to_index = HashMap::new();

        for (index, adapter) in adapters.iter().enumerate() {
            let id = adapter.descriptor().id.clone();
            if id_to_index.insert(id.clone(), index).is_some() {
                return Err(RegistryError::DuplicateBeacon(id));
            }
        }

        Ok(Self {
            adapters,
            id_to_index,
            config,
        })
    }

    /// Build the network with the built-in provider set (UCSC, NCBI,
    /// Cafe Variome) sharing one HTTP transport.
    pub fn with_default_beacons(config: NetworkConfig) -> Result<Self, RegistryError> {
        let transport = HttpTransport::new()?;

        let adapters: Vec<Arc<dyn BeaconAdapter>> = vec![
            Arc::new(UcscBeacon::new(transport.clone())),
            Arc::new(NcbiBeacon::new(transport.clone())),
            Arc::new(CafeVariomeBeacon::new(transport)),
        ];

        Self::new(adapters, config)
    }

    /// Look up a registered beacon by id.
    ///
    /// This is the existence check that lets a boundary layer distinguish
    /// "beacon not registered" from "beacon queried, no data".
    pub fn descriptor(&self, id: &str) -> Option<&BeaconDescriptor> {
        self.id_to_index
            .get(id)
            .map(|&index| self.adapters[index].descriptor())
    }

    /// All registered beacons in registration order.
    pub fn beacons(&self) -> impl Iterator<Item = &BeaconDescriptor> {
        self.adapters.iter().map(|a| a.descriptor())
    }

    /// The registered adapters themselves, in registration order.
    pub fn adapters(&self) -> impl Iterator<Item = &Arc<dyn BeaconAdapter>> {
        self.adapters.iter()
    }

    /// Number of registered beacons
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Fan a normalized query out across the registry and collect every
    /// answer.
    ///
    /// One response is produced per (beacon, reference) pair dispatched:
    /// the query's reference if given and supported, otherwise every build
    /// the beacon supports. Units that fail, panic or miss the shared
    /// deadline answer `Unknown`; none of them can fail the call itself.
    pub async fn query(
        &self,
        normalized: &NormalizedQuery,
        beacon_filter: Option<&str>,
    ) -> Vec<BeaconResponse> {
        let working_set: Vec<&Arc<dyn BeaconAdapter>> = match beacon_filter {
            Some(id) => match self.id_to_index.get(id) {
                Some(&index) => vec![&self.adapters[index]],
                None => {
                    debug!(beacon = id, "beacon not registered, returning empty result");
                    return Vec::new();
                }
            },
            None => self.adapters.iter().collect(),
        };

        let deadline = Instant::now() + self.config.query_timeout;

        // Fire every unit before awaiting any of them
        let mut units = Vec::new();
        for adapter in working_set {
            let references: Vec<Reference> = match normalized.query.reference {
                Some(reference) => {
                    if adapter.supported_references().contains(&reference) {
                        vec![reference]
                    } else {
                        debug!(
                            beacon = %adapter.descriptor().id,
                            reference = %reference,
                            "beacon does not support requested reference, skipping"
                        );
                        continue;
                    }
                }
                None => adapter.supported_references().to_vec(),
            };

            for reference in references {
                let adapter = Arc::clone(adapter);
                let query = normalized.query.with_reference(reference);
                let beacon = adapter.descriptor().clone();
                let handle = tokio::spawn(probe(adapter, query.clone(), reference));

                units.push(Unit {
                    beacon,
                    query,
                    handle,
                });
            }
        }

        // Collect in dispatch order; the shared deadline bounds the total
        // wait even though units are awaited one by one
        let mut responses = Vec::with_capacity(units.len());
        for mut unit in units {
            let presence = match timeout_at(deadline, &mut unit.handle).await {
                Ok(Ok(presence)) => presence,
                Ok(Err(join_error)) => {
                    warn!(
                        beacon = %unit.beacon.id,
                        error = %join_error,
                        "beacon task aborted or panicked"
                    );
                    Presence::Unknown
                }
                Err(_elapsed) => {
                    unit.handle.abort();
                    warn!(beacon = %unit.beacon.id, "beacon did not answer before the deadline");
                    Presence::Unknown
                }
            };

            responses.push(BeaconResponse {
                beacon: unit.beacon,
                query: unit.query,
                response: presence,
            });
        }

        responses
    }
}

/// Run one (beacon, reference) unit through its state machine:
/// build the request, execute it, parse the answer. Every failure leg
/// terminates in `Unknown`.
async fn probe(adapter: Arc<dyn BeaconAdapter>, query: Query, reference: Reference) -> Presence {
    let beacon = &adapter.descriptor().id;

    let request = match adapter.build_request(&query, reference) {
        Ok(request) => request,
        Err(error) => {
            debug!(beacon = %beacon, reference = %reference, error = %error, "beacon cannot express query");
            return Presence::Unknown;
        }
    };

    match adapter.execute(&request).await {
        Ok(raw) => adapter.parse_response(&raw),
        Err(error) => {
            warn!(beacon = %beacon, reference = %reference, error = %error, "beacon query failed");
            Presence::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{require_coordinates, BeaconRequest};
    use async_trait::async_trait;

    /// What a scripted test beacon should do when executed
    #[derive(Debug, Clone, Copy)]
    enum Behavior {
        Answer(Presence),
        /// Answer after sleeping for the given duration
        AnswerAfter(Duration, Presence),
        FailExecute,
        Hang,
        Panic,
    }

    struct MockBeacon {
        descriptor: BeaconDescriptor,
        references: Vec<Reference>,
        behavior: Behavior,
    }

    impl MockBeacon {
        fn new(id: &str, references: Vec<Reference>, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                descriptor: BeaconDescriptor::new(id, id.to_uppercase()),
                references,
                behavior,
            })
        }
    }

    #[async_trait]
    impl BeaconAdapter for MockBeacon {
        fn descriptor(&self) -> &BeaconDescriptor {
            &self.descriptor
        }

        fn supported_references(&self) -> &[Reference] {
            &self.references
        }

        fn build_request(
            &self,
            query: &Query,
            reference: Reference,
        ) -> Result<BeaconRequest, AdapterError> {
            let (chromosome, position, allele) = require_coordinates(query)?;
            Ok(BeaconRequest::get(format!(
                "mock://{}?chrom={chromosome}&pos={position}&allele={allele}&ref={reference}",
                self.descriptor.id
            )))
        }

        async fn execute(&self, _request: &BeaconRequest) -> Result<String, AdapterError> {
            match self.behavior {
                Behavior::Answer(presence) => Ok(presence.to_string()),
                Behavior::AnswerAfter(delay, presence) => {
                    tokio::time::sleep(delay).await;
                    Ok(presence.to_string())
                }
                Behavior::FailExecute => {
                    Err(AdapterError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
                }
                Behavior::Hang => std::future::pending().await,
                Behavior::Panic => panic!("scripted panic"),
            }
        }

        fn parse_response(&self, raw: &str) -> Presence {
            match raw {
                "yes" => Presence::Present,
                "no" => Presence::Absent,
                _ => Presence::Unknown,
            }
        }
    }

    fn network(adapters: Vec<Arc<dyn BeaconAdapter>>) -> BeaconNetwork {
        BeaconNetwork::new(adapters, NetworkConfig::default()).unwrap()
    }

    fn short_deadline_network(adapters: Vec<Arc<dyn BeaconAdapter>>) -> BeaconNetwork {
        BeaconNetwork::new(
            adapters,
            NetworkConfig {
                query_timeout: Duration::from_millis(100),
            },
        )
        .unwrap()
    }

    fn clean_query() -> NormalizedQuery {
        NormalizedQuery::normalize("13", "32888799", "G", None)
    }

    #[test]
    fn test_duplicate_beacon_id_rejected() {
        let result = BeaconNetwork::new(
            vec![
                MockBeacon::new("a", vec![Reference::Hg19], Behavior::Answer(Presence::Present)),
                MockBeacon::new("a", vec![Reference::Hg38], Behavior::Answer(Presence::Absent)),
            ],
            NetworkConfig::default(),
        );
        assert!(matches!(result, Err(RegistryError::DuplicateBeacon(id)) if id == "a"));
    }

    #[test]
    fn test_descriptor_lookup() {
        let net = network(vec![MockBeacon::new(
            "a",
            vec![Reference::Hg19],
            Behavior::Answer(Presence::Present),
        )]);

        assert!(net.descriptor("a").is_some());
        assert!(net.descriptor("nonexistent").is_none());
        assert_eq!(net.len(), 1);
        assert!(!net.is_empty());
    }

    #[tokio::test]
    async fn test_fan_out_per_supported_reference() {
        let net = network(vec![
            MockBeacon::new("a", vec![Reference::Hg19], Behavior::Answer(Presence::Present)),
            MockBeacon::new(
                "b",
                vec![Reference::Hg19, Reference::Hg38],
                Behavior::Answer(Presence::Absent),
            ),
        ]);

        let responses = net.query(&clean_query(), None).await;

        // One entry per (beacon, reference) pair, registration order first,
        // then the beacon's supported-reference order
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].beacon.id, "a");
        assert_eq!(responses[0].query.reference, Some(Reference::Hg19));
        assert_eq!(responses[0].response, Presence::Present);
        assert_eq!(responses[1].beacon.id, "b");
        assert_eq!(responses[1].query.reference, Some(Reference::Hg19));
        assert_eq!(responses[2].beacon.id, "b");
        assert_eq!(responses[2].query.reference, Some(Reference::Hg38));
    }

    #[tokio::test]
    async fn test_single_hg19_beacon_agnostic_query() {
        let net = network(vec![MockBeacon::new(
            "cafe-variome",
            vec![Reference::Hg19],
            Behavior::Answer(Presence::Present),
        )]);

        let nq = NormalizedQuery::normalize("2", "179612320", "T", None);
        let responses = net.query(&nq, None).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].query.reference, Some(Reference::Hg19));
        assert_eq!(responses[0].response, Presence::Present);
    }

    #[tokio::test]
    async fn test_specific_reference_skips_unsupported_beacon() {
        let net = network(vec![
            MockBeacon::new("hg19-only", vec![Reference::Hg19], Behavior::Answer(Presence::Present)),
            MockBeacon::new(
                "both",
                vec![Reference::Hg19, Reference::Hg38],
                Behavior::Answer(Presence::Absent),
            ),
        ]);

        let nq = NormalizedQuery::normalize("13", "32888799", "G", Some("hg38"));
        let responses = net.query(&nq, None).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].beacon.id, "both");
        assert_eq!(responses[0].query.reference, Some(Reference::Hg38));
    }

    #[tokio::test]
    async fn test_beacon_filter_selects_single() {
        let net = network(vec![
            MockBeacon::new("a", vec![Reference::Hg19], Behavior::Answer(Presence::Present)),
            MockBeacon::new("b", vec![Reference::Hg19], Behavior::Answer(Presence::Absent)),
        ]);

        let responses = net.query(&clean_query(), Some("b")).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].beacon.id, "b");
        assert_eq!(responses[0].response, Presence::Absent);
    }

    #[tokio::test]
    async fn test_unknown_beacon_filter_yields_empty() {
        let net = network(vec![MockBeacon::new(
            "a",
            vec![Reference::Hg19],
            Behavior::Answer(Presence::Present),
        )]);

        let responses = net.query(&clean_query(), Some("nonexistent")).await;
        assert!(responses.is_empty());
    }

    #[tokio::test]
    async fn test_empty_registry_yields_empty() {
        let net = network(Vec::new());
        assert!(net.query(&clean_query(), None).await.is_empty());
    }

    #[tokio::test]
    async fn test_io_failure_isolated() {
        let net = network(vec![
            MockBeacon::new("ok", vec![Reference::Hg19], Behavior::Answer(Presence::Present)),
            MockBeacon::new("broken", vec![Reference::Hg19], Behavior::FailExecute),
            MockBeacon::new("also-ok", vec![Reference::Hg19], Behavior::Answer(Presence::Absent)),
        ]);

        let responses = net.query(&clean_query(), None).await;

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].response, Presence::Present);
        assert_eq!(responses[1].response, Presence::Unknown);
        assert_eq!(responses[2].response, Presence::Absent);
    }

    #[tokio::test]
    async fn test_panic_isolated() {
        let net = network(vec![
            MockBeacon::new("panics", vec![Reference::Hg19], Behavior::Panic),
            MockBeacon::new("ok", vec![Reference::Hg19], Behavior::Answer(Presence::Present)),
        ]);

        let responses = net.query(&clean_query(), None).await;

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].response, Presence::Unknown);
        assert_eq!(responses[1].response, Presence::Present);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_beacon_hits_deadline_and_still_answers() {
        let net = short_deadline_network(vec![
            MockBeacon::new("hangs", vec![Reference::Hg19], Behavior::Hang),
            MockBeacon::new("ok", vec![Reference::Hg19], Behavior::Answer(Presence::Present)),
        ]);

        let responses = net.query(&clean_query(), None).await;

        // The timed-out unit still produces an entry
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].beacon.id, "hangs");
        assert_eq!(responses[0].response, Presence::Unknown);
        assert_eq!(responses[1].response, Presence::Present);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ordering_independent_of_completion_time() {
        // First-registered beacon answers last
        let net = network(vec![
            MockBeacon::new(
                "slow",
                vec![Reference::Hg19],
                Behavior::AnswerAfter(Duration::from_millis(500), Presence::Present),
            ),
            MockBeacon::new("fast", vec![Reference::Hg19], Behavior::Answer(Presence::Absent)),
        ]);

        let responses = net.query(&clean_query(), None).await;

        assert_eq!(responses[0].beacon.id, "slow");
        assert_eq!(responses[0].response, Presence::Present);
        assert_eq!(responses[1].beacon.id, "fast");
        assert_eq!(responses[1].response, Presence::Absent);
    }

    #[tokio::test]
    async fn test_invalid_chromosome_dispatches_and_degrades() {
        let net = network(vec![
            MockBeacon::new("a", vec![Reference::Hg19], Behavior::Answer(Presence::Present)),
            MockBeacon::new("b", vec![Reference::Hg19], Behavior::Answer(Presence::Absent)),
        ]);

        // Chromosome 30 does not exist: field is absent, every beacon is
        // still asked, every answer is unknown
        let nq = NormalizedQuery::normalize("30", "41087869", "A", None);
        let responses = net.query(&nq, None).await;

        assert_eq!(responses.len(), 2);
        for response in &responses {
            assert_eq!(response.query.chromosome, None);
            assert_eq!(response.response, Presence::Unknown);
        }
    }

    #[tokio::test]
    async fn test_idempotent_answers() {
        let net = network(vec![MockBeacon::new(
            "a",
            vec![Reference::Hg19],
            Behavior::Answer(Presence::Present),
        )]);

        let first = net.query(&clean_query(), None).await;
        let second = net.query(&clean_query(), None).await;
        assert_eq!(first, second);
    }
}
