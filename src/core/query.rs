use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::allele::Allele;
use crate::core::chromosome::Chromosome;
use crate::core::reference::Reference;

/// Names of query fields, used to report which raw inputs failed
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryField {
    Chromosome,
    Position,
    Allele,
    Reference,
}

impl std::fmt::Display for QueryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chromosome => write!(f, "chromosome"),
            Self::Position => write!(f, "position"),
            Self::Allele => write!(f, "allele"),
            Self::Reference => write!(f, "reference"),
        }
    }
}

/// A normalized beacon query.
///
/// Every field is optional: an invalid raw input leaves the corresponding
/// field absent rather than failing the whole query. Providers decide for
/// themselves whether they can answer a query with absent fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chromosome: Option<Chromosome>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allele: Option<Allele>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

impl Query {
    /// Return a copy of this query with the reference pinned to `reference`.
    ///
    /// Used when a reference-agnostic query fans out: each dispatched unit
    /// reports the concrete build it was asked against.
    #[must_use]
    pub fn with_reference(&self, reference: Reference) -> Self {
        Self {
            reference: Some(reference),
            ..self.clone()
        }
    }
}

/// A [`Query`] together with a report of which raw fields failed
/// normalization and which were substituted on the way in.
///
/// Both sets exist for caller visibility only; the pipeline proceeds
/// regardless of their contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedQuery {
    pub query: Query,

    /// Raw fields that were invalid and left absent in `query`
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub invalid: BTreeSet<QueryField>,

    /// Raw fields that were valid but whose canonical spelling differs from
    /// the input (`chrom17` -> `17`, `g` -> `G`, `grch37` -> `hg19`)
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub converted: BTreeSet<QueryField>,
}

impl NormalizedQuery {
    /// Validate and canonicalize raw query inputs.
    ///
    /// Each field is validated independently: a malformed chromosome does
    /// not stop the position or allele from being normalized, and vice
    /// versa. An unresolvable reference alias is reported as invalid and the
    /// query proceeds as reference-agnostic.
    pub fn normalize(
        raw_chromosome: &str,
        raw_position: &str,
        raw_allele: &str,
        raw_reference: Option<&str>,
    ) -> Self {
        let mut invalid = BTreeSet::new();
        let mut converted = BTreeSet::new();

        let mut record = |field: QueryField, raw: &str, canonical: Option<String>| {
            match canonical {
                None => {
                    invalid.insert(field);
                }
                Some(canonical) if canonical != raw.trim() => {
                    converted.insert(field);
                }
                Some(_) => {}
            }
        };

        let chromosome = Chromosome::parse(raw_chromosome);
        record(
            QueryField::Chromosome,
            raw_chromosome,
            chromosome.map(|c| c.to_string()),
        );

        let position = raw_position.trim().parse::<u64>().ok();
        record(
            QueryField::Position,
            raw_position,
            position.map(|p| p.to_string()),
        );

        let allele = Allele::parse(raw_allele);
        record(
            QueryField::Allele,
            raw_allele,
            allele.as_ref().map(ToString::to_string),
        );

        let reference = match raw_reference {
            None => None,
            Some(alias) => {
                let resolved = Reference::resolve(alias);
                record(
                    QueryField::Reference,
                    alias,
                    resolved.map(|r| r.to_string()),
                );
                resolved
            }
        };

        Self {
            query: Query {
                chromosome,
                position,
                allele,
                reference,
            },
            invalid,
            converted,
        }
    }
}
