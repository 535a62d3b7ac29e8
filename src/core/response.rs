use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::query::Query;

/// Tri-state answer from a beacon: the variant is present, absent, or the
/// provider could not say.
///
/// `Unknown` covers provider errors, timeouts, unparseable responses and
/// queries the provider cannot express. It is evidentially different from
/// `Absent` and must never be collapsed into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
    Unknown,
}

impl Presence {
    /// Interpret a provider's yes/no verdict.
    pub fn from_bool(found: bool) -> Self {
        if found {
            Self::Present
        } else {
            Self::Absent
        }
    }

    /// The outbound representation: `true`, `false`, or `null` for unknown.
    pub fn as_option(self) -> Option<bool> {
        match self {
            Self::Present => Some(true),
            Self::Absent => Some(false),
            Self::Unknown => None,
        }
    }
}

// Wire format is true / false / null per the boundary contract
impl Serialize for Presence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Presence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let opt = Option::<bool>::deserialize(deserializer)?;
        Ok(match opt {
            Some(true) => Self::Present,
            Some(false) => Self::Absent,
            None => Self::Unknown,
        })
    }
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => write!(f, "yes"),
            Self::Absent => write!(f, "no"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Static identity of a registered beacon. Constructed once at start-up and
/// shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconDescriptor {
    /// Unique identifier, used for beacon filtering
    pub id: String,

    /// Human-readable name of the provider
    pub name: String,

    /// Provider homepage, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

impl BeaconDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            homepage: None,
        }
    }

    #[must_use]
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }
}

/// The answer of one beacon for one (query, reference) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconResponse {
    /// Which beacon answered
    pub beacon: BeaconDescriptor,

    /// The query as dispatched, with the concrete reference filled in
    pub query: Query,

    /// Tri-state answer; serialized as true / false / null
    pub response: Presence,
}
