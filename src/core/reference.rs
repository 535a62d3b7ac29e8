use serde::{Deserialize, Serialize};

/// A canonical human genome build.
///
/// Beacons and queries are tied to one or more builds; everything else in
/// the pipeline refers to builds through this enum, never through raw alias
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reference {
    Hg38,
    Hg19,
    Hg18,
}

impl Reference {
    /// Resolve a build alias to its canonical identifier.
    ///
    /// Pure function over a fixed synonym table, case-insensitive. UCSC
    /// names (hg19), GRC names (GRCh37) and the common shorthand (b37)
    /// all resolve to the same build. Unknown aliases resolve to `None`.
    pub fn resolve(alias: &str) -> Option<Self> {
        match alias.trim().to_lowercase().as_str() {
            "hg38" | "grch38" | "b38" => Some(Self::Hg38),
            "hg19" | "grch37" | "b37" => Some(Self::Hg19),
            "hg18" | "ncbi36" | "b36" => Some(Self::Hg18),
            _ => None,
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hg38 => write!(f, "hg38"),
            Self::Hg19 => write!(f, "hg19"),
            Self::Hg18 => write!(f, "hg18"),
        }
    }
}
