use serde::{Deserialize, Serialize};

/// A canonical human chromosome: 1-22, X, Y, or MT.
///
/// Incoming queries spell chromosomes in many ways (`chr17`, `Chrom17`,
/// `chromosome17`, plain `17`); parsing strips the decoration and validates
/// against the canonical set. Anything outside the set (e.g. `30`) is
/// rejected rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Chromosome {
    /// Autosome 1-22
    Autosome(u8),
    X,
    Y,
    /// Mitochondrial genome
    Mt,
}

impl Chromosome {
    /// Parse a raw chromosome string, tolerating common prefixes.
    ///
    /// `chr`, `chrom` and `chromosome` prefixes are stripped
    /// case-insensitively, as is surrounding whitespace. `M` is accepted as a
    /// synonym for `MT`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();

        // Longest prefix first so "chr" does not truncate "chromosome17"
        let body = ["chromosome", "chrom", "chr"]
            .into_iter()
            .find_map(|prefix| lower.strip_prefix(prefix))
            .unwrap_or(&lower);

        match body {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "m" | "mt" => Some(Self::Mt),
            _ => match body.parse::<u8>() {
                Ok(n) if (1..=22).contains(&n) => Some(Self::Autosome(n)),
                _ => None,
            },
        }
    }
}

impl std::fmt::Display for Chromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Autosome(n) => write!(f, "{n}"),
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
            Self::Mt => write!(f, "MT"),
        }
    }
}

impl From<Chromosome> for String {
    fn from(c: Chromosome) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for Chromosome {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Chromosome::parse(&s).ok_or_else(|| format!("unknown chromosome: {s}"))
    }
}
