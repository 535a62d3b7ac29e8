use serde::{Deserialize, Serialize};

/// A normalized allele: a base sequence over {A, C, G, T}, or one of the
/// structural tokens `D` (deletion) and `I` (insertion).
///
/// Mixed tokens such as `DC` are invalid: they are neither a pure base
/// sequence nor a structural token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Allele {
    /// One or more bases, uppercase
    Sequence(String),
    /// Structural deletion
    Deletion,
    /// Structural insertion
    Insertion,
}

impl Allele {
    /// Parse a raw allele string, uppercasing base sequences.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_uppercase();

        match upper.as_str() {
            "" => None,
            "D" => Some(Self::Deletion),
            "I" => Some(Self::Insertion),
            seq if seq.bytes().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T')) => {
                Some(Self::Sequence(upper))
            }
            _ => None,
        }
    }

    /// Whether this is a structural allele (`D`/`I`) rather than a base
    /// sequence. Some providers cannot express these in their query scheme.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Deletion | Self::Insertion)
    }
}

impl std::fmt::Display for Allele {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequence(seq) => write!(f, "{seq}"),
            Self::Deletion => write!(f, "D"),
            Self::Insertion => write!(f, "I"),
        }
    }
}

impl From<Allele> for String {
    fn from(a: Allele) -> Self {
        a.to_string()
    }
}

impl TryFrom<String> for Allele {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Allele::parse(&s).ok_or_else(|| format!("invalid allele: {s}"))
    }
}
