use serde::{Deserialize, Serialize};

/// Canonical identifier of a venue section, as assigned by the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub i64);

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier of a row within a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub i64);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a request was routed through the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// No row given; the section name was looked up directly
    Suite,
    /// The row names a range of rows and is never resolved
    RowRange,
    /// No canonical section matched the input
    SectionNotFound,
    /// The section matched but has no rows, or none of its rows matched
    RowNotFound,
    /// Both section and row resolved
    Resolved,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Suite => write!(f, "suite"),
            Self::RowRange => write!(f, "row range"),
            Self::SectionNotFound => write!(f, "section not found"),
            Self::RowNotFound => write!(f, "row not found"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}
