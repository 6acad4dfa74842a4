use serde::{Deserialize, Serialize};

/// identifier of one alternative (mode) in the choice set, as coded in the
/// survey's choice column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlternativeId(pub i64);

impl From<i64> for AlternativeId {
    fn from(value: i64) -> Self {
        AlternativeId(value)
    }
}

impl std::fmt::Display for AlternativeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
