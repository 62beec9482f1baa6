use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mutation testing classification of a method, as reported by Descartes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    NotCovered,
    PseudoTested,
    PartiallyTested,
    Tested,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::NotCovered,
        Classification::PseudoTested,
        Classification::PartiallyTested,
        Classification::Tested,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Classification::NotCovered => "not-covered",
            Classification::PseudoTested => "pseudo-tested",
            Classification::PartiallyTested => "partially-tested",
            Classification::Tested => "tested",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classification::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownClassification(s.to_string()))
    }
}
