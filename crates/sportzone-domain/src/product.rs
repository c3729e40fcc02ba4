//! Catalog domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sport a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Basketball,
    Volleyball,
    Football,
}

/// Returned when a category string is not one of the known categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Self; 3] = [Self::Basketball, Self::Volleyball, Self::Football];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basketball => "basketball",
            Self::Volleyball => "volleyball",
            Self::Football => "football",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basketball" => Ok(Self::Basketball),
            "volleyball" => Ok(Self::Volleyball),
            "football" => Ok(Self::Football),
            other => Err(UnknownCategory(other.to_owned())),
        }
    }
}
