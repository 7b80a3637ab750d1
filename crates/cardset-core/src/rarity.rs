//! # Rarity Classes
//!
//! The fixed set of rarity classes a card may carry. Matching is exact and
//! case-sensitive: `"Rare"` and `"very uncommon"` are not rarity classes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rarity class of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[serde(rename = "common")]
    Common,
    #[serde(rename = "uncommon")]
    Uncommon,
    #[serde(rename = "rare")]
    Rare,
    #[serde(rename = "mythic rare")]
    MythicRare,
}

impl Rarity {
    /// Every rarity class, from most to least common.
    pub const ALL: [Rarity; 4] = [Self::Common, Self::Uncommon, Self::Rare, Self::MythicRare];

    /// The wire form, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::MythicRare => "mythic rare",
        }
    }

    /// Exact, case-sensitive lookup of a wire string.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the four rarity classes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rarity class: {0:?}")]
pub struct UnknownRarity(pub String);

impl FromStr for Rarity {
    type Err = UnknownRarity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRarity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_roundtrip() {
        for rarity in Rarity::ALL {
            assert_eq!(Rarity::parse(rarity.as_str()), Some(rarity));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(Rarity::parse("Rare"), None);
        assert_eq!(Rarity::parse("MYTHIC RARE"), None);
        assert_eq!(Rarity::parse("very uncommon"), None);
        assert_eq!(Rarity::parse(""), None);
    }

    #[test]
    fn serde_format_matches_as_str() {
        for rarity in Rarity::ALL {
            let json = serde_json::to_string(&rarity).unwrap();
            assert_eq!(json, format!("\"{}\"", rarity.as_str()));
        }
    }

    #[test]
    fn from_str_reports_offending_value() {
        let err = "legendary".parse::<Rarity>().unwrap_err();
        assert!(err.to_string().contains("legendary"));
    }
}
