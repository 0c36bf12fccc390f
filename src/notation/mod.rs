//! Haplotype notation types, grammars and formatting
//!
//! Two mutually incompatible nomenclatures describe how a sample differs
//! from the reference:
//!
//! - **Population genetics** (`POP`): bare positions for transitions, merged
//!   multi-base insertion and deletion tokens (`309iCC`, `249dA`).
//! - **Forensic genetics** (`FOR`): every change carries its base, insertions
//!   are numbered per base (`309.1C 309.2C`), deletions never name the
//!   deleted base (`249del`).

pub mod format;
pub mod mutation;
pub mod parser;
pub mod ranges;

pub use format::{format_position, FormatFlags};
pub use mutation::{ChangeKind, DeletedBases, Mutation, MutationKind};
pub use parser::{parse_haplotype, parse_insertion, parse_token};
pub use ranges::compress_ranges;

use crate::error::HaploError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Notation family used for a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Nomenclature {
    /// Population genetics (`POP`)
    #[default]
    #[serde(rename = "POP")]
    Population,
    /// Forensic genetics (`FOR`)
    #[serde(rename = "FOR")]
    Forensic,
}

impl Nomenclature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Nomenclature::Population => "POP",
            Nomenclature::Forensic => "FOR",
        }
    }
}

impl fmt::Display for Nomenclature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nomenclature {
    type Err = HaploError;

    /// Parse a nomenclature selector
    ///
    /// # Examples
    ///
    /// ```
    /// use haplosearch::notation::Nomenclature;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(Nomenclature::from_str("POP").unwrap(), Nomenclature::Population);
    /// assert_eq!(Nomenclature::from_str("forensic").unwrap(), Nomenclature::Forensic);
    /// assert!(Nomenclature::from_str("HGVS").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pop" | "population" => Ok(Nomenclature::Population),
            "for" | "forensic" => Ok(Nomenclature::Forensic),
            other => Err(HaploError::Config {
                msg: format!("unknown nomenclature '{}' (expected POP or FOR)", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nomenclature_display() {
        assert_eq!(Nomenclature::Population.to_string(), "POP");
        assert_eq!(Nomenclature::Forensic.to_string(), "FOR");
    }

    #[test]
    fn test_nomenclature_from_str() {
        assert_eq!("for".parse::<Nomenclature>().unwrap(), Nomenclature::Forensic);
        assert_eq!(" Pop ".parse::<Nomenclature>().unwrap(), Nomenclature::Population);
        assert!(matches!(
            "xyz".parse::<Nomenclature>(),
            Err(HaploError::Config { .. })
        ));
    }

    #[test]
    fn test_nomenclature_serde() {
        assert_eq!(
            serde_json::to_string(&Nomenclature::Forensic).unwrap(),
            "\"FOR\""
        );
    }
}
