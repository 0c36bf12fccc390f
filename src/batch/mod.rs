//! Batch conversion of haplotype and sequence files.
//!
//! A batch file is line oriented:
//!
//! ```text
//! START: <int>[ flags]
//! >reference id
//! REFERENCE SEQUENCE
//! >record id
//! SEQUENCE or HAPLOTYPE
//! ...
//! ```
//!
//! Records run until a blank line or end of input. Sequence-to-haplotype runs
//! stream records through the encoder; haplotype-to-sequence runs first read
//! every record so the alignment pre-pass can see all insertions.
//!
//! # Example
//!
//! ```
//! use haplosearch::batch::{convert_str, ConvertOptions, Direction};
//! use haplosearch::notation::Nomenclature;
//!
//! let input = "START: 1\n>rCRS\nACGT\n>s1\n2.1T 4C\n";
//! let options = ConvertOptions::new(Nomenclature::Forensic, Direction::HaplotypeToSequence);
//! let conversion = convert_str(input, &options).unwrap();
//! assert_eq!(conversion.output, "START: 1\n>rCRS\nAC-GT\n>s1\nACTGC\n");
//! ```

mod header;
mod processor;
mod record;

pub use header::BatchHeader;
pub use processor::{convert_file, convert_str, Conversion, ConversionSummary, ConvertOptions};
pub use record::{parse_id_line, parse_sequence, Alphabet, Record, RecordReader};

use crate::error::HaploError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which way a batch is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Aligned sequences in, haplotypes out (`S2H`)
    #[default]
    #[serde(rename = "S2H")]
    SequenceToHaplotype,
    /// Haplotypes in, aligned sequences out (`H2S`)
    #[serde(rename = "H2S")]
    HaplotypeToSequence,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::SequenceToHaplotype => "S2H",
            Direction::HaplotypeToSequence => "H2S",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = HaploError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S2H" => Ok(Direction::SequenceToHaplotype),
            "H2S" => Ok(Direction::HaplotypeToSequence),
            other => Err(HaploError::Config {
                msg: format!("unknown direction '{}' (expected S2H or H2S)", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_round_trip() {
        for direction in [Direction::SequenceToHaplotype, Direction::HaplotypeToSequence] {
            assert_eq!(direction.to_string().parse::<Direction>().unwrap(), direction);
        }
        assert_eq!("h2s".parse::<Direction>().unwrap(), Direction::HaplotypeToSequence);
        assert!(matches!("both".parse::<Direction>(), Err(HaploError::Config { .. })));
    }
}
