// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! haplosearch: mitochondrial haplotype notation converter
//!
//! Converts between aligned DNA sequences and haplotypes, the compact lists
//! of differences from a reference, in population genetics (`POP`) or
//! forensic genetics (`FOR`) notation.
//!
//! # Example
//!
//! ```
//! use haplosearch::{Decoder, FormatFlags, HaplotypeEncoder, Nomenclature, Reference};
//!
//! // Encode an aligned sequence as a haplotype
//! let reference = Reference::new("rCRS", "ACGTACGT", 16024);
//! let encoder = HaplotypeEncoder::new(&reference, Nomenclature::Forensic, FormatFlags::new());
//! let haplotype = encoder.encode(b"ACGTGC-T");
//! assert_eq!(haplotype, "16028G 16030del");
//!
//! // And rebuild the sequence from it
//! let decoder = Decoder::prepare(
//!     Reference::new("rCRS", "ACGTACGT", 16024),
//!     Nomenclature::Forensic,
//!     [(1, haplotype.as_str())],
//! )
//! .unwrap();
//! assert_eq!(decoder.decode(&haplotype).unwrap(), b"ACGTGC-T");
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod coords;
pub mod decode;
pub mod encode;
pub mod error;
pub mod notation;
pub mod reference;
pub mod sequence;

// Re-export commonly used types
pub use batch::{convert_file, convert_str, ConversionSummary, ConvertOptions, Direction};
pub use coords::CoordinateMap;
pub use decode::Decoder;
pub use encode::{Haplotype, HaplotypeEncoder};
pub use error::{ErrorCode, HaploError};
pub use notation::{parse_haplotype, parse_token, FormatFlags, Mutation, MutationKind, Nomenclature};
pub use reference::Reference;
pub use sequence::{Base, Sequence};

/// Result type alias for haplosearch operations
pub type Result<T> = std::result::Result<T, HaploError>;
