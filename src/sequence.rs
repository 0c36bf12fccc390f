//! Nucleotide symbols and aligned sequences
//!
//! Sequence buffers are plain bytes. The alphabet of an aligned sequence is
//! A, C, G, T, the gap symbol `-` and the eleven IUPAC ambiguity codes, but
//! classification accepts any byte so that unreadable positions can be
//! reported as missing rather than rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gap symbol used in aligned sequences.
pub const GAP: u8 = b'-';

/// Nucleotide base or IUPAC ambiguity code
///
/// Uses `#[repr(u8)]` with ASCII discriminants for zero-cost `as u8` conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Base {
    // Standard bases
    A = b'A',
    C = b'C',
    G = b'G',
    T = b'T',

    // IUPAC ambiguity codes
    R = b'R', // A or G (puRine)
    Y = b'Y', // C or T (pYrimidine)
    S = b'S', // G or C (Strong)
    W = b'W', // A or T (Weak)
    K = b'K', // G or T (Keto)
    M = b'M', // A or C (aMino)
    B = b'B', // C, G, or T (not A)
    D = b'D', // A, G, or T (not C)
    H = b'H', // A, C, or T (not G)
    V = b'V', // A, C, or G (not T)
    N = b'N', // Any base
}

impl Base {
    /// Parse an uppercase ASCII byte.
    pub fn from_u8(b: u8) -> Option<Self> {
        match b {
            b'A' => Some(Base::A),
            b'C' => Some(Base::C),
            b'G' => Some(Base::G),
            b'T' => Some(Base::T),
            b'R' => Some(Base::R),
            b'Y' => Some(Base::Y),
            b'S' => Some(Base::S),
            b'W' => Some(Base::W),
            b'K' => Some(Base::K),
            b'M' => Some(Base::M),
            b'B' => Some(Base::B),
            b'D' => Some(Base::D),
            b'H' => Some(Base::H),
            b'V' => Some(Base::V),
            b'N' => Some(Base::N),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii() {
            Self::from_u8(c as u8)
        } else {
            None
        }
    }

    /// Convert to ASCII character. Zero-cost due to `#[repr(u8)]`.
    #[inline]
    pub fn to_char(self) -> char {
        self as u8 as char
    }

    /// Convert to ASCII byte. Zero-cost due to `#[repr(u8)]`.
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// True for R, Y, S, W, K, M, B, D, H, V and N.
    #[inline]
    pub fn is_ambiguity(self) -> bool {
        !matches!(self, Base::A | Base::C | Base::G | Base::T)
    }

    /// The base reached by a transition (purine <-> purine, pyrimidine <-> pyrimidine).
    pub fn transition_partner(self) -> Option<Base> {
        match self {
            Base::A => Some(Base::G),
            Base::G => Some(Base::A),
            Base::C => Some(Base::T),
            Base::T => Some(Base::C),
            _ => None,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// True for A, C, G and T.
#[inline]
pub const fn is_nucleotide(b: u8) -> bool {
    matches!(b, b'A' | b'C' | b'G' | b'T')
}

/// True for the eleven IUPAC ambiguity codes.
#[inline]
pub const fn is_ambiguity_code(b: u8) -> bool {
    matches!(
        b,
        b'R' | b'Y' | b'S' | b'W' | b'K' | b'M' | b'B' | b'D' | b'H' | b'V' | b'N'
    )
}

#[inline]
pub const fn is_gap(b: u8) -> bool {
    b == GAP
}

/// True for A/G and C/T pairs in either order.
#[inline]
pub const fn is_transition(reference: u8, target: u8) -> bool {
    matches!(
        (reference, target),
        (b'A', b'G') | (b'G', b'A') | (b'C', b'T') | (b'T', b'C')
    )
}

/// True for purine/pyrimidine exchanges between unambiguous bases.
#[inline]
pub const fn is_transversion(reference: u8, target: u8) -> bool {
    matches!(
        (reference, target),
        (b'A', b'T')
            | (b'T', b'A')
            | (b'A', b'C')
            | (b'C', b'A')
            | (b'G', b'T')
            | (b'T', b'G')
            | (b'G', b'C')
            | (b'C', b'G')
    )
}

/// Identifier plus aligned symbol buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub id: String,
    symbols: Vec<u8>,
}

impl Sequence {
    pub fn new(id: impl Into<String>, symbols: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            symbols: symbols.into(),
        }
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut Vec<u8> {
        &mut self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols with every gap column removed.
    pub fn ungapped(&self) -> String {
        self.symbols
            .iter()
            .filter(|&&b| !is_gap(b))
            .map(|&b| b as char)
            .collect()
    }

    /// Symbols as text, gaps included.
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.symbols).into_owned()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ">{}\n{}", self.id, self.as_string())
    }
}
