//! Mutation token types
//!
//! A [`Mutation`] is one positional difference from the reference, either
//! parsed from a haplotype string or produced by comparing two aligned
//! sequences. Positions are always reference-numbered.

use crate::sequence::Base;
use serde::{Deserialize, Serialize};

/// The six mutation classes, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    Transition,
    Transversion,
    Heteroplasmy,
    Insertion,
    Deletion,
    Missing,
}

/// Identity of deleted bases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeletedBases {
    /// The reference bases removed, in order.
    Known(Vec<Base>),
    /// A single base whose identity the notation does not carry.
    Unknown,
}

impl DeletedBases {
    /// Number of reference columns removed.
    pub fn len(&self) -> usize {
        match self {
            DeletedBases::Known(bases) => bases.len(),
            DeletedBases::Unknown => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Payload of a mutation token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MutationKind {
    /// Purine/purine or pyrimidine/pyrimidine exchange.
    ///
    /// Population notation writes only the position, so a parsed token has no
    /// base; it is derived from the reference when the token is applied.
    Transition { base: Option<Base> },
    /// Purine/pyrimidine exchange, or any explicit base in forensic notation.
    Transversion { base: Base },
    /// Mixed base call written as an IUPAC ambiguity code.
    Heteroplasmy { base: Base },
    /// Bases inserted after the anchor.
    ///
    /// The first base occupies the `offset`-th column after the anchor
    /// column; population tokens always start at offset 1.
    Insertion { offset: u64, bases: Vec<Base> },
    /// Reference bases removed starting at the position.
    Deletion { bases: DeletedBases },
    /// Unreadable symbol in the target sequence.
    Missing,
}

/// A single positional difference from the reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mutation {
    /// Reference position; for insertions, the anchor position.
    pub position: u64,
    #[serde(flatten)]
    pub kind: MutationKind,
}

impl Mutation {
    pub fn new(position: u64, kind: MutationKind) -> Self {
        Self { position, kind }
    }

    pub fn transition(position: u64, base: Option<Base>) -> Self {
        Self::new(position, MutationKind::Transition { base })
    }

    pub fn transversion(position: u64, base: Base) -> Self {
        Self::new(position, MutationKind::Transversion { base })
    }

    pub fn heteroplasmy(position: u64, base: Base) -> Self {
        Self::new(position, MutationKind::Heteroplasmy { base })
    }

    pub fn insertion(position: u64, offset: u64, bases: Vec<Base>) -> Self {
        Self::new(position, MutationKind::Insertion { offset, bases })
    }

    pub fn deletion(position: u64, bases: DeletedBases) -> Self {
        Self::new(position, MutationKind::Deletion { bases })
    }

    pub fn missing(position: u64) -> Self {
        Self::new(position, MutationKind::Missing)
    }

    pub fn change_kind(&self) -> ChangeKind {
        match self.kind {
            MutationKind::Transition { .. } => ChangeKind::Transition,
            MutationKind::Transversion { .. } => ChangeKind::Transversion,
            MutationKind::Heteroplasmy { .. } => ChangeKind::Heteroplasmy,
            MutationKind::Insertion { .. } => ChangeKind::Insertion,
            MutationKind::Deletion { .. } => ChangeKind::Deletion,
            MutationKind::Missing => ChangeKind::Missing,
        }
    }

    /// Reference-relative position the token describes.
    ///
    /// Equal to `position` except for insertions, where it is
    /// `anchor + offset - 1`.
    pub fn absolute_position(&self) -> u64 {
        match &self.kind {
            MutationKind::Insertion { offset, .. } => {
                self.position.saturating_add(*offset).saturating_sub(1)
            }
            _ => self.position,
        }
    }
}
