//! Haplotype generation from aligned sequences.
//!
//! This module compares a target sequence column by column with an aligned
//! reference of the same length and renders the differences in either
//! nomenclature.
//!
//! # Example
//!
//! ```
//! use haplosearch::encode::HaplotypeEncoder;
//! use haplosearch::notation::{FormatFlags, Nomenclature};
//! use haplosearch::reference::Reference;
//!
//! let reference = Reference::new("rCRS", "ACG--TTA", 100);
//! let encoder = HaplotypeEncoder::new(&reference, Nomenclature::Population, FormatFlags::new());
//!
//! assert_eq!(encoder.encode(b"GCGCCTTA"), "100 102iCC");
//! assert_eq!(encoder.encode(b"ACG--TTA"), "rCRS");
//! ```

mod classify;

pub use classify::{classify_column, ColumnChange};

use crate::notation::{
    compress_ranges, ChangeKind, DeletedBases, FormatFlags, Mutation, MutationKind, Nomenclature,
};
use crate::reference::Reference;
use crate::sequence::Base;

/// Differences between one target and the reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Haplotype {
    /// Tokens in column order, already merged per nomenclature.
    pub mutations: Vec<Mutation>,
    /// Reference positions of unreadable target symbols, in column order.
    pub missing: Vec<u64>,
}

impl Haplotype {
    /// True if the target is identical to the reference.
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty() && self.missing.is_empty()
    }

    /// Render as a haplotype string.
    ///
    /// Tokens are space-joined, missing positions are appended as
    /// `  MISSING: [..]`, and an empty difference renders as `reference_id`.
    pub fn render(
        &self,
        nomenclature: Nomenclature,
        flags: &FormatFlags,
        reference_id: &str,
    ) -> String {
        if self.is_empty() {
            return reference_id.to_string();
        }
        let mut out = self
            .mutations
            .iter()
            .filter_map(|m| m.format(nomenclature, flags))
            .collect::<Vec<_>>()
            .join(" ");
        if !self.missing.is_empty() {
            out.push_str("  MISSING: ");
            out.push_str(&compress_ranges(&self.missing));
        }
        out.trim().to_string()
    }
}

/// Compares aligned sequences against one reference.
#[derive(Debug, Clone)]
pub struct HaplotypeEncoder<'a> {
    reference: &'a Reference,
    nomenclature: Nomenclature,
    flags: FormatFlags,
}

impl<'a> HaplotypeEncoder<'a> {
    pub fn new(reference: &'a Reference, nomenclature: Nomenclature, flags: FormatFlags) -> Self {
        Self {
            reference,
            nomenclature,
            flags,
        }
    }

    pub fn nomenclature(&self) -> Nomenclature {
        self.nomenclature
    }

    /// Collect the differences of `target` from the reference.
    ///
    /// `target` must be aligned to the reference; columns past the shorter of
    /// the two are ignored.
    ///
    /// In population notation consecutive insertion columns merge into one
    /// token keyed on the anchor, and consecutive deletion columns merge
    /// likewise. In forensic notation every inserted base is its own token,
    /// numbered from 1 within its run.
    pub fn diff(&self, target: &[u8]) -> Haplotype {
        let mut haplotype = Haplotype::default();
        // Kind of the immediately preceding column's change
        let mut last: Option<ChangeKind> = None;

        for (index, (&reference, &symbol)) in
            self.reference.symbols().iter().zip(target).enumerate()
        {
            let Some(position) = self.reference.position_at(index) else {
                break;
            };
            let change = classify_column(reference, symbol);
            let continues_run = change.map(|c| c.kind()).is_some_and(|k| Some(k) == last);

            match change {
                Some(ColumnChange::Transition(base)) => haplotype
                    .mutations
                    .push(Mutation::transition(position, Some(base))),
                Some(ColumnChange::Transversion(base)) => haplotype
                    .mutations
                    .push(Mutation::transversion(position, base)),
                Some(ColumnChange::Heteroplasmy(base)) => haplotype
                    .mutations
                    .push(Mutation::heteroplasmy(position, base)),
                Some(ColumnChange::Insertion(base)) => {
                    self.push_insertion(&mut haplotype.mutations, position, base, continues_run)
                }
                Some(ColumnChange::Deletion(base)) => {
                    self.push_deletion(&mut haplotype.mutations, position, base, continues_run)
                }
                Some(ColumnChange::Missing) => haplotype.missing.push(position),
                None => {}
            }
            last = change.map(|c| c.kind());
        }

        haplotype
    }

    fn push_insertion(
        &self,
        mutations: &mut Vec<Mutation>,
        position: u64,
        base: Base,
        continues_run: bool,
    ) {
        let run_offset = match mutations.last() {
            Some(Mutation {
                kind: MutationKind::Insertion { offset, .. },
                ..
            }) if continues_run => Some(*offset),
            _ => None,
        };
        match (self.nomenclature, run_offset) {
            (Nomenclature::Population, Some(_)) => {
                if let Some(Mutation {
                    kind: MutationKind::Insertion { bases, .. },
                    ..
                }) = mutations.last_mut()
                {
                    bases.push(base);
                }
            }
            (Nomenclature::Forensic, Some(offset)) => {
                mutations.push(Mutation::insertion(position, offset + 1, vec![base]))
            }
            (_, None) => mutations.push(Mutation::insertion(position, 1, vec![base])),
        }
    }

    fn push_deletion(
        &self,
        mutations: &mut Vec<Mutation>,
        position: u64,
        base: Base,
        continues_run: bool,
    ) {
        if continues_run && self.nomenclature == Nomenclature::Population {
            if let Some(Mutation {
                kind:
                    MutationKind::Deletion {
                        bases: DeletedBases::Known(bases),
                    },
                ..
            }) = mutations.last_mut()
            {
                bases.push(base);
                return;
            }
        }
        mutations.push(Mutation::deletion(position, DeletedBases::Known(vec![base])));
    }

    /// Render the haplotype string of `target`.
    pub fn encode(&self, target: &[u8]) -> String {
        self.diff(target)
            .render(self.nomenclature, &self.flags, self.reference.id())
    }
}
