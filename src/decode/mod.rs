//! Sequence reconstruction from haplotypes.
//!
//! Decoding is two-phase. [`Decoder::prepare`] runs the alignment pre-pass
//! over every haplotype of the batch, extending the reference with the gap
//! columns all of their insertions need. Only then can
//! [`Decoder::decode`] rebuild records, each against the same gapped frame.
//!
//! # Example
//!
//! ```
//! use haplosearch::decode::Decoder;
//! use haplosearch::notation::Nomenclature;
//! use haplosearch::reference::Reference;
//!
//! let reference = Reference::new("rCRS", "ACGTACGT", 1);
//! let haplotypes = ["1 3iTT", "8A"];
//! let decoder = Decoder::prepare(
//!     reference,
//!     Nomenclature::Population,
//!     haplotypes.iter().enumerate().map(|(i, h)| (i + 1, *h)),
//! )
//! .unwrap();
//!
//! assert_eq!(decoder.reference().symbols(), b"ACG--TACGT");
//! assert_eq!(decoder.decode("1 3iTT").unwrap(), b"GCGTTTACGT");
//! assert_eq!(decoder.decode("8A").unwrap(), b"ACG--TACGA");
//! ```

mod align;

pub use align::{align_reference, reserve_insertion};

use crate::error::HaploError;
use crate::notation::{parse_token, Mutation, MutationKind, Nomenclature};
use crate::reference::Reference;
use crate::sequence::{is_gap, Base, GAP};

/// Rebuilds gapped sequences from haplotypes against an aligned reference.
#[derive(Debug, Clone)]
pub struct Decoder {
    reference: Reference,
    nomenclature: Nomenclature,
    gaps_added: usize,
}

impl Decoder {
    /// Run the alignment pre-pass over every `(line, haplotype)` payload of
    /// the batch and return a decoder bound to the resulting frame.
    pub fn prepare<'a, I>(
        mut reference: Reference,
        nomenclature: Nomenclature,
        payloads: I,
    ) -> Result<Self, HaploError>
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let gaps_added = align_reference(&mut reference, nomenclature, payloads)?;
        Ok(Self {
            reference,
            nomenclature,
            gaps_added,
        })
    }

    /// The reference with every insertion gap column of the batch.
    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn nomenclature(&self) -> Nomenclature {
        self.nomenclature
    }

    /// Gap columns added by the pre-pass.
    pub fn gaps_added(&self) -> usize {
        self.gaps_added
    }

    /// Rebuild the full gapped sequence described by `haplotype`.
    ///
    /// A haplotype equal to the reference identifier is the reference itself.
    pub fn decode(&self, haplotype: &str) -> Result<Vec<u8>, HaploError> {
        let mut symbols = self.reference.symbols().to_vec();
        let haplotype = haplotype.trim();
        if haplotype == self.reference.id() {
            return Ok(symbols);
        }
        for token in haplotype.split_whitespace() {
            let mutation = parse_token(self.nomenclature, token)?;
            self.apply(&mut symbols, &mutation)?;
        }
        Ok(symbols)
    }

    fn apply(&self, symbols: &mut [u8], mutation: &Mutation) -> Result<(), HaploError> {
        let index = self.reference.locate(mutation.position)?;
        match &mutation.kind {
            MutationKind::Transition { base: Some(base) }
            | MutationKind::Transversion { base }
            | MutationKind::Heteroplasmy { base } => symbols[index] = base.to_u8(),
            MutationKind::Transition { base: None } => {
                let partner = Base::from_u8(self.reference.symbols()[index])
                    .and_then(Base::transition_partner);
                match partner {
                    Some(base) => symbols[index] = base.to_u8(),
                    None => log::warn!(
                        "transition at {} lands on non-base reference column {}",
                        mutation.position,
                        index
                    ),
                }
            }
            MutationKind::Insertion { offset, bases } => {
                let first = usize::try_from(*offset)
                    .ok()
                    .and_then(|offset| index.checked_add(offset));
                for (i, base) in bases.iter().enumerate() {
                    let column = first.and_then(|first| first.checked_add(i));
                    // Inserted bases may only fill gap columns of the frame
                    match column.and_then(|c| self.reference.symbols().get(c).map(|&b| (c, b))) {
                        Some((c, b)) if is_gap(b) => symbols[c] = base.to_u8(),
                        _ => {
                            return Err(HaploError::PositionNotFound {
                                position: mutation.absolute_position().saturating_add(i as u64),
                            })
                        }
                    }
                }
            }
            MutationKind::Deletion { bases } => {
                for i in 0..bases.len() {
                    let slot = symbols.get_mut(index + i).ok_or(HaploError::PositionNotFound {
                        position: mutation.position.saturating_add(i as u64),
                    })?;
                    *slot = GAP;
                }
            }
            MutationKind::Missing => {}
        }
        Ok(())
    }
}
