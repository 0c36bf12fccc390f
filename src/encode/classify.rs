//! Column classification for haplotype generation.
//!
//! Classifies one aligned (reference, target) column into a mutation class.

use crate::notation::ChangeKind;
use crate::sequence::{is_ambiguity_code, is_gap, is_nucleotide, is_transition, is_transversion, Base};

/// Difference found in a single aligned column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnChange {
    /// A<->G or C<->T; carries the target base.
    Transition(Base),
    /// Purine<->pyrimidine; carries the target base.
    Transversion(Base),
    /// Target is an IUPAC ambiguity code.
    Heteroplasmy(Base),
    /// Reference gap, target base.
    Insertion(Base),
    /// Reference base, target gap; carries the reference base.
    Deletion(Base),
    /// Target symbol is unreadable.
    Missing,
}

impl ColumnChange {
    pub fn kind(&self) -> ChangeKind {
        match self {
            ColumnChange::Transition(_) => ChangeKind::Transition,
            ColumnChange::Transversion(_) => ChangeKind::Transversion,
            ColumnChange::Heteroplasmy(_) => ChangeKind::Heteroplasmy,
            ColumnChange::Insertion(_) => ChangeKind::Insertion,
            ColumnChange::Deletion(_) => ChangeKind::Deletion,
            ColumnChange::Missing => ChangeKind::Missing,
        }
    }
}

/// Classify an aligned column.
///
/// Rules apply in order: transition, transversion, heteroplasmy, insertion,
/// deletion, missing. Identical columns (including gap/gap) yield `None`.
///
/// # Examples
///
/// ```
/// use haplosearch::encode::{classify_column, ColumnChange};
/// use haplosearch::sequence::Base;
///
/// assert_eq!(classify_column(b'A', b'G'), Some(ColumnChange::Transition(Base::G)));
/// assert_eq!(classify_column(b'-', b'C'), Some(ColumnChange::Insertion(Base::C)));
/// assert_eq!(classify_column(b'T', b'T'), None);
/// ```
pub fn classify_column(reference: u8, target: u8) -> Option<ColumnChange> {
    if is_transition(reference, target) {
        return Base::from_u8(target).map(ColumnChange::Transition);
    }
    if is_transversion(reference, target) {
        return Base::from_u8(target).map(ColumnChange::Transversion);
    }
    if is_ambiguity_code(target) {
        return Base::from_u8(target).map(ColumnChange::Heteroplasmy);
    }
    if is_gap(reference) && is_nucleotide(target) {
        return Base::from_u8(target).map(ColumnChange::Insertion);
    }
    if is_nucleotide(reference) && is_gap(target) {
        return Base::from_u8(reference).map(ColumnChange::Deletion);
    }
    if !is_nucleotide(target) && !is_gap(target) {
        return Some(ColumnChange::Missing);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        for (r, t) in [(b'A', b'G'), (b'G', b'A'), (b'C', b'T'), (b'T', b'C')] {
            assert_eq!(classify_column(r, t).map(|c| c.kind()), Some(ChangeKind::Transition));
        }
    }

    #[test]
    fn test_transversions() {
        for (r, t) in [(b'A', b'T'), (b'C', b'A'), (b'G', b'T'), (b'G', b'C')] {
            assert_eq!(
                classify_column(r, t).map(|c| c.kind()),
                Some(ChangeKind::Transversion)
            );
        }
    }

    #[test]
    fn test_heteroplasmy() {
        assert_eq!(
            classify_column(b'C', b'Y'),
            Some(ColumnChange::Heteroplasmy(Base::Y))
        );
        // Ambiguity over a reference gap is still a heteroplasmy
        assert_eq!(
            classify_column(b'-', b'N'),
            Some(ColumnChange::Heteroplasmy(Base::N))
        );
    }

    #[test]
    fn test_indels() {
        assert_eq!(classify_column(b'-', b'A'), Some(ColumnChange::Insertion(Base::A)));
        assert_eq!(classify_column(b'G', b'-'), Some(ColumnChange::Deletion(Base::G)));
    }

    #[test]
    fn test_missing() {
        assert_eq!(classify_column(b'A', b'?'), Some(ColumnChange::Missing));
        assert_eq!(classify_column(b'-', b'X'), Some(ColumnChange::Missing));
    }

    #[test]
    fn test_identical() {
        assert_eq!(classify_column(b'A', b'A'), None);
        assert_eq!(classify_column(b'-', b'-'), None);
    }
}
