//! Alignment pre-pass
//!
//! Insertions are declared against a reference that has no columns for them
//! yet. Before any record is rebuilt, every insertion token of the batch is
//! given a gap column in the reference, so that all records share a single
//! coordinate frame.

use crate::error::HaploError;
use crate::notation::{parse_insertion, Mutation, MutationKind, Nomenclature};
use crate::reference::Reference;

/// Make room in `reference` for one insertion token.
///
/// The first inserted base belongs `offset` columns after the anchor column;
/// each following base takes the next column. A gap is spliced in wherever
/// that column is not already a gap. Returns the number of gaps added.
///
/// The first slot must lie within the reference or directly after its last
/// column; an offset reaching further fails with `PositionNotFound`.
pub fn reserve_insertion(reference: &mut Reference, mutation: &Mutation) -> Result<usize, HaploError> {
    let MutationKind::Insertion { offset, bases } = &mutation.kind else {
        return Ok(0);
    };
    let anchor = reference.locate(mutation.position)?;
    let mut index = usize::try_from(*offset)
        .ok()
        .and_then(|offset| anchor.checked_add(offset))
        .filter(|&index| index <= reference.len())
        .ok_or(HaploError::PositionNotFound {
            position: mutation.absolute_position(),
        })?;
    let mut added = 0;
    for _ in bases {
        if reference.needs_gap_at(index) {
            reference.insert_gap(index);
            added += 1;
        }
        index += 1;
    }
    Ok(added)
}

/// Extend `reference` with every gap column implied by the insertion tokens
/// of `payloads`, given as `(line number, haplotype)` pairs.
///
/// Tokens that are not insertions, or do not parse at all, are skipped here;
/// they are reported when their record is rebuilt. An insertion anchored
/// outside the reference numbering fails with the payload's line number.
pub fn align_reference<'a, I>(
    reference: &mut Reference,
    nomenclature: Nomenclature,
    payloads: I,
) -> Result<usize, HaploError>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut added = 0;
    for (line, payload) in payloads {
        for token in payload.split_whitespace() {
            if let Some(mutation) = parse_insertion(nomenclature, token) {
                added += reserve_insertion(reference, &mutation)
                    .map_err(|e| HaploError::data(line, e))?;
            }
        }
    }
    if added > 0 {
        log::debug!(
            "added {} gap column(s) to reference {} for insertions",
            added,
            reference.id()
        );
    }
    Ok(added)
}
