//! Token formatting for both nomenclatures
//!
//! | Class | Population | Forensic |
//! |-------|------------|----------|
//! | Transition | `73` | `73G` |
//! | Transversion | `16182C` | `16182C` |
//! | Heteroplasmy | `16093Y` | `16093Y` |
//! | Insertion | `309iCC` | `309.1C 309.2C` |
//! | Deletion | `249dA` | `249del` / `249d` |

use super::mutation::{DeletedBases, Mutation, MutationKind};
use super::Nomenclature;
use crate::sequence::Base;
use serde::{Deserialize, Serialize};

/// Rendering switches carried by the batch header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormatFlags {
    /// Zero-pad positions to three digits (`*` header flag).
    pub three_digit_padding: bool,
    /// Write forensic deletions as `d` instead of `del` (`d` header flag).
    pub deletions_as_short_form: bool,
}

impl FormatFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: bool) -> Self {
        self.three_digit_padding = padding;
        self
    }

    pub fn with_short_deletions(mut self, short: bool) -> Self {
        self.deletions_as_short_form = short;
        self
    }
}

/// Render a position, zero-padded to three digits when requested.
#[inline]
pub fn format_position(position: u64, padding: bool) -> String {
    if padding {
        format!("{:03}", position)
    } else {
        position.to_string()
    }
}

fn bases_to_string(bases: &[Base]) -> String {
    bases.iter().map(|b| b.to_char()).collect()
}

impl Mutation {
    /// Render this token in `nomenclature`.
    ///
    /// Returns `None` for tokens the nomenclature cannot express inline:
    /// missing positions (reported separately), a population deletion of
    /// unknown bases, and a forensic transition without its base.
    /// Forensic insertions and deletions spanning several bases expand to one
    /// space-separated token per base.
    pub fn format(&self, nomenclature: Nomenclature, flags: &FormatFlags) -> Option<String> {
        let pos = format_position(self.position, flags.three_digit_padding);
        match nomenclature {
            Nomenclature::Population => match &self.kind {
                MutationKind::Transition { .. } => Some(pos),
                MutationKind::Transversion { base } | MutationKind::Heteroplasmy { base } => {
                    Some(format!("{}{}", pos, base))
                }
                MutationKind::Insertion { bases, .. } => {
                    Some(format!("{}i{}", pos, bases_to_string(bases)))
                }
                MutationKind::Deletion {
                    bases: DeletedBases::Known(bases),
                } => Some(format!("{}d{}", pos, bases_to_string(bases))),
                MutationKind::Deletion {
                    bases: DeletedBases::Unknown,
                }
                | MutationKind::Missing => None,
            },
            Nomenclature::Forensic => match &self.kind {
                MutationKind::Transition { base: Some(base) }
                | MutationKind::Transversion { base }
                | MutationKind::Heteroplasmy { base } => Some(format!("{}{}", pos, base)),
                MutationKind::Transition { base: None } | MutationKind::Missing => None,
                MutationKind::Insertion { offset, bases } => Some(
                    bases
                        .iter()
                        .enumerate()
                        .map(|(i, base)| format!("{}.{}{}", pos, offset + i as u64, base))
                        .collect::<Vec<_>>()
                        .join(" "),
                ),
                MutationKind::Deletion { bases } => {
                    let marker = if flags.deletions_as_short_form {
                        "d"
                    } else {
                        "del"
                    };
                    Some(
                        (0..bases.len() as u64)
                            .map(|i| {
                                format!(
                                    "{}{}",
                                    format_position(self.position + i, flags.three_digit_padding),
                                    marker
                                )
                            })
                            .collect::<Vec<_>>()
                            .join(" "),
                    )
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_position() {
        assert_eq!(format_position(7, true), "007");
        assert_eq!(format_position(7, false), "7");
        assert_eq!(format_position(16519, true), "16519");
    }

    #[test]
    fn test_population_tokens() {
        let flags = FormatFlags::new();
        let pop = Nomenclature::Population;
        assert_eq!(
            Mutation::transition(73, Some(Base::G)).format(pop, &flags),
            Some("73".to_string())
        );
        assert_eq!(
            Mutation::transversion(16182, Base::C).format(pop, &flags),
            Some("16182C".to_string())
        );
        assert_eq!(
            Mutation::insertion(309, 1, vec![Base::C, Base::C]).format(pop, &flags),
            Some("309iCC".to_string())
        );
        assert_eq!(
            Mutation::deletion(249, DeletedBases::Known(vec![Base::A])).format(pop, &flags),
            Some("249dA".to_string())
        );
        assert_eq!(
            Mutation::deletion(249, DeletedBases::Unknown).format(pop, &flags),
            None
        );
        assert_eq!(Mutation::missing(3).format(pop, &flags), None);
    }

    #[test]
    fn test_forensic_tokens() {
        let flags = FormatFlags::new();
        let fr = Nomenclature::Forensic;
        assert_eq!(
            Mutation::transition(73, Some(Base::G)).format(fr, &flags),
            Some("73G".to_string())
        );
        assert_eq!(Mutation::transition(73, None).format(fr, &flags), None);
        assert_eq!(
            Mutation::insertion(50, 2, vec![Base::T]).format(fr, &flags),
            Some("50.2T".to_string())
        );
        assert_eq!(
            Mutation::insertion(50, 1, vec![Base::A, Base::C]).format(fr, &flags),
            Some("50.1A 50.2C".to_string())
        );
        assert_eq!(
            Mutation::deletion(249, DeletedBases::Unknown).format(fr, &flags),
            Some("249del".to_string())
        );
    }

    #[test]
    fn test_forensic_flags() {
        let flags = FormatFlags::new()
            .with_padding(true)
            .with_short_deletions(true);
        let fr = Nomenclature::Forensic;
        assert_eq!(
            Mutation::deletion(8, DeletedBases::Known(vec![Base::A, Base::T])).format(fr, &flags),
            Some("008d 009d".to_string())
        );
        assert_eq!(
            Mutation::insertion(5, 1, vec![Base::G]).format(fr, &flags),
            Some("005.1G".to_string())
        );
    }
}
