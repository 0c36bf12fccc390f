//! Haplotype token parser using nom
//!
//! Each nomenclature has its own grammar; a token must be consumed in full by
//! one rule or it is rejected with [`HaploError::UnknownNotation`].

pub mod common;
pub mod forensic;
pub mod population;

use super::mutation::{Mutation, MutationKind};
use super::Nomenclature;
use crate::error::HaploError;

/// Parse a single mutation token.
///
/// # Example
///
/// ```
/// use haplosearch::notation::{parse_token, Nomenclature};
///
/// let m = parse_token(Nomenclature::Population, "309iCC").unwrap();
/// assert_eq!(m.position, 309);
/// assert!(parse_token(Nomenclature::Population, "12Q").is_err());
/// ```
pub fn parse_token(nomenclature: Nomenclature, token: &str) -> Result<Mutation, HaploError> {
    let result = match nomenclature {
        Nomenclature::Population => population::parse_token(token),
        Nomenclature::Forensic => forensic::parse_token(token),
    };
    result
        .map(|(_, mutation)| mutation)
        .map_err(|_| HaploError::UnknownNotation {
            token: token.to_string(),
        })
}

/// Parse a whitespace-separated haplotype string.
///
/// Stops at the first token that fails to parse.
pub fn parse_haplotype(
    nomenclature: Nomenclature,
    haplotype: &str,
) -> Result<Vec<Mutation>, HaploError> {
    haplotype
        .split_whitespace()
        .map(|token| parse_token(nomenclature, token))
        .collect()
}

/// Parse `token` only if it is an insertion; anything else yields `None`.
pub fn parse_insertion(nomenclature: Nomenclature, token: &str) -> Option<Mutation> {
    parse_token(nomenclature, token)
        .ok()
        .filter(|m| matches!(m.kind, MutationKind::Insertion { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::mutation::DeletedBases;
    use crate::sequence::Base;

    #[test]
    fn test_unknown_notation() {
        assert_eq!(
            parse_token(Nomenclature::Population, "12Q"),
            Err(HaploError::UnknownNotation {
                token: "12Q".to_string()
            })
        );
        assert!(parse_token(Nomenclature::Forensic, "12Q").is_err());
    }

    #[test]
    fn test_parse_haplotype() {
        let tokens = parse_haplotype(Nomenclature::Population, " 73  263 309iC 16519C ").unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0], Mutation::transition(73, None));
        assert_eq!(tokens[3], Mutation::transversion(16519, Base::C));
    }

    #[test]
    fn test_parse_haplotype_forensic() {
        let tokens = parse_haplotype(Nomenclature::Forensic, "73G 249del 309.1C").unwrap();
        assert_eq!(tokens[1], Mutation::deletion(249, DeletedBases::Unknown));
    }

    #[test]
    fn test_parse_haplotype_error_names_token() {
        let err = parse_haplotype(Nomenclature::Forensic, "73G 249x 309.1C").unwrap_err();
        assert_eq!(
            err,
            HaploError::UnknownNotation {
                token: "249x".to_string()
            }
        );
    }

    #[test]
    fn test_parse_insertion_filter() {
        assert!(parse_insertion(Nomenclature::Population, "309iC").is_some());
        assert!(parse_insertion(Nomenclature::Population, "309").is_none());
        assert!(parse_insertion(Nomenclature::Population, "309.1C").is_none());
        assert!(parse_insertion(Nomenclature::Forensic, "309.1C").is_some());
        assert!(parse_insertion(Nomenclature::Forensic, "garbage").is_none());
    }
}
