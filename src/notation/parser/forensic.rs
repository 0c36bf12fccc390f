//! Forensic genetics grammar
//!
//! | Token | Class |
//! |-------|-------|
//! | `73G`, `16182C`, `16093Y` | substitution (stored as transversion) |
//! | `309.1C` | first base inserted after 309 |
//! | `249del`, `249d` | deletion, base identity unknown |
//!
//! Forensic notation does not separate transitions, transversions and
//! heteroplasmies; every explicit base parses as a transversion.

use super::common::{parse_any_base, parse_nucleotide, parse_position};
use crate::notation::mutation::{DeletedBases, Mutation};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{all_consuming, map, verify},
    sequence::preceded,
    IResult, Parser,
};

fn parse_substitution(input: &str) -> IResult<&str, Mutation> {
    map((parse_position, parse_any_base), |(pos, base)| {
        Mutation::transversion(pos, base)
    })
    .parse(input)
}

fn parse_insertion(input: &str) -> IResult<&str, Mutation> {
    map(
        (
            parse_position,
            // Offsets are 1-based within the run at the anchor
            preceded(char('.'), verify(parse_position, |offset: &u64| *offset > 0)),
            parse_nucleotide,
        ),
        |(anchor, offset, base)| Mutation::insertion(anchor, offset, vec![base]),
    )
    .parse(input)
}

fn parse_deletion(input: &str) -> IResult<&str, Mutation> {
    map((parse_position, alt((tag("del"), tag("d")))), |(pos, _)| {
        Mutation::deletion(pos, DeletedBases::Unknown)
    })
    .parse(input)
}

/// Parse one whole forensic-notation token.
pub fn parse_token(input: &str) -> IResult<&str, Mutation> {
    alt((
        all_consuming(parse_substitution),
        all_consuming(parse_insertion),
        all_consuming(parse_deletion),
    ))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::mutation::MutationKind;
    use crate::sequence::Base;

    fn parse(s: &str) -> Option<Mutation> {
        parse_token(s).ok().map(|(_, m)| m)
    }

    #[test]
    fn test_substitution() {
        assert_eq!(parse("73G"), Some(Mutation::transversion(73, Base::G)));
        assert_eq!(parse("16093N"), Some(Mutation::transversion(16093, Base::N)));
    }

    #[test]
    fn test_insertion() {
        let m = parse("50.3C").unwrap();
        assert_eq!(m.position, 50);
        assert_eq!(
            m.kind,
            MutationKind::Insertion {
                offset: 3,
                bases: vec![Base::C]
            }
        );
        assert_eq!(m.absolute_position(), 52);
    }

    #[test]
    fn test_deletion() {
        assert_eq!(
            parse("249del"),
            Some(Mutation::deletion(249, DeletedBases::Unknown))
        );
        assert_eq!(
            parse("249d"),
            Some(Mutation::deletion(249, DeletedBases::Unknown))
        );
    }

    #[test]
    fn test_rejects() {
        for token in ["73", "12Q", "50.0A", "50.1", "50.1AC", "50.1N", "249dA", "249dl", "309iC", ".1A"] {
            assert_eq!(parse(token), None, "{token} should not parse");
        }
    }
}
