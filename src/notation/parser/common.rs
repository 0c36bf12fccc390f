//! Shared token pieces: positions and bases

use crate::sequence::Base;
use nom::{
    character::complete::{anychar, digit1},
    combinator::{map_opt, map_res},
    multi::many1,
    IResult, Parser,
};

/// Parse a non-negative decimal position.
///
/// Overflowing `u64` is an error, never a silent wrap.
#[inline]
pub fn parse_position(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |s: &str| s.parse::<u64>()).parse(input)
}

/// Parse one of A, C, G, T.
#[inline]
pub fn parse_nucleotide(input: &str) -> IResult<&str, Base> {
    map_opt(anychar, |c| Base::from_char(c).filter(|b| !b.is_ambiguity())).parse(input)
}

/// Parse A, C, G, T or an IUPAC ambiguity code.
#[inline]
pub fn parse_any_base(input: &str) -> IResult<&str, Base> {
    map_opt(anychar, Base::from_char).parse(input)
}

/// Parse one or more of A, C, G, T.
pub fn parse_nucleotides(input: &str) -> IResult<&str, Vec<Base>> {
    many1(parse_nucleotide).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        assert_eq!(parse_position("16519C"), Ok(("C", 16519)));
        assert_eq!(parse_position("0"), Ok(("", 0)));
        assert!(parse_position("C16519").is_err());
        assert!(parse_position("99999999999999999999999").is_err());
    }

    #[test]
    fn test_nucleotide() {
        assert_eq!(parse_nucleotide("A"), Ok(("", Base::A)));
        assert!(parse_nucleotide("N").is_err());
        assert!(parse_nucleotide("a").is_err());
        assert!(parse_nucleotide("").is_err());
    }

    #[test]
    fn test_any_base() {
        assert_eq!(parse_any_base("Y"), Ok(("", Base::Y)));
        assert!(parse_any_base("Q").is_err());
    }

    #[test]
    fn test_nucleotides() {
        assert_eq!(
            parse_nucleotides("CCT rest"),
            Ok((" rest", vec![Base::C, Base::C, Base::T]))
        );
        assert!(parse_nucleotides("").is_err());
    }
}
