//! Population genetics grammar
//!
//! | Token | Class |
//! |-------|-------|
//! | `73` | transition |
//! | `16182C`, `16093Y` | transversion (any base or ambiguity code) |
//! | `309iCC` | insertion after 309 |
//! | `249dA` | deletion of the named reference bases |

use super::common::{parse_any_base, parse_nucleotides, parse_position};
use crate::notation::mutation::{DeletedBases, Mutation};
use nom::{
    branch::alt,
    character::complete::char,
    combinator::{all_consuming, map},
    sequence::preceded,
    IResult, Parser,
};

fn parse_insertion(input: &str) -> IResult<&str, Mutation> {
    map(
        (parse_position, preceded(char('i'), parse_nucleotides)),
        |(pos, bases)| Mutation::insertion(pos, 1, bases),
    )
    .parse(input)
}

fn parse_deletion(input: &str) -> IResult<&str, Mutation> {
    map(
        (parse_position, preceded(char('d'), parse_nucleotides)),
        |(pos, bases)| Mutation::deletion(pos, DeletedBases::Known(bases)),
    )
    .parse(input)
}

fn parse_transversion(input: &str) -> IResult<&str, Mutation> {
    map((parse_position, parse_any_base), |(pos, base)| {
        Mutation::transversion(pos, base)
    })
    .parse(input)
}

fn parse_transition(input: &str) -> IResult<&str, Mutation> {
    map(parse_position, |pos| Mutation::transition(pos, None)).parse(input)
}

/// Parse one whole population-notation token.
pub fn parse_token(input: &str) -> IResult<&str, Mutation> {
    alt((
        all_consuming(parse_insertion),
        all_consuming(parse_deletion),
        all_consuming(parse_transversion),
        all_consuming(parse_transition),
    ))
    .parse(input)
}
