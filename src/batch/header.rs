//! `START:` header line

use crate::error::HaploError;
use crate::notation::parser::common::parse_position;
use crate::notation::FormatFlags;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, space0},
    combinator::{all_consuming, map, opt},
    IResult, Parser,
};

const BOM: char = '\u{feff}';

/// Parsed first line of a batch file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchHeader {
    /// Reference position of the first reference column.
    pub start: u64,
    pub flags: FormatFlags,
}

impl BatchHeader {
    pub fn new(start: u64) -> Self {
        Self {
            start,
            flags: FormatFlags::default(),
        }
    }

    /// Parse a header line.
    ///
    /// Accepts `START *: *<int> *<flags>? *` where flags are `*`, `d`, `*d`
    /// or `d*`. A leading byte-order mark and surrounding whitespace are
    /// ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use haplosearch::batch::BatchHeader;
    ///
    /// let header = BatchHeader::parse("START: 16024 *d").unwrap();
    /// assert_eq!(header.start, 16024);
    /// assert!(header.flags.three_digit_padding);
    /// assert!(BatchHeader::parse("BEGIN: 1").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Self, HaploError> {
        let line = line.trim_start_matches(BOM).trim();
        all_consuming(parse_header)
            .parse(line)
            .map(|(_, header)| header)
            .map_err(|_| HaploError::HeaderMissingOrMalformed)
    }

    /// The header as written to output: always the bare form.
    pub fn to_line(&self) -> String {
        format!("START: {}", self.start)
    }
}

fn parse_flags(input: &str) -> IResult<&str, FormatFlags> {
    map(
        alt((tag("*d"), tag("d*"), tag("*"), tag("d"))),
        |flags: &str| {
            FormatFlags::new()
                .with_padding(flags.contains('*'))
                .with_short_deletions(flags.contains('d'))
        },
    )
    .parse(input)
}

fn parse_header(input: &str) -> IResult<&str, BatchHeader> {
    map(
        (
            tag("START"),
            space0,
            char(':'),
            space0,
            parse_position,
            space0,
            opt(parse_flags),
            space0,
        ),
        |(_, _, _, _, start, _, flags, _)| BatchHeader {
            start,
            flags: flags.unwrap_or_default(),
        },
    )
    .parse(input)
}
