//! Id lines, sequence lines and the record stream

use crate::error::HaploError;
use crate::sequence::{is_ambiguity_code, is_gap, is_nucleotide};

/// Symbols a sequence line may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// `ACGT-`: reference of a sequence-to-haplotype run.
    Aligned,
    /// `ACGT`: reference of a haplotype-to-sequence run.
    Ungapped,
    /// `ACGT-` plus IUPAC ambiguity codes: data sequences.
    Sample,
}

impl Alphabet {
    pub fn allows(&self, b: u8) -> bool {
        match self {
            Alphabet::Aligned => is_nucleotide(b) || is_gap(b),
            Alphabet::Ungapped => is_nucleotide(b),
            Alphabet::Sample => is_nucleotide(b) || is_gap(b) || is_ambiguity_code(b),
        }
    }
}

/// Extract the identifier from a `>id` line.
pub fn parse_id_line(line: &str, line_no: usize) -> Result<&str, HaploError> {
    line.trim()
        .strip_prefix('>')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(HaploError::Syntax { line: line_no })
}

/// Upper-case and validate a sequence line against `alphabet`.
pub fn parse_sequence(line: &str, alphabet: Alphabet, line_no: usize) -> Result<Vec<u8>, HaploError> {
    let symbols = line.trim().to_ascii_uppercase().into_bytes();
    if symbols.is_empty() || !symbols.iter().all(|&b| alphabet.allows(b)) {
        return Err(HaploError::Syntax { line: line_no });
    }
    Ok(symbols)
}

/// One data record: an id line and the payload line after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub id: &'a str,
    /// Trimmed payload: a sequence or a haplotype string.
    pub payload: &'a str,
    /// 1-based line of the payload.
    pub payload_line: usize,
}

/// Iterates the data records after the reference.
///
/// Stops at the first blank id line or at end of input. An id line with no
/// payload line after it is a syntax error on the missing line.
pub struct RecordReader<I> {
    lines: I,
    done: bool,
}

impl<'a, I> RecordReader<I>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    /// `lines` yields `(1-based line number, text)` pairs.
    pub fn new(lines: I) -> Self {
        Self { lines, done: false }
    }

    fn read(&mut self) -> Option<Result<Record<'a>, HaploError>> {
        let (id_line, text) = self.lines.next()?;
        if text.trim().is_empty() {
            return None;
        }
        let id = match parse_id_line(text, id_line) {
            Ok(id) => id,
            Err(e) => return Some(Err(e)),
        };
        Some(match self.lines.next() {
            Some((payload_line, payload)) => Ok(Record {
                id,
                payload: payload.trim(),
                payload_line,
            }),
            None => Err(HaploError::Syntax { line: id_line + 1 }),
        })
    }
}

impl<'a, I> Iterator for RecordReader<I>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    type Item = Result<Record<'a>, HaploError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.read();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}
