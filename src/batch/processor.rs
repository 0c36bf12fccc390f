//! Batch conversion driver.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::header::BatchHeader;
use super::record::{parse_id_line, parse_sequence, Alphabet, Record, RecordReader};
use super::Direction;
use crate::decode::Decoder;
use crate::encode::HaplotypeEncoder;
use crate::error::HaploError;
use crate::notation::Nomenclature;
use crate::reference::Reference;

/// What to convert and in which notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConvertOptions {
    pub nomenclature: Nomenclature,
    pub direction: Direction,
}

impl ConvertOptions {
    pub const fn new(nomenclature: Nomenclature, direction: Direction) -> Self {
        Self {
            nomenclature,
            direction,
        }
    }

    pub fn nomenclature(mut self, nomenclature: Nomenclature) -> Self {
        self.nomenclature = nomenclature;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

/// Statistics of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionSummary {
    pub nomenclature: Nomenclature,
    pub direction: Direction,
    /// Data records converted.
    pub records: usize,
    /// Reference columns, including gap columns added by the pre-pass.
    pub reference_length: usize,
    /// Gap columns the decode pre-pass added to the reference.
    pub gap_columns_added: usize,
    /// Unreadable positions reported across all encoded records.
    pub missing_positions: usize,
    pub elapsed: Duration,
}

impl ConversionSummary {
    /// Records per second; 0.0 before any measurable time has passed.
    pub fn records_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs < f64::EPSILON {
            0.0
        } else {
            self.records as f64 / secs
        }
    }
}

/// Output text of a run plus its summary.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub output: String,
    pub summary: ConversionSummary,
}

#[derive(Debug, Default)]
struct Tally {
    records: usize,
    reference_length: usize,
    gap_columns_added: usize,
    missing_positions: usize,
}

fn push_record(out: &mut String, id: &str, payload: &str) {
    out.push('>');
    out.push_str(id);
    out.push('\n');
    out.push_str(payload);
    out.push('\n');
}

/// Convert a whole batch held in memory.
///
/// The first failure aborts the run; no output is produced for a failed run.
///
/// # Example
///
/// ```
/// use haplosearch::batch::{convert_str, ConvertOptions, Direction};
/// use haplosearch::notation::Nomenclature;
///
/// let input = "START: 1\n>rCRS\nACGT\n>s1\nGCGA\n";
/// let options = ConvertOptions::new(Nomenclature::Population, Direction::SequenceToHaplotype);
/// let conversion = convert_str(input, &options).unwrap();
/// assert_eq!(conversion.output, "START: 1\n>rCRS\nACGT\n>s1\n1 4A\n");
/// assert_eq!(conversion.summary.records, 1);
/// ```
pub fn convert_str(input: &str, options: &ConvertOptions) -> Result<Conversion, HaploError> {
    let started = Instant::now();
    let mut lines = input.lines().enumerate().map(|(i, line)| (i + 1, line));

    let header = BatchHeader::parse(lines.next().map_or("", |(_, line)| line))?;
    let (id_line, id_text) = lines.next().ok_or(HaploError::Syntax { line: 2 })?;
    let reference_id = parse_id_line(id_text, id_line)?;
    let (seq_line, seq_text) = lines.next().ok_or(HaploError::Syntax { line: 3 })?;
    log::debug!(
        "{} {} run, reference '{}' starting at {}",
        options.direction,
        options.nomenclature,
        reference_id,
        header.start
    );

    let mut output = String::with_capacity(input.len());
    output.push_str(&header.to_line());
    output.push('\n');

    let records = RecordReader::new(lines);
    let tally = match options.direction {
        Direction::SequenceToHaplotype => {
            let symbols = parse_sequence(seq_text, Alphabet::Aligned, seq_line)?;
            let reference = numbered_reference(reference_id, symbols, &header)?;
            encode_records(&reference, &header, options.nomenclature, records, &mut output)?
        }
        Direction::HaplotypeToSequence => {
            let symbols = parse_sequence(seq_text, Alphabet::Ungapped, seq_line)?;
            let reference = numbered_reference(reference_id, symbols, &header)?;
            decode_records(reference, options.nomenclature, records, &mut output)?
        }
    };

    let summary = ConversionSummary {
        nomenclature: options.nomenclature,
        direction: options.direction,
        records: tally.records,
        reference_length: tally.reference_length,
        gap_columns_added: tally.gap_columns_added,
        missing_positions: tally.missing_positions,
        elapsed: started.elapsed(),
    };
    log::info!(
        "converted {} records ({} {}) in {:?}",
        summary.records,
        summary.direction,
        summary.nomenclature,
        summary.elapsed
    );
    Ok(Conversion { output, summary })
}

/// The header's start must leave room to number every reference base.
fn numbered_reference(
    id: &str,
    symbols: Vec<u8>,
    header: &BatchHeader,
) -> Result<Reference, HaploError> {
    Reference::checked_new(id, symbols, header.start).ok_or(HaploError::HeaderMissingOrMalformed)
}

fn encode_records<'a, I>(
    reference: &Reference,
    header: &BatchHeader,
    nomenclature: Nomenclature,
    records: RecordReader<I>,
    output: &mut String,
) -> Result<Tally, HaploError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    push_record(output, reference.id(), &reference.ungapped());
    let encoder = HaplotypeEncoder::new(reference, nomenclature, header.flags);
    let mut tally = Tally {
        reference_length: reference.len(),
        ..Tally::default()
    };

    for record in records {
        let record = record?;
        let target = parse_sequence(record.payload, Alphabet::Sample, record.payload_line)?;
        if target.len() != reference.len() {
            return Err(HaploError::LengthMismatch {
                line: record.payload_line,
                expected: reference.len(),
                found: target.len(),
            });
        }
        let haplotype = encoder.diff(&target);
        log::debug!(
            "line {}: '{}' has {} changes, {} missing",
            record.payload_line,
            record.id,
            haplotype.mutations.len(),
            haplotype.missing.len()
        );
        tally.missing_positions += haplotype.missing.len();
        tally.records += 1;
        push_record(
            output,
            record.id,
            &haplotype.render(nomenclature, &header.flags, reference.id()),
        );
    }
    Ok(tally)
}

fn decode_records<'a, I>(
    reference: Reference,
    nomenclature: Nomenclature,
    records: RecordReader<I>,
    output: &mut String,
) -> Result<Tally, HaploError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    // Every record must be read before the pre-pass can fix the frame
    let records = records.collect::<Result<Vec<Record<'a>>, _>>()?;
    let decoder = Decoder::prepare(
        reference,
        nomenclature,
        records.iter().map(|r| (r.payload_line, r.payload)),
    )?;
    let reference = decoder.reference();
    push_record(output, reference.id(), &reference.sequence().as_string());

    for record in &records {
        let symbols = decoder
            .decode(record.payload)
            .map_err(|e| HaploError::data(record.payload_line, e))?;
        log::debug!("line {}: rebuilt '{}'", record.payload_line, record.id);
        push_record(output, record.id, &String::from_utf8_lossy(&symbols));
    }

    Ok(Tally {
        records: records.len(),
        reference_length: reference.len(),
        gap_columns_added: decoder.gaps_added(),
        missing_positions: 0,
    })
}

/// Convert `input` into `output`.
///
/// The output is written to a temporary file beside `output` and renamed
/// into place only once the whole run has succeeded, so a failed run leaves
/// any existing `output` untouched.
pub fn convert_file<P, Q>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<ConversionSummary, HaploError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();
    let text = fs::read_to_string(input).map_err(|e| HaploError::Io {
        msg: format!("{}: {}", input.display(), e),
    })?;

    let conversion = convert_str(&text, options)?;

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(conversion.output.as_bytes())?;
    staged.flush()?;
    staged.persist(output).map_err(|e| HaploError::Io {
        msg: format!("{}: {}", output.display(), e.error),
    })?;
    log::debug!("wrote {}", output.display());

    Ok(conversion.summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s2h(nomenclature: Nomenclature) -> ConvertOptions {
        ConvertOptions::new(nomenclature, Direction::SequenceToHaplotype)
    }

    fn h2s(nomenclature: Nomenclature) -> ConvertOptions {
        ConvertOptions::new(nomenclature, Direction::HaplotypeToSequence)
    }

    #[test]
    fn test_encode_population() {
        let input = "START: 100\n>rCRS\nACG--TTA\n>s1\nGCGCCTTA\n>s2\nACG--TTA\n";
        let conversion = convert_str(input, &s2h(Nomenclature::Population)).unwrap();
        assert_eq!(
            conversion.output,
            "START: 100\n>rCRS\nACGTTA\n>s1\n100 102iCC\n>s2\nrCRS\n"
        );
        assert_eq!(conversion.summary.records, 2);
        assert_eq!(conversion.summary.reference_length, 8);
    }

    #[test]
    fn test_encode_forensic_flags() {
        let input = "START: 1 *d\n>rCRS\nACGTA\n>s1\nA--TA\n";
        let conversion = convert_str(input, &s2h(Nomenclature::Forensic)).unwrap();
        assert_eq!(conversion.output, "START: 1\n>rCRS\nACGTA\n>s1\n002d 003d\n");
    }

    #[test]
    fn test_encode_lowercase_and_crlf() {
        let input = "START: 1\r\n>rCRS\r\nacgt\r\n>s1\r\nacga\r\n";
        let conversion = convert_str(input, &s2h(Nomenclature::Forensic)).unwrap();
        assert_eq!(conversion.output, "START: 1\n>rCRS\nACGT\n>s1\n4A\n");
    }

    #[test]
    fn test_encode_missing_count() {
        let input = "START: 198\n>rCRS\nACGTACGT\n>s1\nGCNNACGT\n";
        let conversion = convert_str(input, &s2h(Nomenclature::Population)).unwrap();
        // N is an ambiguity code, not missing
        assert_eq!(conversion.summary.missing_positions, 0);
        assert!(conversion.output.ends_with(">s1\n198 200N 201N\n"));
    }

    #[test]
    fn test_decode_population() {
        let input = "START: 1\n>rCRS\nACGT\n>s1\n2iT\n>s2\n2iGA 4C\n>s3\nrCRS\n";
        let conversion = convert_str(input, &h2s(Nomenclature::Population)).unwrap();
        assert_eq!(
            conversion.output,
            "START: 1\n>rCRS\nAC--GT\n>s1\nACT-GT\n>s2\nACGAGC\n>s3\nAC--GT\n"
        );
        assert_eq!(conversion.summary.gap_columns_added, 2);
        assert_eq!(conversion.summary.reference_length, 6);
    }

    #[test]
    fn test_decode_flags_accepted() {
        let input = "START: 1 *\n>rCRS\nACGT\n>s1\n001\n";
        let conversion = convert_str(input, &h2s(Nomenclature::Population)).unwrap();
        assert_eq!(conversion.output, "START: 1\n>rCRS\nACGT\n>s1\nGCGT\n");
    }

    #[test]
    fn test_decode_rejects_gapped_reference() {
        let input = "START: 1\n>rCRS\nAC-GT\n>s1\n1\n";
        assert_eq!(
            convert_str(input, &h2s(Nomenclature::Population)).unwrap_err(),
            HaploError::Syntax { line: 3 }
        );
    }

    #[test]
    fn test_header_errors() {
        for input in ["", "\n", ">rCRS\nACGT\n", "START 1\n>rCRS\nACGT\n"] {
            assert_eq!(
                convert_str(input, &s2h(Nomenclature::Population)).unwrap_err(),
                HaploError::HeaderMissingOrMalformed
            );
        }
    }

    #[test]
    fn test_start_too_large_for_reference() {
        let input = "START: 18446744073709551615\n>rCRS\nACGT\n>s1\nACGA\n";
        assert_eq!(
            convert_str(input, &s2h(Nomenclature::Population)).unwrap_err(),
            HaploError::HeaderMissingOrMalformed
        );
        assert_eq!(
            convert_str(input, &h2s(Nomenclature::Forensic)).unwrap_err(),
            HaploError::HeaderMissingOrMalformed
        );
        // The last base may take the largest position
        let input = "START: 18446744073709551612\n>rCRS\nACGT\n>s1\nACGA\n";
        let output = convert_str(input, &s2h(Nomenclature::Forensic)).unwrap().output;
        assert!(output.ends_with(">s1\n18446744073709551615A\n"));
    }

    #[test]
    fn test_truncated_preamble() {
        assert_eq!(
            convert_str("START: 1\n", &s2h(Nomenclature::Population)).unwrap_err(),
            HaploError::Syntax { line: 2 }
        );
        assert_eq!(
            convert_str("START: 1\n>rCRS\n", &s2h(Nomenclature::Population)).unwrap_err(),
            HaploError::Syntax { line: 3 }
        );
    }

    #[test]
    fn test_length_mismatch_line() {
        let input = "START: 1\n>rCRS\nACGTACGTAC\n>s1\nACGTACGTAC\n>s2\nACGTA\n";
        assert_eq!(
            convert_str(input, &s2h(Nomenclature::Population)).unwrap_err(),
            HaploError::LengthMismatch {
                line: 7,
                expected: 10,
                found: 5
            }
        );
    }

    #[test]
    fn test_decode_error_wrapped() {
        let input = "START: 1\n>rCRS\nACGT\n>s1\n1\n>s2\n12Q\n";
        let err = convert_str(input, &h2s(Nomenclature::Population)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Data error on input file [Line: 7]\nUnknown notation: 12Q"
        );
    }

    #[test]
    fn test_prepass_error_wrapped() {
        let input = "START: 1\n>rCRS\nACGT\n>s1\n9iA\n";
        let err = convert_str(input, &h2s(Nomenclature::Population)).unwrap_err();
        assert_eq!(
            err,
            HaploError::data(5, HaploError::PositionNotFound { position: 9 })
        );
    }

    #[test]
    fn test_blank_line_ends_records() {
        let input = "START: 1\n>rCRS\nACGT\n>s1\nACGA\n\n>s2\nNOT A SEQUENCE\n";
        let conversion = convert_str(input, &s2h(Nomenclature::Population)).unwrap();
        assert_eq!(conversion.summary.records, 1);
    }

    #[test]
    fn test_summary_serializes() {
        let input = "START: 1\n>rCRS\nACGT\n";
        let summary = convert_str(input, &s2h(Nomenclature::Forensic))
            .unwrap()
            .summary;
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["nomenclature"], "FOR");
        assert_eq!(json["direction"], "S2H");
        assert_eq!(json["records"], 0);
    }

    #[test]
    fn test_convert_file_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");

        fs::write(&input, "START: 1\n>rCRS\nACGT\n>s1\nGCGT\n").unwrap();
        let summary = convert_file(&input, &output, &s2h(Nomenclature::Population)).unwrap();
        assert_eq!(summary.records, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "START: 1\n>rCRS\nACGT\n>s1\n1\n"
        );

        fs::write(&input, "START: 1\n>rCRS\nACGT\n>s1\nGC\n").unwrap();
        assert!(convert_file(&input, &output, &s2h(Nomenclature::Population)).is_err());
        // Previous output survives a failed run
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "START: 1\n>rCRS\nACGT\n>s1\n1\n"
        );
    }

    #[test]
    fn test_convert_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(
            dir.path().join("absent.txt"),
            dir.path().join("out.txt"),
            &ConvertOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, HaploError::Io { .. }));
        assert!(!dir.path().join("out.txt").exists());
    }
}
