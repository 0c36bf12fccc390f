//! Output formatting utilities for CLI operations

use crate::batch::ConversionSummary;
use crate::error::HaploError;
use crate::notation::{Mutation, Nomenclature};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// JSON format, one object per line
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = HaploError;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use haplosearch::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
    /// assert!(OutputFormat::from_str("vcf").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(HaploError::Config {
                msg: format!("unknown output format '{}' (expected text or json)", other),
            }),
        }
    }
}

/// Write the summary of a finished batch conversion
///
/// # Examples
///
/// ```
/// use haplosearch::batch::{convert_str, ConvertOptions};
/// use haplosearch::cli::{output_summary, OutputFormat};
/// use std::io::Cursor;
/// use std::path::Path;
///
/// let summary = convert_str("START: 1\n>rCRS\nACGT\n", &ConvertOptions::default())
///     .unwrap()
///     .summary;
/// let mut buffer = Cursor::new(Vec::new());
/// output_summary(&mut buffer, Path::new("in.txt"), Path::new("out.txt"), &summary, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.starts_with("in.txt -> out.txt"));
/// ```
pub fn output_summary<W: Write>(
    writer: &mut W,
    input: &Path,
    output: &Path,
    summary: &ConversionSummary,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = json!({
                "input": input.display().to_string(),
                "output": output.display().to_string(),
                "status": "ok",
                "summary": summary,
            });
            writeln!(writer, "{}", value)
        }
        OutputFormat::Text => {
            write!(
                writer,
                "{} -> {}: {} records ({} {}), reference length {}",
                input.display(),
                output.display(),
                summary.records,
                summary.direction,
                summary.nomenclature,
                summary.reference_length
            )?;
            if summary.gap_columns_added > 0 {
                write!(writer, ", {} gap columns added", summary.gap_columns_added)?;
            }
            if summary.missing_positions > 0 {
                write!(writer, ", {} missing positions", summary.missing_positions)?;
            }
            writeln!(writer)
        }
    }
}

/// Write a single conversion result (a haplotype or a sequence)
///
/// # Examples
///
/// ```
/// use haplosearch::cli::{output_result, OutputFormat};
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// output_result(&mut buffer, "GCGT", "1", OutputFormat::Text).unwrap();
/// assert_eq!(String::from_utf8(buffer.into_inner()).unwrap(), "1\n");
/// ```
pub fn output_result<W: Write>(
    writer: &mut W,
    input: &str,
    output: &str,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = json!({"input": input, "output": output, "status": "ok"});
            writeln!(writer, "{}", value)
        }
        OutputFormat::Text => writeln!(writer, "{}", output),
    }
}

/// Write the tokens of a parsed haplotype
pub fn output_mutations<W: Write>(
    writer: &mut W,
    input: &str,
    nomenclature: Nomenclature,
    mutations: &[Mutation],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = json!({
                "input": input,
                "nomenclature": nomenclature,
                "mutations": mutations,
                "status": "ok",
            });
            writeln!(writer, "{}", value)
        }
        OutputFormat::Text => {
            for mutation in mutations {
                writeln!(
                    writer,
                    "{}\t{:?}\t{}",
                    mutation.position,
                    mutation.change_kind(),
                    describe_payload(mutation)
                )?;
            }
            Ok(())
        }
    }
}

fn describe_payload(mutation: &Mutation) -> String {
    use crate::notation::{DeletedBases, MutationKind};

    match &mutation.kind {
        MutationKind::Transition { base: Some(base) }
        | MutationKind::Transversion { base }
        | MutationKind::Heteroplasmy { base } => base.to_string(),
        MutationKind::Transition { base: None } => "(from reference)".to_string(),
        MutationKind::Insertion { offset, bases } => format!(
            "+{} {}",
            offset,
            bases.iter().map(|b| b.to_char()).collect::<String>()
        ),
        MutationKind::Deletion {
            bases: DeletedBases::Known(bases),
        } => bases.iter().map(|b| b.to_char()).collect(),
        MutationKind::Deletion {
            bases: DeletedBases::Unknown,
        } => "?".to_string(),
        MutationKind::Missing => String::new(),
    }
}

/// Write an error to the output
///
/// # Examples
///
/// ```
/// use haplosearch::cli::{output_error, OutputFormat};
/// use haplosearch::HaploError;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let error = HaploError::UnknownNotation { token: "12Q".to_string() };
/// output_error(&mut buffer, "12Q", &error, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.starts_with("ERROR: 12Q"));
/// ```
pub fn output_error<W: Write>(
    writer: &mut W,
    input: &str,
    error: &HaploError,
    format: OutputFormat,
) -> io::Result<()> {
    output_error_with_context(writer, input, error, format, error.line())
}

/// Write an error to the output with optional line number context
pub fn output_error_with_context<W: Write>(
    writer: &mut W,
    input: &str,
    error: &HaploError,
    format: OutputFormat,
    line_number: Option<usize>,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let mut value = json!({
                "input": input,
                "code": error.code().as_str(),
                "error": error.to_string(),
                "status": "error",
            });
            if let Some(line) = line_number {
                value["line"] = json!(line);
            }
            writeln!(writer, "{}", value)
        }
        OutputFormat::Text => {
            if let Some(line) = line_number {
                writeln!(writer, "ERROR (line {}): {} - {}", line, input, error)
            } else {
                writeln!(writer, "ERROR: {} - {}", input, error)
            }
        }
    }
}
