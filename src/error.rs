//! Error types for haplosearch
//!
//! Every failure is fatal to the conversion run that raised it. Errors carry
//! the 1-based input line where one is known, and record-level failures are
//! wrapped in [`HaploError::Data`] so the composed message names the line of
//! the offending record as well as the underlying cause.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes are stable and are emitted by the CLI's structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Input file structure (E1xxx)
    /// Header line missing or malformed
    HeaderMalformed = 1001,
    /// Bad id line or sequence alphabet
    SyntaxError = 1002,
    /// Sequence length differs from the reference
    LengthMismatch = 1003,

    // Notation (E2xxx)
    /// Mutation token not recognized by the grammar
    UnknownNotation = 2001,

    // Coordinates (E3xxx)
    /// Reference position not present in the coordinate map
    PositionNotFound = 3001,

    // Record wrapper (E4xxx)
    /// Record-level failure
    DataError = 4001,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// Configuration error
    ConfigError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::HeaderMalformed => "header missing or malformed",
            ErrorCode::SyntaxError => "syntax error",
            ErrorCode::LengthMismatch => "sequence length differs from reference",
            ErrorCode::UnknownNotation => "unknown mutation notation",
            ErrorCode::PositionNotFound => "position not found in reference",
            ErrorCode::DataError => "data error in record",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::ConfigError => "configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for haplosearch operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HaploError {
    /// The first line is not a valid `START: <int>` header
    #[error("Base position is not defined on input file")]
    HeaderMissingOrMalformed,

    /// An id line or sequence line failed validation
    #[error("Syntax error on input file [Line: {line}]")]
    Syntax { line: usize },

    /// A data sequence is not aligned to the reference
    #[error(
        "Sequence has not the same number of bases as the reference sequence \
         (expected {expected}, found {found}) [Line: {line}]"
    )]
    LengthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A haplotype token matches neither grammar rule
    #[error("Unknown notation: {token}")]
    UnknownNotation { token: String },

    /// A token refers to a position outside the reference numbering
    #[error("Position not found in reference: {position}")]
    PositionNotFound { position: u64 },

    /// A record failed; wraps the underlying cause
    #[error("Data error on input file [Line: {line}]\n{source}")]
    Data {
        line: usize,
        source: Box<HaploError>,
    },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// Invalid configuration or CLI selector
    #[error("Configuration error: {msg}")]
    Config { msg: String },
}

impl HaploError {
    /// Wrap a record-level failure with the line of the record payload.
    pub fn data(line: usize, source: HaploError) -> Self {
        HaploError::Data {
            line,
            source: Box::new(source),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            HaploError::HeaderMissingOrMalformed => ErrorCode::HeaderMalformed,
            HaploError::Syntax { .. } => ErrorCode::SyntaxError,
            HaploError::LengthMismatch { .. } => ErrorCode::LengthMismatch,
            HaploError::UnknownNotation { .. } => ErrorCode::UnknownNotation,
            HaploError::PositionNotFound { .. } => ErrorCode::PositionNotFound,
            HaploError::Data { .. } => ErrorCode::DataError,
            HaploError::Io { .. } => ErrorCode::IoError,
            HaploError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// The input line this error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            HaploError::Syntax { line }
            | HaploError::LengthMismatch { line, .. }
            | HaploError::Data { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Innermost cause, looking through [`HaploError::Data`] wrappers.
    pub fn root_cause(&self) -> &HaploError {
        match self {
            HaploError::Data { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<std::io::Error> for HaploError {
    fn from(err: std::io::Error) -> Self {
        HaploError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for HaploError {
    fn from(err: serde_json::Error) -> Self {
        HaploError::Io {
            msg: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::HeaderMalformed.as_str(), "E1001");
        assert_eq!(ErrorCode::SyntaxError.as_str(), "E1002");
        assert_eq!(ErrorCode::UnknownNotation.as_str(), "E2001");
        assert_eq!(ErrorCode::PositionNotFound.as_str(), "E3001");
        assert_eq!(ErrorCode::DataError.as_str(), "E4001");
        assert_eq!(ErrorCode::IoError.as_str(), "E9001");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::LengthMismatch), "E1003");
        assert_eq!(format!("{}", ErrorCode::ConfigError), "E9002");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(
            ErrorCode::UnknownNotation.description(),
            "unknown mutation notation"
        );
        assert_eq!(
            ErrorCode::PositionNotFound.description(),
            "position not found in reference"
        );
    }

    #[test]
    fn test_syntax_display() {
        let err = HaploError::Syntax { line: 7 };
        assert_eq!(err.to_string(), "Syntax error on input file [Line: 7]");
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_data_wrapper_display() {
        let err = HaploError::data(
            5,
            HaploError::UnknownNotation {
                token: "12Q".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Data error on input file [Line: 5]\nUnknown notation: 12Q"
        );
        assert_eq!(err.code(), ErrorCode::DataError);
        assert_eq!(err.line(), Some(5));
        assert_eq!(err.root_cause().code(), ErrorCode::UnknownNotation);
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = HaploError::LengthMismatch {
            line: 5,
            expected: 10,
            found: 5,
        };
        assert!(err.to_string().contains("[Line: 5]"));
        assert!(err.to_string().contains("expected 10, found 5"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: HaploError = io.into();
        assert!(matches!(err, HaploError::Io { .. }));
        assert_eq!(err.code(), ErrorCode::IoError);
        assert_eq!(err.line(), None);
    }
}
