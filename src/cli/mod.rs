//! CLI utilities for haplosearch
//!
//! This module provides testable functions used by the CLI binary.
//! By extracting pure functions and I/O-abstracted functions to the library,
//! we enable comprehensive unit testing without requiring end-to-end CLI tests.

pub mod format;
pub mod parse;

// Re-export commonly used items
pub use format::{
    output_error, output_error_with_context, output_mutations, output_result, output_summary,
    OutputFormat,
};
pub use parse::{
    decode_haplotype, encode_sequence, parse_haplotype_args, ReferenceArgs, DEFAULT_REFERENCE_ID,
};

use log::LevelFilter;

/// Map the count of `-v` flags to a log level.
///
/// # Examples
///
/// ```
/// use haplosearch::cli::verbosity_level;
/// use log::LevelFilter;
///
/// assert_eq!(verbosity_level(0), LevelFilter::Warn);
/// assert_eq!(verbosity_level(2), LevelFilter::Debug);
/// assert_eq!(verbosity_level(9), LevelFilter::Trace);
/// ```
pub fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_level() {
        assert_eq!(verbosity_level(0), LevelFilter::Warn);
        assert_eq!(verbosity_level(1), LevelFilter::Info);
        assert_eq!(verbosity_level(2), LevelFilter::Debug);
        assert_eq!(verbosity_level(3), LevelFilter::Trace);
    }
}
