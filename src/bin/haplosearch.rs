// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! haplosearch CLI
//!
//! Command-line interface for converting between aligned sequences and
//! haplotypes.

use clap::{ArgAction, Parser, Subcommand};
use haplosearch::batch::{convert_file, Direction};
use haplosearch::cli::{
    decode_haplotype, encode_sequence, output_error, output_mutations, output_result,
    output_summary, parse_haplotype_args, verbosity_level, OutputFormat, ReferenceArgs,
    DEFAULT_REFERENCE_ID,
};
use haplosearch::config::HaploConfig;
use haplosearch::notation::{FormatFlags, Nomenclature};
use haplosearch::HaploError;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "haplosearch")]
#[command(author, version, about = "Haplotype notation converter")]
#[command(
    long_about = "Convert between aligned DNA sequences and haplotypes in population (POP) or forensic (FOR) notation.

Examples:
  haplosearch convert -i sequences.txt -o haplotypes.txt -n POP -d S2H
  haplosearch convert -i haplotypes.txt -o sequences.txt -n FOR -d H2S
  haplosearch encode --reference ACGT --sequence GCGA
  haplosearch decode --reference ACGT --haplotype '1 4A'
  haplosearch parse -n FOR 309.1C 309.2C 16519del"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: .haplosearch.toml or ~/.config/haplosearch/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a whole batch file
    Convert {
        /// Input batch file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file, replaced only if the conversion succeeds
        #[arg(short, long)]
        output: PathBuf,

        /// Nomenclature (POP or FOR)
        #[arg(short, long)]
        nomenclature: Option<Nomenclature>,

        /// Direction (S2H or H2S)
        #[arg(short, long)]
        direction: Option<Direction>,

        /// Output format for the summary (text or json)
        #[arg(short = 'f', long)]
        format: Option<OutputFormat>,
    },

    /// Encode one aligned sequence as a haplotype
    Encode {
        /// Aligned reference sequence
        #[arg(long)]
        reference: String,

        /// Aligned sequence, same length as the reference
        #[arg(long)]
        sequence: String,

        /// Position of the first reference base
        #[arg(long, default_value_t = 1)]
        start: u64,

        /// Reference identifier, printed for an unchanged sequence
        #[arg(long, default_value = DEFAULT_REFERENCE_ID)]
        reference_id: String,

        /// Nomenclature (POP or FOR)
        #[arg(short, long)]
        nomenclature: Option<Nomenclature>,

        /// Zero-pad positions to three digits
        #[arg(long)]
        padding: bool,

        /// Write forensic deletions as `d` instead of `del`
        #[arg(long)]
        short_deletions: bool,

        /// Output format (text or json)
        #[arg(short = 'f', long)]
        format: Option<OutputFormat>,
    },

    /// Rebuild the sequence described by one haplotype
    Decode {
        /// Unaligned reference sequence
        #[arg(long)]
        reference: String,

        /// Haplotype string
        #[arg(long)]
        haplotype: String,

        /// Position of the first reference base
        #[arg(long, default_value_t = 1)]
        start: u64,

        /// Reference identifier
        #[arg(long, default_value = DEFAULT_REFERENCE_ID)]
        reference_id: String,

        /// Nomenclature (POP or FOR)
        #[arg(short, long)]
        nomenclature: Option<Nomenclature>,

        /// Output format (text or json)
        #[arg(short = 'f', long)]
        format: Option<OutputFormat>,
    },

    /// Tokenize a haplotype and show its mutations
    Parse {
        /// Haplotype tokens
        #[arg(required = true)]
        tokens: Vec<String>,

        /// Nomenclature (POP or FOR)
        #[arg(short, long)]
        nomenclature: Option<Nomenclature>,

        /// Output format (text or json)
        #[arg(short = 'f', long)]
        format: Option<OutputFormat>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(verbosity_level(cli.verbose))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            nomenclature,
            direction,
            format,
        } => run_convert(&config, input, output, nomenclature, direction, format),
        Commands::Encode {
            reference,
            sequence,
            start,
            reference_id,
            nomenclature,
            padding,
            short_deletions,
            format,
        } => {
            let reference = ReferenceArgs::new(&reference)
                .with_id(&reference_id)
                .with_start(start);
            let flags = FormatFlags::new()
                .with_padding(padding)
                .with_short_deletions(short_deletions);
            let nomenclature = config.merge_with_cli(nomenclature, None).nomenclature;
            let format = config.output_format(format);
            report(&sequence, format, encode_sequence(&reference, &sequence, nomenclature, flags))
        }
        Commands::Decode {
            reference,
            haplotype,
            start,
            reference_id,
            nomenclature,
            format,
        } => {
            let reference = ReferenceArgs::new(&reference)
                .with_id(&reference_id)
                .with_start(start);
            let nomenclature = config.merge_with_cli(nomenclature, None).nomenclature;
            let format = config.output_format(format);
            report(&haplotype, format, decode_haplotype(&reference, &haplotype, nomenclature))
        }
        Commands::Parse {
            tokens,
            nomenclature,
            format,
        } => run_parse(&config, &tokens, nomenclature, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("exiting after error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<HaploConfig, HaploError> {
    match path {
        Some(path) => Ok(HaploConfig::load_from_path(path)?),
        None => Ok(HaploConfig::load().unwrap_or_default()),
    }
}

/// Print a single-item result, or its error to stderr.
fn report(
    input: &str,
    format: OutputFormat,
    result: Result<String, HaploError>,
) -> Result<(), Box<dyn std::error::Error>> {
    match result {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            output_result(&mut stdout, input, &output, format)?;
            stdout.flush()?;
            Ok(())
        }
        Err(e) => {
            output_error(&mut io::stderr().lock(), input, &e, format)?;
            Err(e.into())
        }
    }
}

fn run_convert(
    config: &HaploConfig,
    input: PathBuf,
    output: PathBuf,
    nomenclature: Option<Nomenclature>,
    direction: Option<Direction>,
    format: Option<OutputFormat>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = config.merge_with_cli(nomenclature, direction);
    let format = config.output_format(format);
    log::info!(
        "converting {} -> {} ({} {})",
        input.display(),
        output.display(),
        options.direction,
        options.nomenclature
    );

    match convert_file(&input, &output, &options) {
        Ok(summary) => {
            let mut stdout = io::stdout().lock();
            output_summary(&mut stdout, &input, &output, &summary, format)?;
            stdout.flush()?;
            Ok(())
        }
        Err(e) => {
            output_error(
                &mut io::stderr().lock(),
                &input.display().to_string(),
                &e,
                format,
            )?;
            Err(e.into())
        }
    }
}

fn run_parse(
    config: &HaploConfig,
    tokens: &[String],
    nomenclature: Option<Nomenclature>,
    format: Option<OutputFormat>,
) -> Result<(), Box<dyn std::error::Error>> {
    let nomenclature = config.merge_with_cli(nomenclature, None).nomenclature;
    let format = config.output_format(format);
    let input = tokens.join(" ");

    match parse_haplotype_args(nomenclature, tokens) {
        Ok(mutations) => {
            let mut stdout = io::stdout().lock();
            output_mutations(&mut stdout, &input, nomenclature, &mutations, format)?;
            stdout.flush()?;
            Ok(())
        }
        Err(e) => {
            output_error(&mut io::stderr().lock(), &input, &e, format)?;
            Err(e.into())
        }
    }
}
