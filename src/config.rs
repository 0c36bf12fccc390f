//! Configuration file support for haplosearch.
//!
//! This module loads `.haplosearch.toml` files, which supply defaults for
//! the CLI's conversion options.
//!
//! # Example Configuration
//!
//! ```toml
//! [conversion]
//! nomenclature = "FOR"
//! direction = "H2S"
//!
//! [output]
//! format = "json"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.haplosearch.toml` in current directory
//! 2. `~/.config/haplosearch/config.toml`
//!
//! CLI flags take precedence over config file settings.

use crate::batch::{ConvertOptions, Direction};
use crate::cli::OutputFormat;
use crate::error::HaploError;
use crate::notation::Nomenclature;
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed configuration from a .haplosearch.toml file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HaploConfig {
    pub conversion: ConversionConfig,
    pub output: OutputConfig,
}

/// `[conversion]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionConfig {
    pub nomenclature: Option<Nomenclature>,
    pub direction: Option<Direction>,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Conversion,
    Output,
    Other,
}

impl HaploConfig {
    /// Load configuration from the default locations.
    ///
    /// A file that exists but fails to load is skipped with a warning.
    pub fn load() -> Option<Self> {
        let cwd_config = PathBuf::from(".haplosearch.toml");
        let home_config =
            dirs_home().map(|home| home.join(".config").join("haplosearch").join("config.toml"));

        for path in std::iter::once(cwd_config).chain(home_config) {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    log::debug!("loaded configuration from {}", path.display());
                    return Some(config);
                }
                Err(e) => log::warn!("ignoring {}: {}", path.display(), e),
            }
        }
        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    ///
    /// Supports sections, `key = "value"` pairs and `#` comments. Unknown
    /// sections and keys are ignored.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = HaploConfig::default();
        let mut section = Section::Other;

        for (index, line) in content.lines().enumerate() {
            let line = strip_comment(line).trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                section = match line[1..line.len() - 1].trim() {
                    "conversion" => Section::Conversion,
                    "output" => Section::Output,
                    _ => Section::Other,
                };
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!(
                    "line {}: expected key = value",
                    index + 1
                )));
            };
            let key = key.trim();
            let value = unquote(value.trim());
            let invalid = |e: HaploError| ConfigError::Parse(format!("line {}: {}", index + 1, e));

            match (section, key) {
                (Section::Conversion, "nomenclature") => {
                    config.conversion.nomenclature = Some(value.parse().map_err(invalid)?);
                }
                (Section::Conversion, "direction") => {
                    config.conversion.direction = Some(value.parse().map_err(invalid)?);
                }
                (Section::Output, "format") => {
                    config.output.format = Some(value.parse().map_err(invalid)?);
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(
        &self,
        nomenclature: Option<Nomenclature>,
        direction: Option<Direction>,
    ) -> ConvertOptions {
        ConvertOptions::new(
            nomenclature
                .or(self.conversion.nomenclature)
                .unwrap_or_default(),
            direction.or(self.conversion.direction).unwrap_or_default(),
        )
    }

    /// Output format, CLI first.
    pub fn output_format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.output.format).unwrap_or_default()
    }
}

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for HaploError {
    fn from(err: ConfigError) -> Self {
        HaploError::Config {
            msg: err.to_string(),
        }
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"').trim_matches('\'')
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
