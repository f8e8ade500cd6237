//! Command-line interface definitions for ProfileDupe.
//!
//! This module defines all CLI arguments and subcommands using the clap derive API.
//! Global options (verbosity, config file, error format) apply to every subcommand.
//!
//! # Example
//!
//! ```bash
//! # Generate the default four platform datasets into ./data
//! profiledupe generate --output-dir data
//!
//! # Reproducible dataset for a single platform
//! profiledupe generate --platform instagram --unique 100 --duplicates 10 --seed 42
//!
//! # Report duplicated identities as CSV
//! profiledupe detect data/instagram_profiles.csv -o fake_profiles_only.csv
//!
//! # JSON report, failing if nothing was duplicated
//! profiledupe detect data/instagram_profiles.csv --format json --require-duplicates
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Synthesize social-media profile datasets and detect duplicated identities.
///
/// Two profiles are the same identity when their Name, Username and Email
/// match exactly.
#[derive(Debug, Parser)]
#[command(name = "profiledupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (TOML) to use instead of the default location
    #[arg(long, value_name = "FILE", global = true, env = "PROFILEDUPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print fatal errors as JSON objects on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for ProfileDupe.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate synthetic profile datasets with injected duplicates
    Generate(GenerateArgs),
    /// Detect duplicated identities in a profile CSV file
    Detect(DetectArgs),
}

/// Arguments for the generate subcommand.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Platform to generate (can be specified multiple times)
    ///
    /// Each platform is written to `<PLATFORM>_profiles.csv`.
    #[arg(short, long = "platform", value_name = "NAME")]
    pub platforms: Vec<String>,

    /// Number of distinct identities per platform
    #[arg(long, value_name = "N")]
    pub unique: Option<usize>,

    /// Number of copies of the injected duplicate identity
    #[arg(long, value_name = "N")]
    pub duplicates: Option<usize>,

    /// Directory the CSV files are written to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

/// Arguments for the detect subcommand.
#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Profile CSV file to examine
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Prefix CSV rows with a group_id column
    #[arg(long)]
    pub group_ids: bool,

    /// Fail instead of writing an empty report when no duplicates are found
    #[arg(long)]
    pub require_duplicates: bool,

    /// Group in parallel over shards of N records
    #[arg(long, value_name = "N", value_parser = parse_shard_size)]
    pub shard_size: Option<usize>,
}

/// Output format for duplicate reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV rows, original columns
    #[default]
    Csv,
    /// JSON document with groups and summary
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a shard size, rejecting zero.
///
/// # Examples
///
/// ```
/// use profiledupe::cli::parse_shard_size;
///
/// assert_eq!(parse_shard_size("1000").unwrap(), 1000);
/// assert!(parse_shard_size("0").is_err());
/// ```
/// # Errors
///
/// Returns an error if the string is not a positive integer.
pub fn parse_shard_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid shard size: '{s}'"))?;
    if size == 0 {
        return Err("Shard size must be at least 1".to_string());
    }
    Ok(size)
}
