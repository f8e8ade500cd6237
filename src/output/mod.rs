//! Output formatters for profile datasets and duplicate reports.
//!
//! This module provides different output formats:
//! - CSV for persisted datasets and spreadsheet-friendly reports
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use profiledupe::duplicates::find_duplicates;
//! use profiledupe::error::ExitCode;
//! use profiledupe::output::json::JsonOutput;
//! use profiledupe::source::load_profiles;
//! use std::path::Path;
//!
//! let dataset = load_profiles(Path::new("instagram_profiles.csv")).unwrap();
//! let (groups, stats) = find_duplicates(dataset.records).unwrap();
//!
//! let output = JsonOutput::new(&groups, &stats, ExitCode::Success);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod csv;
pub mod json;

// Re-export main types
pub use self::csv::{write_dataset, CsvOutput, CsvOutputError};
pub use self::json::{JsonOutput, JsonOutputError};
