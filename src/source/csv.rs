//! CSV profile source.
//!
//! Reads a headered, comma-separated file into a [`ProfileDataset`]. Every
//! row becomes one [`ProfileRecord`] with the header names as field names,
//! values untouched. Rows with a different number of fields than the header
//! are rejected by the reader.
//!
//! # Example
//!
//! ```
//! use profiledupe::source::read_profiles;
//!
//! let data = "Name,Username,Email\nAda,ada,ada@x.com\n";
//! let dataset = read_profiles(data.as_bytes()).unwrap();
//! assert_eq!(dataset.len(), 1);
//! assert_eq!(dataset.records[0].get("Username"), Some("ada"));
//! ```

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::profile::{ProfileDataset, ProfileRecord};

/// Errors that can occur while loading profiles.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The input file could not be opened.
    #[error("Cannot open profile file {path}: {source}")]
    Open {
        /// File that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The input is not valid CSV (bad quoting, ragged rows, invalid UTF-8).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header lacks an identity column.
    #[error("Profile data is missing required column `{0}`")]
    MissingColumn(&'static str),
}

/// Load profiles from a CSV file on disk.
///
/// A header-only file yields an empty dataset, not an error.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be opened or parsed, or lacks
/// an identity column.
pub fn load_profiles(path: &Path) -> Result<ProfileDataset, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Reading profiles from {}", path.display());
    let dataset = read_profiles(file)?;
    log::info!(
        "Loaded {} profile(s) from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Read profiles from any CSV reader.
///
/// # Errors
///
/// Returns [`SourceError`] on malformed CSV or a missing identity column.
pub fn read_profiles<R: io::Read>(reader: R) -> Result<ProfileDataset, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let columns: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let mut dataset = ProfileDataset::new(columns, Vec::new());
    if let Some(column) = dataset.missing_identity_columns().first() {
        return Err(SourceError::MissingColumn(*column));
    }

    for row in csv_reader.records() {
        let row = row?;
        let record = ProfileRecord::from_pairs(
            dataset
                .columns
                .iter()
                .map(String::as_str)
                .zip(row.iter()),
        );
        dataset.records.push(record);
    }

    Ok(dataset)
}
