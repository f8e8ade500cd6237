//! CSV output for profile datasets and duplicate reports.
//!
//! Two writers live here:
//!
//! - [`write_dataset`] persists a whole [`ProfileDataset`] with its header.
//! - [`CsvOutput`] writes a duplicate report: one row per record of every
//!   duplicate group, original columns in original order, with an optional
//!   leading `group_id` column. No groups gives a header-only report.
//!
//! # Example
//!
//! ```
//! use profiledupe::duplicates::duplicates_only;
//! use profiledupe::output::csv::CsvOutput;
//! use profiledupe::source::read_profiles;
//!
//! let data = "Name,Username,Email\nA,a,a@x\nA,a,a@x\nB,b,b@x\n";
//! let dataset = read_profiles(data.as_bytes()).unwrap();
//! let groups = duplicates_only(dataset.records).unwrap();
//!
//! let csv = CsvOutput::new(&dataset.columns, &groups).to_string().unwrap();
//! assert_eq!(csv, "Name,Username,Email\nA,a,a@x\nA,a,a@x\n");
//! ```

use std::io;

use thiserror::Error;

use crate::duplicates::IdentityGroup;
use crate::profile::{ProfileDataset, ProfileRecord};

/// Header of the optional group column.
pub const GROUP_ID_COLUMN: &str = "group_id";

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A non-empty report was required but no duplicate groups were found.
    #[error("No duplicate profiles found; refusing to write an empty report")]
    EmptyReport,
}

/// Duplicate report formatter.
pub struct CsvOutput<'a> {
    columns: &'a [String],
    groups: &'a [IdentityGroup],
    group_ids: bool,
    require_non_empty: bool,
}

impl<'a> CsvOutput<'a> {
    /// Create a report over `groups` using `columns` as the header.
    #[must_use]
    pub fn new(columns: &'a [String], groups: &'a [IdentityGroup]) -> Self {
        Self {
            columns,
            groups,
            group_ids: false,
            require_non_empty: false,
        }
    }

    /// Prefix every row with the 1-based group number.
    #[must_use]
    pub fn with_group_ids(mut self, enabled: bool) -> Self {
        self.group_ids = enabled;
        self
    }

    /// Fail with [`CsvOutputError::EmptyReport`] when there are no groups.
    #[must_use]
    pub fn require_non_empty(mut self, required: bool) -> Self {
        self.require_non_empty = required;
        self
    }

    /// Write the report to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing fails, or `EmptyReport` when a
    /// non-empty report was required and there are no groups. Nothing is
    /// written in that case.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        if self.require_non_empty && self.groups.is_empty() {
            return Err(CsvOutputError::EmptyReport);
        }

        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header: Vec<&str> = Vec::with_capacity(self.columns.len() + 1);
        if self.group_ids {
            header.push(GROUP_ID_COLUMN);
        }
        header.extend(self.columns.iter().map(String::as_str));
        csv_writer.write_record(&header)?;

        for (idx, group) in self.groups.iter().enumerate() {
            let group_id = (idx + 1).to_string();
            for record in &group.records {
                let mut row: Vec<&str> = Vec::with_capacity(header.len());
                if self.group_ids {
                    row.push(&group_id);
                }
                row.extend(row_values(self.columns, record));
                csv_writer.write_record(&row)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate the report as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

/// Write a complete dataset (header plus every record) as CSV.
///
/// # Errors
///
/// Returns `CsvOutputError` if writing fails.
pub fn write_dataset<W: io::Write>(
    dataset: &ProfileDataset,
    writer: W,
) -> Result<(), CsvOutputError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&dataset.columns)?;
    for record in &dataset.records {
        csv_writer.write_record(row_values(&dataset.columns, record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Values of `record` laid out under `columns`; absent fields become empty.
fn row_values<'r>(
    columns: &'r [String],
    record: &'r ProfileRecord,
) -> impl Iterator<Item = &'r str> + 'r {
    columns
        .iter()
        .map(move |column| record.get(column).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::duplicates_only;
    use crate::profile::{DEFAULT_COLUMNS, EMAIL, NAME, USERNAME};

    fn columns() -> Vec<String> {
        vec![
            NAME.to_string(),
            USERNAME.to_string(),
            EMAIL.to_string(),
            "Bio".to_string(),
        ]
    }

    fn record(name: &str, bio: &str) -> ProfileRecord {
        ProfileRecord::from_pairs([
            (NAME, name),
            (USERNAME, "u"),
            (EMAIL, "e@x"),
            ("Bio", bio),
        ])
    }

    #[test]
    fn test_csv_report_basic() {
        let groups =
            duplicates_only(vec![record("A", "one"), record("B", "x"), record("A", "two")])
                .unwrap();
        let columns = columns();
        let csv_str = CsvOutput::new(&columns, &groups).to_string().unwrap();

        assert_eq!(csv_str, "Name,Username,Email,Bio\nA,u,e@x,one\nA,u,e@x,two\n");
    }

    #[test]
    fn test_csv_report_group_ids() {
        let groups = duplicates_only(vec![
            record("A", "1"),
            record("B", "2"),
            record("A", "3"),
            record("B", "4"),
        ])
        .unwrap();
        let columns = columns();
        let csv_str = CsvOutput::new(&columns, &groups)
            .with_group_ids(true)
            .to_string()
            .unwrap();

        let lines: Vec<&str> = csv_str.lines().collect();
        assert_eq!(lines[0], "group_id,Name,Username,Email,Bio");
        assert_eq!(lines[1], "1,A,u,e@x,1");
        assert_eq!(lines[2], "1,A,u,e@x,3");
        assert_eq!(lines[3], "2,B,u,e@x,2");
        assert_eq!(lines[4], "2,B,u,e@x,4");
    }

    #[test]
    fn test_csv_report_empty_is_header_only() {
        let columns = columns();
        let csv_str = CsvOutput::new(&columns, &[]).to_string().unwrap();
        assert_eq!(csv_str, "Name,Username,Email,Bio\n");
    }

    #[test]
    fn test_csv_report_empty_rejected_when_required() {
        let columns = columns();
        let mut buffer = Vec::new();
        let result = CsvOutput::new(&columns, &[])
            .require_non_empty(true)
            .write_to(&mut buffer);
        assert!(matches!(result, Err(CsvOutputError::EmptyReport)));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_csv_output_quoting() {
        let groups = duplicates_only(vec![record("A", "x, y"), record("A", "say \"hi\"")]).unwrap();
        let columns = columns();
        let csv_str = CsvOutput::new(&columns, &groups).to_string().unwrap();

        assert!(csv_str.contains("\"x, y\""));
        assert!(csv_str.contains("\"say \"\"hi\"\"\""));
    }

    #[test]
    fn test_write_dataset_round_trip() {
        let mut dataset = ProfileDataset::with_default_columns();
        dataset
            .records
            .push(ProfileRecord::from_pairs(DEFAULT_COLUMNS.map(|c| (c, c))));

        let mut buffer = Vec::new();
        write_dataset(&dataset, &mut buffer).unwrap();
        let reread = crate::source::read_profiles(buffer.as_slice()).unwrap();
        assert_eq!(reread, dataset);
    }

    #[test]
    fn test_absent_field_written_empty() {
        let columns = columns();
        let dataset = ProfileDataset::new(
            columns,
            vec![ProfileRecord::from_pairs([(NAME, "A"), (USERNAME, "a"), (EMAIL, "e")])],
        );
        let mut buffer = Vec::new();
        write_dataset(&dataset, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Name,Username,Email,Bio\nA,a,e,\n"
        );
    }
}
