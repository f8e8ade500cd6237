//! JSON output for duplicate reports.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "groups": [
//!     {
//!       "group_id": 1,
//!       "fingerprint": { "name": "A", "username": "a1", "email": "a@x.com" },
//!       "count": 2,
//!       "records": [
//!         { "Name": "A", "Username": "a1", "Email": "a@x.com", "Bio": "..." }
//!       ]
//!     }
//!   ],
//!   "summary": {
//!     "total_records": 500,
//!     "unique_identities": 451,
//!     "duplicate_groups": 1,
//!     "duplicate_records": 50,
//!     "exit_code": 0,
//!     "exit_code_name": "PD000",
//!     "generated_at": "2024-01-01T00:00:00+00:00"
//!   }
//! }
//! ```

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::duplicates::{GroupingStats, IdentityGroup};
use crate::error::ExitCode;
use crate::profile::{Fingerprint, ProfileRecord};

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup<'a> {
    /// 1-based position in the report
    pub group_id: usize,
    /// Shared identity key
    pub fingerprint: &'a Fingerprint,
    /// Number of records in the group
    pub count: usize,
    /// Full records, every field in source order
    pub records: &'a [ProfileRecord],
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Total number of records read
    pub total_records: usize,
    /// Number of distinct fingerprints
    pub unique_identities: usize,
    /// Number of replicated identities
    pub duplicate_groups: usize,
    /// Number of records in replicated identities
    pub duplicate_records: usize,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "PD000")
    pub exit_code_name: String,
    /// Report creation time (RFC 3339)
    pub generated_at: String,
}

impl JsonSummary {
    /// Create a JSON summary from grouping stats and an exit code.
    #[must_use]
    pub fn from_stats(stats: &GroupingStats, exit_code: ExitCode) -> Self {
        Self {
            total_records: stats.total_records,
            unique_identities: stats.unique_identities,
            duplicate_groups: stats.duplicate_groups,
            duplicate_records: stats.duplicate_records,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Duplicate groups in first-occurrence order
    pub groups: Vec<JsonDuplicateGroup<'a>>,
    /// Grouping summary
    pub summary: JsonSummary,
    #[serde(skip)]
    require_non_empty: bool,
}

impl<'a> JsonOutput<'a> {
    /// Create a JSON report from duplicate groups, stats and exit code.
    ///
    /// # Example
    ///
    /// ```
    /// use profiledupe::duplicates::GroupingStats;
    /// use profiledupe::error::ExitCode;
    /// use profiledupe::output::json::JsonOutput;
    ///
    /// let output = JsonOutput::new(&[], &GroupingStats::default(), ExitCode::NoDuplicates);
    /// assert!(output.groups.is_empty());
    /// assert_eq!(output.summary.exit_code, 2);
    /// ```
    #[must_use]
    pub fn new(groups: &'a [IdentityGroup], stats: &GroupingStats, exit_code: ExitCode) -> Self {
        Self {
            groups: groups
                .iter()
                .enumerate()
                .map(|(idx, group)| JsonDuplicateGroup {
                    group_id: idx + 1,
                    fingerprint: &group.fingerprint,
                    count: group.len(),
                    records: &group.records,
                })
                .collect(),
            summary: JsonSummary::from_stats(stats, exit_code),
            require_non_empty: false,
        }
    }

    /// Fail with [`JsonOutputError::EmptyReport`] when there are no groups.
    #[must_use]
    pub fn require_non_empty(mut self, required: bool) -> Self {
        self.require_non_empty = required;
        self
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The writer to output to (e.g., stdout)
    /// * `pretty` - Whether to pretty-print the output
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails, or `EmptyReport` when a non-empty
    /// report was required and there are no groups.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        if self.require_non_empty && self.groups.is_empty() {
            return Err(JsonOutputError::EmptyReport);
        }
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),

    /// A non-empty report was required but no duplicate groups were found
    #[error("No duplicate profiles found; refusing to write an empty report")]
    EmptyReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::find_duplicates;
    use crate::profile::{BIO, EMAIL, NAME, USERNAME};

    fn create_test_groups() -> (Vec<IdentityGroup>, GroupingStats) {
        let make = |name: &str, bio: &str| {
            ProfileRecord::from_pairs([(NAME, name), (USERNAME, "u"), (EMAIL, "e@x"), (BIO, bio)])
        };
        find_duplicates(vec![
            make("A", "a1"),
            make("B", "b1"),
            make("A", "a2"),
            make("C", "c1"),
            make("B", "b2"),
            make("B", "b3"),
        ])
        .unwrap()
    }

    #[test]
    fn test_json_output_empty() {
        let output = JsonOutput::new(&[], &GroupingStats::default(), ExitCode::NoDuplicates);
        assert!(output.groups.is_empty());
        assert_eq!(output.summary.total_records, 0);
        assert_eq!(output.summary.exit_code_name, "PD002");
    }

    #[test]
    fn test_json_output_with_groups() {
        let (groups, stats) = create_test_groups();
        let output = JsonOutput::new(&groups, &stats, ExitCode::Success);

        assert_eq!(output.groups.len(), 2);
        assert_eq!(output.groups[0].group_id, 1);
        assert_eq!(output.groups[0].count, 2);
        assert_eq!(output.groups[1].count, 3);
        assert_eq!(output.summary.total_records, 6);
        assert_eq!(output.summary.unique_identities, 3);
        assert_eq!(output.summary.duplicate_records, 5);
    }

    #[test]
    fn test_to_json_compact() {
        let output = JsonOutput::new(&[], &GroupingStats::default(), ExitCode::Success);
        let json = output.to_json().unwrap();

        assert!(!json.contains('\n'));
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_json_is_valid() {
        let (groups, stats) = create_test_groups();
        let output = JsonOutput::new(&groups, &stats, ExitCode::Success);
        let json = output.to_json_pretty().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let groups = parsed.get("groups").unwrap().as_array().unwrap();
        assert_eq!(groups.len(), 2);

        let first = &groups[0];
        assert_eq!(first["fingerprint"]["name"], "A");
        assert_eq!(first["records"][1]["Bio"], "a2");
        assert_eq!(parsed["summary"]["duplicate_groups"], 2);
        assert!(parsed.get("require_non_empty").is_none());
    }

    #[test]
    fn test_record_fields_keep_order() {
        let (groups, stats) = create_test_groups();
        let json = JsonOutput::new(&groups, &stats, ExitCode::Success)
            .to_json()
            .unwrap();
        assert!(json.contains(r#"{"Name":"A","Username":"u","Email":"e@x","Bio":"a1"}"#));
    }

    #[test]
    fn test_write_to() {
        let output = JsonOutput::new(&[], &GroupingStats::default(), ExitCode::Success);
        let mut buffer = Vec::new();

        output.write_to(&mut buffer, false).unwrap();

        let written = String::from_utf8(buffer).unwrap();
        assert!(written.starts_with('{'));
        assert!(written.ends_with("}\n"));
    }

    #[test]
    fn test_write_to_rejects_empty_when_required() {
        let output = JsonOutput::new(&[], &GroupingStats::default(), ExitCode::NoDuplicates)
            .require_non_empty(true);
        let mut buffer = Vec::new();
        let result = output.write_to(&mut buffer, true);
        assert!(matches!(result, Err(JsonOutputError::EmptyReport)));
        assert!(buffer.is_empty());
    }
}
