//! Profile record and dataset types.
//!
//! A [`ProfileRecord`] is an ordered list of `(field, value)` pairs. Values
//! are kept exactly as the source produced them: no trimming, no case
//! folding. Field order is preserved so that a record written back out
//! reproduces the column order it was read with.

use serde::ser::{Serialize, Serializer};

/// Display name column.
pub const NAME: &str = "Name";
/// Account handle column.
pub const USERNAME: &str = "Username";
/// Contact address column.
pub const EMAIL: &str = "Email";
/// Free-text biography column.
pub const BIO: &str = "Bio";
/// City column.
pub const LOCATION: &str = "Location";
/// Public profile link column.
pub const PROFILE_URL: &str = "Profile URL";

/// Fields that make up an identity, in fingerprint order.
pub const IDENTITY_FIELDS: [&str; 3] = [NAME, USERNAME, EMAIL];

/// Column layout written by the profile generator.
pub const DEFAULT_COLUMNS: [&str; 6] = [NAME, USERNAME, EMAIL, BIO, LOCATION, PROFILE_URL];

/// A single social-media account entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProfileRecord {
    fields: Vec<(String, String)>,
}

impl ProfileRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(field, value)` pairs, keeping their order.
    ///
    /// A repeated field name replaces the earlier value in place.
    ///
    /// # Example
    ///
    /// ```
    /// use profiledupe::profile::ProfileRecord;
    ///
    /// let record = ProfileRecord::from_pairs([("Name", "Ada"), ("Email", "ada@example.com")]);
    /// assert_eq!(record.get("Name"), Some("Ada"));
    /// assert_eq!(record.len(), 2);
    /// ```
    #[must_use]
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut record = Self::new();
        for (field, value) in pairs {
            record.set(field, value);
        }
        record
    }

    /// Set a field, appending it if it is new.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Builder-style variant of [`ProfileRecord::set`].
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Remove a field, returning its value if it was present.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        let idx = self.fields.iter().position(|(name, _)| name == field)?;
        Some(self.fields.remove(idx).1)
    }

    /// Look up a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Check whether a field is present (an empty value still counts).
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Iterate over `(field, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ProfileRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Records produced by a source, together with the column layout they came with.
///
/// The column list lets sinks emit a header even when no records survive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDataset {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// Records in source order.
    pub records: Vec<ProfileRecord>,
}

impl ProfileDataset {
    /// Create a dataset with the given columns and records.
    #[must_use]
    pub fn new(columns: Vec<String>, records: Vec<ProfileRecord>) -> Self {
        Self { columns, records }
    }

    /// Create an empty dataset using [`DEFAULT_COLUMNS`].
    #[must_use]
    pub fn with_default_columns() -> Self {
        Self::new(
            DEFAULT_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            Vec::new(),
        )
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identity columns missing from the column layout, in fingerprint order.
    #[must_use]
    pub fn missing_identity_columns(&self) -> Vec<&'static str> {
        IDENTITY_FIELDS
            .iter()
            .copied()
            .filter(|field| !self.columns.iter().any(|c| c == field))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_preserves_order() {
        let record = ProfileRecord::from_pairs([(EMAIL, "e"), (NAME, "n"), (USERNAME, "u")]);
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec![EMAIL, NAME, USERNAME]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut record = ProfileRecord::from_pairs([(NAME, "a"), (BIO, "b")]);
        record.set(NAME, "c");
        assert_eq!(record.get(NAME), Some("c"));
        assert_eq!(record.field_names().next(), Some(NAME));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_values_are_verbatim() {
        let record = ProfileRecord::new().with(NAME, "  Mixed Case  ");
        assert_eq!(record.get(NAME), Some("  Mixed Case  "));
    }

    #[test]
    fn test_empty_value_counts_as_present() {
        let record = ProfileRecord::new().with(EMAIL, "");
        assert!(record.contains(EMAIL));
        assert!(!record.contains(NAME));
    }

    #[test]
    fn test_remove() {
        let mut record = ProfileRecord::from_pairs([(NAME, "a"), (EMAIL, "b")]);
        assert_eq!(record.remove(EMAIL), Some("b".to_string()));
        assert_eq!(record.remove(EMAIL), None);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let record = ProfileRecord::from_pairs([(USERNAME, "u1"), (NAME, "N")]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Username":"u1","Name":"N"}"#);
    }

    #[test]
    fn test_dataset_missing_identity_columns() {
        let dataset = ProfileDataset::new(vec![NAME.to_string(), BIO.to_string()], Vec::new());
        assert_eq!(dataset.missing_identity_columns(), vec![USERNAME, EMAIL]);
        assert!(ProfileDataset::with_default_columns()
            .missing_identity_columns()
            .is_empty());
    }
}
