//! Identity fingerprints.
//!
//! A fingerprint is the `(Name, Username, Email)` triple of a record, taken
//! verbatim. Two records share a fingerprint only when all three values are
//! byte-for-byte equal; no normalization of any kind is applied.
//!
//! # Example
//!
//! ```
//! use profiledupe::profile::{Fingerprint, ProfileRecord};
//!
//! let a = ProfileRecord::from_pairs([
//!     ("Name", "Ada"), ("Username", "ada"), ("Email", "ada@x.com"), ("Bio", "one"),
//! ]);
//! let b = a.clone().with("Bio", "two");
//!
//! assert_eq!(Fingerprint::of(&a).unwrap(), Fingerprint::of(&b).unwrap());
//! ```

use serde::Serialize;
use thiserror::Error;

use super::record::{ProfileRecord, EMAIL, NAME, USERNAME};

/// A record lacks one of the identity fields.
///
/// Sources are expected to guarantee schema completeness, so this signals a
/// contract violation by whatever produced the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("profile record is missing required field `{field}`")]
pub struct MissingFieldError {
    /// Name of the first missing identity field.
    pub field: &'static str,
}

/// Exact-match identity key of a profile record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Fingerprint {
    /// Verbatim `Name` value
    pub name: String,
    /// Verbatim `Username` value
    pub username: String,
    /// Verbatim `Email` value
    pub email: String,
}

impl Fingerprint {
    /// Create a fingerprint from its three components.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            email: email.into(),
        }
    }

    /// Compute the fingerprint of a record.
    ///
    /// Fields are read in `Name`, `Username`, `Email` order and the first
    /// absent one is reported.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFieldError`] if any identity field is absent.
    pub fn of(record: &ProfileRecord) -> Result<Self, MissingFieldError> {
        let lookup = |field: &'static str| record.get(field).ok_or(MissingFieldError { field });
        Ok(Self::new(lookup(NAME)?, lookup(USERNAME)?, lookup(EMAIL)?))
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} / {}", self.name, self.username, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::record::{BIO, LOCATION};

    fn record(name: &str, username: &str, email: &str) -> ProfileRecord {
        ProfileRecord::from_pairs([(NAME, name), (USERNAME, username), (EMAIL, email)])
    }

    #[test]
    fn test_fingerprint_fields() {
        let fp = Fingerprint::of(&record("A", "a1", "a@x.com")).unwrap();
        assert_eq!(fp, Fingerprint::new("A", "a1", "a@x.com"));
    }

    #[test]
    fn test_other_fields_ignored() {
        let base = record("A", "a1", "a@x.com");
        let decorated = base.clone().with(BIO, "hello").with(LOCATION, "Paris");
        assert_eq!(
            Fingerprint::of(&base).unwrap(),
            Fingerprint::of(&decorated).unwrap()
        );
    }

    #[test]
    fn test_field_order_in_record_irrelevant() {
        let a = record("A", "a1", "a@x.com");
        let b = ProfileRecord::from_pairs([(EMAIL, "a@x.com"), (USERNAME, "a1"), (NAME, "A")]);
        assert_eq!(Fingerprint::of(&a).unwrap(), Fingerprint::of(&b).unwrap());
    }

    #[test]
    fn test_no_normalization() {
        let a = Fingerprint::of(&record("A", "a1", "a@x.com")).unwrap();
        assert_ne!(a, Fingerprint::of(&record("a", "a1", "a@x.com")).unwrap());
        assert_ne!(a, Fingerprint::of(&record("A ", "a1", "a@x.com")).unwrap());
        assert_ne!(a, Fingerprint::of(&record("A", "a1", "A@X.COM")).unwrap());
    }

    #[test]
    fn test_components_do_not_bleed() {
        // ("ab", "c") and ("a", "bc") must stay distinct
        let a = Fingerprint::of(&record("ab", "c", "e")).unwrap();
        let b = Fingerprint::of(&record("a", "bc", "e")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_values_allowed() {
        let fp = Fingerprint::of(&record("", "", "")).unwrap();
        assert_eq!(fp, Fingerprint::new("", "", ""));
    }

    #[test]
    fn test_missing_email() {
        let mut r = record("A", "a1", "a@x.com");
        r.remove(EMAIL);
        assert_eq!(
            Fingerprint::of(&r),
            Err(MissingFieldError { field: EMAIL })
        );
    }

    #[test]
    fn test_first_missing_field_reported() {
        let r = ProfileRecord::from_pairs([(EMAIL, "a@x.com")]);
        assert_eq!(Fingerprint::of(&r).unwrap_err().field, NAME);

        let r = ProfileRecord::from_pairs([(NAME, "A")]);
        assert_eq!(Fingerprint::of(&r).unwrap_err().field, USERNAME);
    }

    #[test]
    fn test_error_message() {
        let err = MissingFieldError { field: EMAIL };
        assert_eq!(
            err.to_string(),
            "profile record is missing required field `Email`"
        );
    }

    #[test]
    fn test_display() {
        let fp = Fingerprint::new("A", "a1", "a@x.com");
        assert_eq!(fp.to_string(), "A / a1 / a@x.com");
    }
}
