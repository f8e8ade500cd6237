//! Profile records and identity fingerprints.
//!
//! This module provides:
//! - [`ProfileRecord`]: one account entry as ordered, named string fields
//! - [`ProfileDataset`]: a column list plus the records read from a source
//! - [`Fingerprint`]: the exact `(Name, Username, Email)` identity key

pub mod fingerprint;
pub mod record;

pub use fingerprint::{Fingerprint, MissingFieldError};
pub use record::{
    ProfileDataset, ProfileRecord, BIO, DEFAULT_COLUMNS, EMAIL, IDENTITY_FIELDS, LOCATION, NAME,
    PROFILE_URL, USERNAME,
};
