//! Identity grouping of profile records.
//!
//! # Overview
//!
//! Grouping is a single linear pass over the input. Each record's
//! [`Fingerprint`] is computed and the record is appended to the group for
//! that fingerprint, creating the group on first sight. An index from
//! fingerprint to group slot keeps lookups O(1) while the group list itself
//! keeps first-occurrence order.
//!
//! The result is a partition of the input: every record lands in exactly one
//! group, groups appear in the order their fingerprint was first seen, and
//! records inside a group keep input order.
//!
//! # Example
//!
//! ```
//! use profiledupe::duplicates::{duplicates_only, group};
//! use profiledupe::profile::ProfileRecord;
//!
//! let make = |name: &str, bio: &str| {
//!     ProfileRecord::from_pairs([
//!         ("Name", name), ("Username", "u"), ("Email", "e@x.com"), ("Bio", bio),
//!     ])
//! };
//! let records = vec![make("A", "first"), make("B", "other"), make("A", "second")];
//!
//! let groups = group(records.clone()).unwrap();
//! assert_eq!(groups.len(), 2);
//!
//! let dupes = duplicates_only(records).unwrap();
//! assert_eq!(dupes.len(), 1);
//! assert_eq!(dupes[0].records[1].get("Bio"), Some("second"));
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;

use crate::profile::{Fingerprint, MissingFieldError, ProfileRecord};

/// Records sharing one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityGroup {
    /// The shared identity key
    pub fingerprint: Fingerprint,
    /// Records with this fingerprint, in input order
    pub records: Vec<ProfileRecord>,
}

impl IdentityGroup {
    /// Create a group holding a single record.
    #[must_use]
    pub fn new(fingerprint: Fingerprint, first: ProfileRecord) -> Self {
        Self::with_records(fingerprint, vec![first])
    }

    /// Create a group with initial records.
    #[must_use]
    pub fn with_records(fingerprint: Fingerprint, records: Vec<ProfileRecord>) -> Self {
        Self {
            fingerprint,
            records,
        }
    }

    /// Append a record to this group.
    ///
    /// # Panics
    ///
    /// Debug assertion fails if the record's fingerprint differs from the group's.
    pub fn add(&mut self, record: ProfileRecord) {
        debug_assert_eq!(
            Fingerprint::of(&record).ok().as_ref(),
            Some(&self.fingerprint),
            "record does not belong to group {}",
            self.fingerprint
        );
        self.records.push(record);
    }

    /// Number of records in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if this identity was replicated (2+ records).
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.records.len() > 1
    }

    /// Number of extra copies beyond the first occurrence.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.records.len().saturating_sub(1)
    }
}

/// Statistics from a grouping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupingStats {
    /// Total number of records processed
    pub total_records: usize,
    /// Number of distinct fingerprints
    pub unique_identities: usize,
    /// Number of fingerprints seen more than once
    pub duplicate_groups: usize,
    /// Number of records belonging to duplicate groups
    pub duplicate_records: usize,
    /// Number of singleton groups discarded
    pub eliminated_unique: usize,
}

impl GroupingStats {
    /// Derive statistics from a full (unfiltered) grouping result.
    #[must_use]
    pub fn from_groups(groups: &[IdentityGroup]) -> Self {
        let mut stats = Self {
            unique_identities: groups.len(),
            ..Self::default()
        };
        for group in groups {
            stats.total_records += group.len();
            if group.is_duplicate() {
                stats.duplicate_groups += 1;
                stats.duplicate_records += group.len();
            } else {
                stats.eliminated_unique += 1;
            }
        }
        stats
    }

    /// Percentage of records that belong to a replicated identity.
    #[must_use]
    pub fn duplicate_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.duplicate_records as f64 / self.total_records as f64) * 100.0
        }
    }
}

/// Partition records by fingerprint.
///
/// # Arguments
///
/// * `records` - Records in input order
///
/// # Returns
///
/// Every group, including singletons, in first-occurrence order of its
/// fingerprint. Records inside a group keep input order.
///
/// # Errors
///
/// Returns [`MissingFieldError`] for the first record lacking an identity
/// field. Nothing is returned for the records already processed.
///
/// # Performance
///
/// - Time complexity: O(n) where n is the number of records
/// - No sorting and no pairwise comparison
pub fn group(
    records: impl IntoIterator<Item = ProfileRecord>,
) -> Result<Vec<IdentityGroup>, MissingFieldError> {
    let mut index: HashMap<Fingerprint, usize> = HashMap::new();
    let mut groups: Vec<IdentityGroup> = Vec::new();

    for record in records {
        let fingerprint = Fingerprint::of(&record)?;
        match index.entry(fingerprint) {
            Entry::Occupied(slot) => groups[*slot.get()].add(record),
            Entry::Vacant(slot) => {
                groups.push(IdentityGroup::new(slot.key().clone(), record));
                slot.insert(groups.len() - 1);
            }
        }
    }

    Ok(groups)
}

/// Partition records and keep only replicated identities.
///
/// Groups of exactly one record are dropped; the rest keep first-occurrence
/// order. An empty result means no identity was replicated, which is a
/// normal outcome.
///
/// # Errors
///
/// Returns [`MissingFieldError`] under the same conditions as [`group`].
pub fn duplicates_only(
    records: impl IntoIterator<Item = ProfileRecord>,
) -> Result<Vec<IdentityGroup>, MissingFieldError> {
    Ok(filter_duplicates(group(records)?))
}

/// Drop singleton groups from a grouping result.
#[must_use]
pub fn filter_duplicates(groups: Vec<IdentityGroup>) -> Vec<IdentityGroup> {
    groups
        .into_iter()
        .filter(|group| {
            if group.is_duplicate() {
                log::debug!(
                    "Identity {} appears {} times",
                    group.fingerprint,
                    group.len()
                );
                true
            } else {
                log::trace!("Eliminated unique identity: {}", group.fingerprint);
                false
            }
        })
        .collect()
}

/// Find replicated identities and report grouping statistics.
///
/// Equivalent to [`duplicates_only`] plus a [`GroupingStats`] summary, which
/// is also logged at info level.
///
/// # Errors
///
/// Returns [`MissingFieldError`] under the same conditions as [`group`].
pub fn find_duplicates(
    records: impl IntoIterator<Item = ProfileRecord>,
) -> Result<(Vec<IdentityGroup>, GroupingStats), MissingFieldError> {
    let groups = group(records)?;
    Ok(summarize(groups))
}

/// Compute stats for a full grouping result, log them, and drop singletons.
pub(crate) fn summarize(groups: Vec<IdentityGroup>) -> (Vec<IdentityGroup>, GroupingStats) {
    let stats = GroupingStats::from_groups(&groups);
    let duplicates = filter_duplicates(groups);

    log::info!(
        "Grouping complete: {} records → {} identities, {} replicated ({:.1}% of records)",
        stats.total_records,
        stats.unique_identities,
        stats.duplicate_groups,
        stats.duplicate_rate()
    );

    (duplicates, stats)
}
