//! Parallel grouping over disjoint shards.
//!
//! The input is cut into consecutive shards, each shard is grouped on the
//! rayon thread pool, and the per-shard results are merged by fingerprint in
//! shard order. Because shards are consecutive and merged in order, the
//! merged result is identical to a sequential [`group`] over the whole input.
//!
//! # Example
//!
//! ```
//! use profiledupe::duplicates::{group, group_sharded};
//! use profiledupe::profile::ProfileRecord;
//!
//! let records: Vec<ProfileRecord> = (0..10)
//!     .map(|i| {
//!         let id = (i % 3).to_string();
//!         ProfileRecord::from_pairs([("Name", id.as_str()), ("Username", "u"), ("Email", "e")])
//!     })
//!     .collect();
//!
//! let sharded = group_sharded(records.clone(), 4).unwrap();
//! assert_eq!(sharded, group(records).unwrap());
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use rayon::prelude::*;

use super::groups::{group, IdentityGroup};
use crate::profile::{Fingerprint, MissingFieldError, ProfileRecord};

/// Merge per-shard grouping results into one.
///
/// Shards must be supplied in input order. Groups keep the order in which
/// their fingerprint first appears across the shard sequence, and records
/// from later shards are appended after records from earlier ones.
#[must_use]
pub fn merge_groups(shards: impl IntoIterator<Item = Vec<IdentityGroup>>) -> Vec<IdentityGroup> {
    let mut index: HashMap<Fingerprint, usize> = HashMap::new();
    let mut merged: Vec<IdentityGroup> = Vec::new();

    for shard in shards {
        for group in shard {
            match index.entry(group.fingerprint.clone()) {
                Entry::Occupied(slot) => merged[*slot.get()].records.extend(group.records),
                Entry::Vacant(slot) => {
                    slot.insert(merged.len());
                    merged.push(group);
                }
            }
        }
    }

    merged
}

/// Split records into consecutive shards of at most `shard_size` records.
fn split_shards(records: Vec<ProfileRecord>, shard_size: usize) -> Vec<Vec<ProfileRecord>> {
    let shard_size = shard_size.max(1);
    let mut shards = Vec::with_capacity(records.len().div_ceil(shard_size));
    let mut iter = records.into_iter();
    loop {
        let shard: Vec<ProfileRecord> = iter.by_ref().take(shard_size).collect();
        if shard.is_empty() {
            break;
        }
        shards.push(shard);
    }
    shards
}

/// Partition records by fingerprint using parallel shards.
///
/// # Arguments
///
/// * `records` - Records in input order
/// * `shard_size` - Maximum records per shard (0 is treated as 1)
///
/// # Errors
///
/// Returns the same [`MissingFieldError`] a sequential [`group`] would: the
/// first failing record in input order.
pub fn group_sharded(
    records: Vec<ProfileRecord>,
    shard_size: usize,
) -> Result<Vec<IdentityGroup>, MissingFieldError> {
    let shards = split_shards(records, shard_size);
    log::debug!(
        "Grouping {} shard(s) of up to {} records on {} threads",
        shards.len(),
        shard_size.max(1),
        rayon::current_num_threads()
    );

    let results: Vec<Result<Vec<IdentityGroup>, MissingFieldError>> =
        shards.into_par_iter().map(group).collect();

    let shard_groups = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(merge_groups(shard_groups))
}
