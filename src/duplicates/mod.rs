//! Duplicate identity detection.
//!
//! This module provides functionality for:
//! - Partitioning records by fingerprint (`group`)
//! - Keeping only replicated identities (`duplicates_only`)
//! - Grouping large inputs over parallel shards (`group_sharded`)

pub mod groups;
pub mod shard;

pub use groups::{
    duplicates_only, filter_duplicates, find_duplicates, group, GroupingStats, IdentityGroup,
};
pub use shard::{group_sharded, merge_groups};

use crate::profile::{MissingFieldError, ProfileRecord};

/// Find replicated identities, optionally over parallel shards.
///
/// With `shard_size` of `None` the whole input is grouped in one sequential
/// pass; otherwise [`group_sharded`] is used. Both give identical results.
///
/// # Errors
///
/// Returns [`MissingFieldError`] if any record lacks an identity field.
pub fn find_duplicates_with(
    records: Vec<ProfileRecord>,
    shard_size: Option<usize>,
) -> Result<(Vec<IdentityGroup>, GroupingStats), MissingFieldError> {
    let groups = match shard_size {
        Some(size) => group_sharded(records, size)?,
        None => group(records)?,
    };
    Ok(groups::summarize(groups))
}
