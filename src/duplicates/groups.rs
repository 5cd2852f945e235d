//! Grouping fingerprinted records into duplicate sets.
//!
//! # Overview
//!
//! Grouping is exact: two records are duplicates when their fingerprints
//! are bit-identical. There is no distance threshold; fingerprint
//! collisions ARE the duplicate signal. Invalid records (decode
//! failures) are dropped before partitioning, and partitions with a
//! single member are discarded.
//!
//! # Example
//!
//! ```
//! use picdupe::duplicates::{group_records, PhotoRecord};
//! use std::path::PathBuf;
//!
//! let records = vec![
//!     PhotoRecord::new(PathBuf::from("/a.jpg"), 0xAB, 100),
//!     PhotoRecord::new(PathBuf::from("/b.jpg"), 0xAB, 50),
//!     PhotoRecord::new(PathBuf::from("/c.jpg"), 0xCD, 10),
//! ];
//!
//! let (groups, stats) = group_records(records);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].canonical().path, PathBuf::from("/a.jpg"));
//! assert_eq!(stats.singleton_records, 1);
//! ```

use std::collections::HashMap;

use crate::hashing::Fingerprint;

use super::{DuplicateGroup, PhotoRecord};

/// Statistics from the grouping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total records handed to the grouper
    pub total_records: usize,
    /// Records dropped because their file failed to decode
    pub invalid_records: usize,
    /// Valid records whose fingerprint matched no other record
    pub singleton_records: usize,
    /// Valid records that landed in a duplicate group
    pub grouped_records: usize,
    /// Number of duplicate groups (2+ members)
    pub duplicate_groups: usize,
}

impl GroupingStats {
    /// Redundant copies across all groups (every member past the first).
    #[must_use]
    pub fn redundant_copies(&self) -> usize {
        self.grouped_records
            .saturating_sub(self.duplicate_groups)
    }
}

/// Partition records by exact fingerprint equality.
///
/// Invalid records are filtered out first and only partitions with two
/// or more members are returned. Groups appear in the discovery order of
/// their first member, and members keep their input order; the canonical
/// member is picked per [`DuplicateGroup::new`].
///
/// An empty input yields an empty group list.
///
/// # Arguments
///
/// * `records` - The complete record set for this scan
#[must_use]
pub fn group_records(
    records: impl IntoIterator<Item = PhotoRecord>,
) -> (Vec<DuplicateGroup>, GroupingStats) {
    let mut stats = GroupingStats::default();
    let mut order: Vec<Fingerprint> = Vec::new();
    let mut buckets: HashMap<Fingerprint, Vec<PhotoRecord>> = HashMap::new();

    for record in records {
        stats.total_records += 1;

        if !record.valid {
            stats.invalid_records += 1;
            log::debug!("Excluding invalid record {}", record.path.display());
            continue;
        }

        let bucket = buckets.entry(record.fingerprint).or_insert_with(|| {
            order.push(record.fingerprint);
            Vec::new()
        });
        bucket.push(record);
    }

    let mut groups = Vec::new();
    for fp in order {
        let Some(members) = buckets.remove(&fp) else {
            continue;
        };

        if members.len() < 2 {
            stats.singleton_records += members.len();
            continue;
        }

        stats.grouped_records += members.len();
        stats.duplicate_groups += 1;
        log::debug!(
            "Fingerprint {:08x}: {} duplicates",
            fp,
            members.len()
        );
        groups.push(DuplicateGroup::new(fp, members));
    }

    log::info!(
        "Grouping complete: {} records -> {} duplicate groups ({} redundant copies)",
        stats.total_records,
        stats.duplicate_groups,
        stats.redundant_copies()
    );

    (groups, stats)
}
