// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool state for exclusive test-account allocation
//!
//! A single shared document tracks which resource indices are claimable and
//! which are held, by whom. Every mutation happens under the storage lock;
//! this module is pure bookkeeping over that document.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Unique identifier for a claim holder
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderId(pub String);

impl HolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Render the record stored against a claimed index: `{holder}-{millis}`
    pub fn record(&self, timestamp_millis: i64) -> String {
        format!("{}-{}", self.0, timestamp_millis)
    }

    /// Whether a stored record was written by this holder
    pub fn wrote_record(&self, record: &str) -> bool {
        record
            .rsplit_once('-')
            .is_some_and(|(holder, _)| holder == self.0)
    }
}

impl std::fmt::Display for HolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shard assignment recorded alongside a partitioned pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardInfo {
    pub index: u32,
    pub total: u32,
    #[serde(rename = "startIndex")]
    pub start_index: u32,
    #[serde(rename = "endIndex")]
    pub end_index: u32,
}

/// Errors in pool state transitions
#[derive(Debug, Error)]
pub enum PoolError {
    /// Nothing left to claim; callers back off and retry
    #[error("no available slots in pool")]
    Empty,
    /// An index is tracked as both available and in use. Never auto-repaired:
    /// it signals a double-claim defect, not contention.
    #[error("pool state corrupted: index {index} is both available and in use")]
    Corrupted { index: u32 },
}

/// Outcome of restoring an index to the available set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Restored {
    /// Moved from in-use back to available
    Moved,
    /// Already available; restoring again is a no-op
    AlreadyAvailable,
    /// Outside the set of indices this pool tracks
    Unknown,
}

/// Shared pool document
///
/// Wire shape is pinned: `available` (ascending), `inUse` (object keyed by
/// decimal index), `lastUpdated` (epoch millis), optional `shardInfo`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolState {
    /// Claimable indices, kept sorted ascending
    #[serde(default)]
    pub available: Vec<u32>,
    /// Held indices mapped to their holder record
    #[serde(rename = "inUse", default)]
    pub in_use: BTreeMap<u32, String>,
    /// Epoch millis of the last mutation
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: i64,
    /// Present when this pool is one shard of a larger range
    #[serde(rename = "shardInfo", default, skip_serializing_if = "Option::is_none")]
    pub shard_info: Option<ShardInfo>,
}

impl PoolState {
    /// All-available pool over `[0, count)`
    pub fn new(count: u32) -> Self {
        Self::new_range(0, count)
    }

    /// All-available pool over `[start, end)`
    pub fn new_range(start: u32, end: u32) -> Self {
        PoolState {
            available: (start..end).collect(),
            in_use: BTreeMap::new(),
            last_updated: Utc::now().timestamp_millis(),
            shard_info: None,
        }
    }

    pub fn with_shard(mut self, shard: ShardInfo) -> Self {
        self.shard_info = Some(shard);
        self
    }

    /// Claim the lowest available index for `holder`.
    ///
    /// Ascending order keeps allocation reproducible across runs and surfaces
    /// low-index defects first.
    pub fn claim_lowest(&mut self, holder: &HolderId) -> Result<u32, PoolError> {
        let index = *self.available.first().ok_or(PoolError::Empty)?;
        if self.in_use.contains_key(&index) {
            return Err(PoolError::Corrupted { index });
        }
        self.available.remove(0);
        self.in_use
            .insert(index, holder.record(Utc::now().timestamp_millis()));
        self.touch();
        Ok(index)
    }

    /// Move an index from in-use back to available, keeping the order sorted.
    /// Idempotent: restoring an already-available index is a no-op.
    pub fn restore(&mut self, index: u32) -> Restored {
        if self.in_use.remove(&index).is_some() {
            if let Err(pos) = self.available.binary_search(&index) {
                self.available.insert(pos, index);
            }
            self.touch();
            Restored::Moved
        } else if self.available.binary_search(&index).is_ok() {
            Restored::AlreadyAvailable
        } else {
            Restored::Unknown
        }
    }

    /// Holder record for an in-use index, if any
    pub fn recorded_holder(&self, index: u32) -> Option<&str> {
        self.in_use.get(&index).map(String::as_str)
    }

    /// Every index this pool tracks, available or held, sorted ascending
    pub fn universe(&self) -> Vec<u32> {
        let mut all: Vec<u32> = self
            .available
            .iter()
            .copied()
            .chain(self.in_use.keys().copied())
            .collect();
        all.sort_unstable();
        all.dedup();
        all
    }

    /// Restore full availability, preserving shard info
    pub fn reset(&mut self) {
        self.available = self.universe();
        self.in_use.clear();
        self.touch();
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn in_use_count(&self) -> usize {
        self.in_use.len()
    }

    pub fn total(&self) -> usize {
        self.available.len() + self.in_use.len()
    }

    /// Check the structural invariants: `available` sorted ascending and
    /// unique, and disjoint from the in-use key set.
    pub fn verify(&self) -> Result<(), PoolError> {
        for pair in self.available.windows(2) {
            if pair[0] >= pair[1] {
                return Err(PoolError::Corrupted { index: pair[1] });
            }
        }
        for index in &self.available {
            if self.in_use.contains_key(index) {
                return Err(PoolError::Corrupted { index: *index });
            }
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now().timestamp_millis();
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
