// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool manager: allocator, releaser, status, reset
//!
//! Every mutating operation is a read-modify-write of the whole pool document
//! under the lock primitive. Claim retries with growing backoff while the
//! pool is empty; release never raises, because cleanup failure must not
//! cascade into unrelated failures.

use serde::Serialize;
use std::thread;
use tap_core::{HolderId, LeaseMode, Partition, PoolConfig, PoolError, PoolState, Restored, ShardInfo};
use tap_storage::{LockError, LockPrimitive, StateStore, StoreError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by `claim`
#[derive(Debug, Error)]
pub enum ClaimError {
    /// No slot became available within the retry budget. Hard failure: the
    /// caller's unit of work cannot proceed.
    #[error("pool exhausted after {attempts} claim attempts")]
    Exhausted { attempts: u32 },
    /// Fatal: the document tracks an index as both available and in use.
    /// Never auto-healed; silent repair could mask a double-claim defect.
    #[error("pool state corrupted: index {index} is both available and in use")]
    Corrupted { index: u32 },
}

/// Errors from setup operations (initialize / reset)
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("lock error: {0}")]
    Lock(#[from] LockError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Best-effort snapshot of pool counts, read without the lock
#[derive(Debug, Clone, Serialize)]
pub struct PoolStatus {
    pub available: usize,
    #[serde(rename = "inUse")]
    pub in_use: usize,
    pub total: usize,
    #[serde(rename = "shardInfo", skip_serializing_if = "Option::is_none")]
    pub shard_info: Option<ShardInfo>,
}

/// Outcome of one locked claim attempt
enum Attempt {
    Claimed(u32),
    Empty,
    Corrupted { index: u32 },
    Failed,
}

/// Coordinates exclusive slot ownership across processes
pub struct PoolManager<S, L> {
    store: S,
    lock: L,
    config: PoolConfig,
}

impl<S: StateStore, L: LockPrimitive> PoolManager<S, L> {
    pub fn new(store: S, lock: L, config: PoolConfig) -> Self {
        Self {
            store,
            lock,
            config,
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Establish the all-available state for a full pool of `count` slots
    pub fn initialize(&self, count: u32) -> Result<(), SetupError> {
        self.write_initial(PoolState::new(count))
    }

    /// Establish one shard's sub-range of a partitioned pool
    pub fn initialize_partition(&self, partition: &Partition) -> Result<(), SetupError> {
        let state =
            PoolState::new_range(partition.start, partition.end).with_shard(partition.shard_info());
        self.write_initial(state)
    }

    fn write_initial(&self, state: PoolState) -> Result<(), SetupError> {
        let holder = HolderId::new("init");
        let _guard = self.lock.acquire(&holder)?;
        self.store.write(&state)?;
        info!(total = state.total(), shard = ?state.shard_info, "pool initialized");
        Ok(())
    }

    /// Claim exclusive ownership of the lowest available slot.
    ///
    /// Retries with growing backoff while the pool is empty; store and lock
    /// failures consume a retry as well. Corruption is fatal and never
    /// retried.
    pub fn claim(&self, holder: &HolderId) -> Result<u32, ClaimError> {
        let attempts = self.config.claim.attempts.max(1);

        for attempt in 1..=attempts {
            match self.try_claim(holder) {
                Attempt::Claimed(index) => {
                    info!(holder = %holder, index, "claimed slot");
                    return Ok(index);
                }
                Attempt::Corrupted { index } => {
                    return Err(ClaimError::Corrupted { index });
                }
                Attempt::Empty => {
                    if attempt < attempts {
                        let delay = self.config.claim.backoff_base * attempt;
                        debug!(
                            holder = %holder,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            "pool empty, backing off"
                        );
                        thread::sleep(delay);
                    }
                }
                Attempt::Failed => {
                    if attempt < attempts {
                        thread::sleep(self.config.lock.retry_delay);
                    }
                }
            }
        }

        Err(ClaimError::Exhausted { attempts })
    }

    /// One locked read-modify-write claim attempt. The guard releases the
    /// lock on every exit path, including errors.
    fn try_claim(&self, holder: &HolderId) -> Attempt {
        let _guard = match self.lock.acquire(holder) {
            Ok(guard) => guard,
            Err(e) => {
                // Timeouts are recovered by forced removal inside the
                // primitive; reaching here means even that failed.
                warn!(holder = %holder, error = %e, "claim attempt failed acquiring lock");
                return Attempt::Failed;
            }
        };

        let mut state = match self.store.read() {
            Ok(state) => state,
            Err(e) => {
                warn!(holder = %holder, error = %e, "claim attempt failed reading state");
                return Attempt::Failed;
            }
        };

        let index = match state.claim_lowest(holder) {
            Ok(index) => index,
            Err(PoolError::Empty) => return Attempt::Empty,
            Err(PoolError::Corrupted { index }) => return Attempt::Corrupted { index },
        };

        match self.store.write(&state) {
            Ok(()) => Attempt::Claimed(index),
            Err(e) => {
                warn!(holder = %holder, index, error = %e, "claim attempt failed persisting state");
                Attempt::Failed
            }
        }
    }

    /// Return a claimed slot to the pool.
    ///
    /// Never fails: every problem is logged and swallowed. An ownership
    /// mismatch proceeds with a warning, because a forced lock takeover can
    /// legitimately reassign a slot out from under its original holder.
    pub fn release(&self, index: u32, holder: &HolderId) {
        if self.config.lease_mode == LeaseMode::Permanent {
            debug!(holder = %holder, index, "lease mode is permanent, ignoring release");
            return;
        }

        let _guard = match self.lock.acquire(holder) {
            Ok(guard) => guard,
            Err(e) => {
                warn!(holder = %holder, index, error = %e, "release could not acquire lock");
                return;
            }
        };

        let mut state = match self.store.read() {
            Ok(state) => state,
            Err(e) => {
                warn!(holder = %holder, index, error = %e, "release could not read state");
                return;
            }
        };

        if let Some(record) = state.recorded_holder(index) {
            if !holder.wrote_record(record) {
                warn!(
                    holder = %holder,
                    index,
                    record,
                    "releasing slot recorded for another holder"
                );
            }
        }

        match state.restore(index) {
            Restored::Moved => {
                if let Err(e) = self.store.write(&state) {
                    warn!(holder = %holder, index, error = %e, "release failed to persist");
                    return;
                }
                info!(holder = %holder, index, "released slot");
            }
            Restored::AlreadyAvailable => {
                debug!(index, "slot already available, release is a no-op");
            }
            Restored::Unknown => {
                warn!(index, "release of untracked slot ignored");
            }
        }
    }

    /// Lock-free snapshot of pool counts. Possibly stale: usable for
    /// observability only, never for correctness decisions.
    pub fn status(&self) -> Result<PoolStatus, StoreError> {
        let state = self.store.read()?;
        Ok(PoolStatus {
            available: state.available_count(),
            in_use: state.in_use_count(),
            total: state.total(),
            shard_info: state.shard_info,
        })
    }

    /// Restore full availability for the pool's recorded universe
    pub fn reset(&self) -> Result<(), SetupError> {
        let holder = HolderId::new("reset");
        let _guard = self.lock.acquire(&holder)?;

        let mut state = self.store.read()?;
        state.reset();
        self.store.write(&state)?;
        info!(total = state.total(), "pool reset to full availability");
        Ok(())
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
