// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool configuration: retry budgets and lease policy

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lock acquisition budget
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LockSettings {
    /// Marker creation attempts before the marker is forcibly removed
    #[serde(default = "default_lock_attempts")]
    pub attempts: u32,
    /// Fixed delay between attempts
    #[serde(with = "humantime_serde", default = "default_lock_retry_delay")]
    pub retry_delay: Duration,
}

impl Default for LockSettings {
    fn default() -> Self {
        Self {
            attempts: default_lock_attempts(),
            retry_delay: default_lock_retry_delay(),
        }
    }
}

/// Claim retry budget for an empty pool
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimSettings {
    /// Full claim attempts before surfacing exhaustion
    #[serde(default = "default_claim_attempts")]
    pub attempts: u32,
    /// Attempt `n` backs off for `n * backoff_base`
    #[serde(with = "humantime_serde", default = "default_backoff_base")]
    pub backoff_base: Duration,
}

impl Default for ClaimSettings {
    fn default() -> Self {
        Self {
            attempts: default_claim_attempts(),
            backoff_base: default_backoff_base(),
        }
    }
}

/// What happens to a claim when its unit of work finishes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseMode {
    /// Claims are held for the entire run; release is a logged no-op.
    /// Zero cross-run interference, requires pool size >= peak concurrency.
    Permanent,
    /// Claims may be returned to the pool with release
    Returnable,
}

impl Default for LeaseMode {
    fn default() -> Self {
        LeaseMode::Permanent
    }
}

/// Configuration for a pool manager
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub lock: LockSettings,
    pub claim: ClaimSettings,
    pub lease_mode: LeaseMode,
}

impl PoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lease_mode(mut self, mode: LeaseMode) -> Self {
        self.lease_mode = mode;
        self
    }

    pub fn with_lock_attempts(mut self, attempts: u32) -> Self {
        self.lock.attempts = attempts;
        self
    }

    pub fn with_lock_retry_delay(mut self, delay: Duration) -> Self {
        self.lock.retry_delay = delay;
        self
    }

    pub fn with_claim_attempts(mut self, attempts: u32) -> Self {
        self.claim.attempts = attempts;
        self
    }

    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.claim.backoff_base = base;
        self
    }
}

fn default_lock_attempts() -> u32 {
    100
}

fn default_lock_retry_delay() -> Duration {
    Duration::from_millis(100)
}

fn default_claim_attempts() -> u32 {
    10
}

fn default_backoff_base() -> Duration {
    Duration::from_millis(250)
}
