// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem lock marker for cross-process mutual exclusion
//!
//! The lock is the atomic creation of a marker file: existence means held.
//! Acquisition retries on a fixed delay up to a bounded budget; when the
//! budget is exhausted the marker is presumed stale, removed unconditionally
//! (no ownership or expiry check - a crashed holder must never wedge the
//! suite), and creation is attempted once more.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tap_core::config::LockSettings;
use tap_core::HolderId;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur acquiring the lock
#[derive(Debug, Error)]
pub enum LockError {
    /// Creation still failed after forced removal of a stale marker
    #[error("failed to acquire lock after {attempts} attempts")]
    Timeout { attempts: u32 },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Mutual exclusion seam guarding the pool document
///
/// The guard releases on drop, so critical sections unwind cleanly on early
/// error returns.
pub trait LockPrimitive: Send + Sync {
    type Guard;

    fn acquire(&self, holder: &HolderId) -> Result<Self::Guard, LockError>;
}

/// File-backed lock: a marker file at a path derived from the state document
pub struct MarkerLock {
    path: PathBuf,
    settings: LockSettings,
}

impl MarkerLock {
    pub fn new(path: impl Into<PathBuf>, settings: LockSettings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    /// Conventional marker path adjacent to a state document
    /// (`pool.json` -> `pool.lock`)
    pub fn for_state(state_path: &Path, settings: LockSettings) -> Self {
        Self::new(state_path.with_extension("lock"), settings)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_create(&self, holder: &HolderId) -> Result<bool, io::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut marker) => {
                // Holder and pid make a forced takeover attributable in logs
                let _ = writeln!(marker, "{} pid={}", holder, std::process::id());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Releases the marker on drop; removal failures are logged, never propagated
pub struct MarkerGuard {
    path: PathBuf,
}

impl Drop for MarkerGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to remove lock marker"
                );
            }
        }
    }
}

impl LockPrimitive for MarkerLock {
    type Guard = MarkerGuard;

    fn acquire(&self, holder: &HolderId) -> Result<MarkerGuard, LockError> {
        for attempt in 0..self.settings.attempts {
            if self.try_create(holder)? {
                if attempt > 0 {
                    debug!(holder = %holder, attempt, "lock acquired after contention");
                }
                return Ok(MarkerGuard {
                    path: self.path.clone(),
                });
            }
            thread::sleep(self.settings.retry_delay);
        }

        // Budget exhausted: the marker is presumed stale
        warn!(
            path = %self.path.display(),
            holder = %holder,
            attempts = self.settings.attempts,
            "lock attempts exhausted, forcing removal of stale marker"
        );
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            // Raced with the holder's own release
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        if self.try_create(holder)? {
            return Ok(MarkerGuard {
                path: self.path.clone(),
            });
        }
        Err(LockError::Timeout {
            attempts: self.settings.attempts + 1,
        })
    }
}

/// In-process lock for tests against `MemoryStore`
#[derive(Clone)]
pub struct MemoryLock {
    held: Arc<AtomicBool>,
    settings: LockSettings,
}

impl MemoryLock {
    pub fn new() -> Self {
        // Snappy defaults: in-process contention resolves in microseconds
        Self::with_settings(LockSettings {
            attempts: 1000,
            retry_delay: Duration::from_millis(1),
        })
    }

    pub fn with_settings(settings: LockSettings) -> Self {
        Self {
            held: Arc::new(AtomicBool::new(false)),
            settings,
        }
    }
}

impl Default for MemoryLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the held flag on drop
pub struct MemoryGuard {
    held: Arc<AtomicBool>,
}

impl Drop for MemoryGuard {
    fn drop(&mut self) {
        self.held.store(false, Ordering::Release);
    }
}

impl LockPrimitive for MemoryLock {
    type Guard = MemoryGuard;

    fn acquire(&self, holder: &HolderId) -> Result<MemoryGuard, LockError> {
        for _ in 0..self.settings.attempts {
            if self
                .held
                .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                return Ok(MemoryGuard {
                    held: Arc::clone(&self.held),
                });
            }
            thread::sleep(self.settings.retry_delay);
        }

        // Same forced-takeover contract as the marker file
        warn!(holder = %holder, "in-memory lock attempts exhausted, forcing takeover");
        self.held.store(true, Ordering::SeqCst);
        Ok(MemoryGuard {
            held: Arc::clone(&self.held),
        })
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
