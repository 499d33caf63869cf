// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted pool state storage
//!
//! The pool document is read in full and rewritten whole; the temp-write plus
//! rename in `FileStore::write` is the sole atomicity boundary, so no reader
//! ever observes a partially written document. The store performs no locking
//! itself - every writing call site must hold the lock primitive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tap_core::PoolState;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence seam for the shared pool document
pub trait StateStore: Send + Sync {
    /// Current state, or the empty default when none has been written yet
    fn read(&self) -> Result<PoolState, StoreError>;

    /// Replace the state atomically. Call sites must hold the lock primitive.
    fn write(&self, state: &PoolState) -> Result<(), StoreError>;

    /// Remove persisted state entirely
    fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed store: one JSON document at a well-known path
#[derive(Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStore {
    fn read(&self) -> Result<PoolState, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(PoolState::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn write(&self, state: &PoolState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;

        // Unique temp name per writer; the rename is the atomicity boundary
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "pool.json".to_string());
        let tmp = self
            .path
            .with_file_name(format!("{}.{}.tmp", file_name, Uuid::new_v4()));

        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<Option<PoolState>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self) -> Result<PoolState, StoreError> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        Ok(state.clone().unwrap_or_default())
    }

    fn write(&self, state: &PoolState) -> Result<(), StoreError> {
        let mut slot = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
