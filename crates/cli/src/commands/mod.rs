// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod claim;
pub mod completions;
pub mod init;
pub mod plan;
pub mod release;
pub mod reset;
pub mod status;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tap_core::PoolConfig;
use tap_engine::PoolManager;
use tap_storage::{FileStore, MarkerLock};

/// Well-known state file name inside the pool directory; the lock marker
/// lives next to it as `pool.lock`
pub const STATE_FILE: &str = "pool.json";

pub type FileManager = PoolManager<FileStore, MarkerLock>;

/// Build the file-backed manager for a state directory
pub fn manager(dir: &Path, config: &PoolConfig) -> FileManager {
    let state_path = dir.join(STATE_FILE);
    let lock = MarkerLock::for_state(&state_path, config.lock.clone());
    PoolManager::new(FileStore::new(state_path), lock, config.clone())
}

/// Load `PoolConfig` from an explicit file, `tap.toml` in the working
/// directory, or defaults
pub fn load_config(explicit: Option<&Path>) -> Result<PoolConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from("tap.toml");
            default.exists().then_some(default)
        }
    };

    match path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config = toml::from_str(&content)
                .with_context(|| format!("parsing config {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded pool config");
            Ok(config)
        }
        None => Ok(PoolConfig::default()),
    }
}
