// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returnable-lease config with snappy retry budgets, so exhaustion and
/// contention resolve in milliseconds instead of the production ~10s
pub const FAST_CONFIG: &str = r#"
lease_mode = "returnable"

[lock]
attempts = 50
retry_delay = "5ms"

[claim]
attempts = 2
backoff_base = "5ms"
"#;

/// A temp directory holding a pool state dir and a test config file
pub struct PoolEnv {
    temp: TempDir,
    pub dir: PathBuf,
    pub config: PathBuf,
}

impl PoolEnv {
    pub fn new() -> Self {
        Self::with_config(FAST_CONFIG)
    }

    pub fn with_config(config_toml: &str) -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let dir = temp.path().join("pool");
        let config = temp.path().join("tap.toml");
        std::fs::write(&config, config_toml).expect("write config");
        Self { temp, dir, config }
    }

    /// A `tap` command pointed at this environment
    pub fn tap(&self) -> Command {
        tap(&self.dir, &self.config)
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}

/// A `tap` command with explicit state dir and config
pub fn tap(dir: &Path, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tap").expect("tap binary");
    cmd.arg("--dir").arg(dir).arg("--config").arg(config);
    cmd
}

/// Run `tap claim` and return the claimed index from stdout
pub fn claim(dir: &Path, config: &Path, holder: &str) -> Option<u32> {
    let output = tap(dir, config)
        .args(["claim", "--holder", holder])
        .output()
        .expect("run tap claim");
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .expect("utf8 stdout")
        .trim()
        .parse()
        .ok()
}
