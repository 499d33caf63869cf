// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tap reset` - Restore full availability

use anyhow::Result;
use std::path::Path;
use tap_core::PoolConfig;

pub fn run(dir: &Path, config: &PoolConfig) -> Result<()> {
    let manager = super::manager(dir, config);
    manager.reset()?;

    let status = manager.status()?;
    println!("Pool reset: {} slots available", status.available);
    Ok(())
}
