// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tap release` - Return a claimed slot
//!
//! Always exits zero: cleanup failure must not fail the caller's teardown.

use anyhow::Result;
use clap::Args;
use std::path::Path;
use tap_core::{HolderId, PoolConfig};

#[derive(Args)]
pub struct ReleaseArgs {
    /// Slot index to return
    pub index: u32,

    /// Holder that claimed the slot
    #[arg(long)]
    pub holder: String,
}

pub fn run(dir: &Path, config: &PoolConfig, args: ReleaseArgs) -> Result<()> {
    let manager = super::manager(dir, config);
    manager.release(args.index, &HolderId::new(args.holder));
    Ok(())
}
