// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tap status` - Best-effort pool counts
//!
//! Reads without the lock: a possibly-stale snapshot for diagnostics only.

use anyhow::Result;
use clap::Args;
use std::path::Path;
use tap_core::PoolConfig;

#[derive(Args)]
pub struct StatusArgs {
    /// Machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

pub fn run(dir: &Path, config: &PoolConfig, args: StatusArgs) -> Result<()> {
    let manager = super::manager(dir, config);
    let status = manager.status()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Available: {}", status.available);
        println!("In use:    {}", status.in_use);
        println!("Total:     {}", status.total);
        if let Some(shard) = status.shard_info {
            println!(
                "Shard:     {}/{} (slots {}..{})",
                shard.index, shard.total, shard.start_index, shard.end_index
            );
        }
    }

    Ok(())
}
