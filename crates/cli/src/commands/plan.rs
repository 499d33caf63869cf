// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tap plan` - Show the shard partition table

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct PlanArgs {
    /// Total slot count
    #[arg(long)]
    pub total: u32,

    /// Number of parallel shards
    #[arg(long)]
    pub shards: u32,
}

pub fn run(args: PlanArgs) -> Result<()> {
    let partitions = tap_core::plan(args.total, args.shards)?;

    println!("{:<8} {:<8} {:<8} SIZE", "SHARD", "START", "END");
    for p in &partitions {
        println!("{:<8} {:<8} {:<8} {}", p.index, p.start, p.end, p.len());
    }

    Ok(())
}
