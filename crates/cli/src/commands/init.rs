// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tap init` - Establish the pool state

use anyhow::{bail, Result};
use clap::Args;
use std::path::Path;
use tap_core::{plan_one, PoolConfig};

#[derive(Args)]
pub struct InitArgs {
    /// Total slot count across all shards
    #[arg(long)]
    pub count: u32,

    /// Number of parallel shards
    #[arg(long)]
    pub shards: Option<u32>,

    /// This shard's 0-based index
    #[arg(long)]
    pub shard_index: Option<u32>,
}

pub fn run(dir: &Path, config: &PoolConfig, args: InitArgs) -> Result<()> {
    let manager = super::manager(dir, config);

    match (args.shards, args.shard_index) {
        (Some(shards), Some(index)) => {
            let partition = plan_one(args.count, shards, index)?;
            manager.initialize_partition(&partition)?;
            println!(
                "Initialized shard {}/{}: slots {}..{}",
                index, shards, partition.start, partition.end
            );
        }
        (Some(_), None) => bail!("--shards requires --shard-index"),
        (None, Some(_)) => bail!("--shard-index requires --shards"),
        (None, None) => {
            manager.initialize(args.count)?;
            println!("Initialized pool with {} slots", args.count);
        }
    }

    Ok(())
}
