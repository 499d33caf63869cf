// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tap claim` - Claim one slot for this process

use anyhow::Result;
use clap::Args;
use std::path::Path;
use tap_core::{HolderId, PoolConfig};
use uuid::Uuid;

#[derive(Args)]
pub struct ClaimArgs {
    /// Holder identity recorded against the slot
    /// (defaults to "{pid}-{uuid}")
    #[arg(long)]
    pub holder: Option<String>,
}

pub fn run(dir: &Path, config: &PoolConfig, args: ClaimArgs) -> Result<()> {
    let holder = HolderId::new(
        args.holder
            .unwrap_or_else(|| format!("{}-{}", std::process::id(), Uuid::new_v4())),
    );

    let manager = super::manager(dir, config);
    let index = manager.claim(&holder)?;

    // Index alone on stdout so shell harnesses can capture it
    println!("{index}");
    Ok(())
}
