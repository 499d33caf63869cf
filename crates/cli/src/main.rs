// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tap - Test Account Pool CLI
//!
//! Shell-driven entry point for test harnesses that coordinate a shared pool
//! of account slots across parallel runner processes. Each shard of a
//! partitioned run points `--dir` at its own state directory.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{claim, completions, init, plan, release, reset, status};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tap",
    version,
    about = "tap - Shared test-account pool for parallel test runners"
)]
struct Cli {
    /// Pool state directory
    #[arg(long, global = true, default_value = ".tap")]
    dir: PathBuf,

    /// Config file (defaults to tap.toml in the working directory, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the pool, or one shard of it
    Init(init::InitArgs),
    /// Claim one slot and print its index
    Claim(claim::ClaimArgs),
    /// Return a claimed slot to the pool
    Release(release::ReleaseArgs),
    /// Show pool counts
    Status(status::StatusArgs),
    /// Restore full availability
    Reset,
    /// Print the partition table for a sharded run
    Plan(plan::PlanArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TAP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init(args) => init::run(&cli.dir, &config, args),
        Commands::Claim(args) => claim::run(&cli.dir, &config, args),
        Commands::Release(args) => release::run(&cli.dir, &config, args),
        Commands::Status(args) => status::run(&cli.dir, &config, args),
        Commands::Reset => reset::run(&cli.dir, &config),
        Commands::Plan(args) => plan::run(args),
        Commands::Completions(args) => {
            completions::generate_completions(&mut Cli::command(), args);
            Ok(())
        }
    }
}
