// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion generation for the tap CLI.
//!
//! ```bash
//! # Bash
//! tap completions bash > ~/.local/share/bash-completion/completions/tap
//!
//! # Zsh
//! tap completions zsh > ~/.zfunc/_tap
//!
//! # Fish
//! tap completions fish > ~/.config/fish/completions/tap.fish
//! ```

use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

/// Arguments for the completions command
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generate shell completions and write to stdout
pub fn generate_completions(cmd: &mut Command, args: CompletionsArgs) {
    generate(args.shell, cmd, "tap", &mut io::stdout());
}
