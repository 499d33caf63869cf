// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and usage output.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn top_level_help_lists_subcommands() {
    Command::cargo_bin("tap")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("claim"))
        .stdout(predicate::str::contains("release"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("reset"))
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn claim_help_documents_holder() {
    Command::cargo_bin("tap")
        .unwrap()
        .args(["claim", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--holder"));
}

#[test]
fn version_flag_prints_version() {
    Command::cargo_bin("tap")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tap"));
}
