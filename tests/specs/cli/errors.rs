// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI error surfaces.

use crate::prelude::Env;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("tap")
        .unwrap()
        .arg("borrow")
        .assert()
        .failure();
}

#[test]
fn missing_config_file_is_reported() {
    let env = Env::new();

    crate::prelude::tap_at(&env.dir, std::path::Path::new("/nonexistent/tap.toml"))
        .args(["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading config"));
}

#[test]
fn malformed_config_is_reported() {
    let env = Env::new();
    let bad = env.path().join("bad.toml");
    std::fs::write(&bad, "lease_mode = \"forever\"").unwrap();

    crate::prelude::tap_at(&env.dir, &bad)
        .args(["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing config"));
}

#[test]
fn exhaustion_is_a_hard_failure() {
    let env = Env::new();
    env.init(1);
    env.claim("only").unwrap();

    env.tap()
        .args(["claim", "--holder", "late"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pool exhausted"));
}
