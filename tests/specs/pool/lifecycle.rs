// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end pool lifecycle behavior.

use crate::prelude::Env;
use predicates::prelude::*;

#[test]
fn full_claim_release_cycle() {
    let env = Env::new();
    env.init(3);

    assert_eq!(env.claim("a"), Some(0));
    assert_eq!(env.claim("b"), Some(1));
    assert_eq!(env.claim("c"), Some(2));
    assert_eq!(env.claim("d"), None);

    env.tap()
        .args(["release", "1", "--holder", "b"])
        .assert()
        .success();

    assert_eq!(env.claim("e"), Some(1));
}

#[test]
fn double_release_leaves_state_unchanged() {
    let env = Env::new();
    env.init(2);
    env.claim("a").unwrap();

    env.tap()
        .args(["release", "0", "--holder", "a"])
        .assert()
        .success();
    let first = env.tap().args(["status", "--json"]).output().unwrap();

    env.tap()
        .args(["release", "0", "--holder", "a"])
        .assert()
        .success();
    let second = env.tap().args(["status", "--json"]).output().unwrap();

    let first: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    let second: serde_json::Value = serde_json::from_slice(&second.stdout).unwrap();
    assert_eq!(first["available"], second["available"]);
    assert_eq!(first["inUse"], second["inUse"]);
}

#[test]
fn state_survives_between_invocations() {
    let env = Env::new();
    env.init(4);
    env.claim("a").unwrap();
    env.claim("b").unwrap();

    // Every invocation is a fresh process; the document carries the state
    env.tap()
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available: 2"))
        .stdout(predicate::str::contains("In use:    2"));
}

#[test]
fn reset_recovers_a_drained_pool() {
    let env = Env::new();
    env.init(2);
    env.claim("a").unwrap();
    env.claim("b").unwrap();
    assert_eq!(env.claim("c"), None);

    env.tap().args(["reset"]).assert().success();

    assert_eq!(env.claim("d"), Some(0));
}

#[test]
fn state_document_matches_wire_format() {
    let env = Env::new();
    env.init(2);
    env.claim("w0").unwrap();

    let raw = std::fs::read_to_string(env.dir.join("pool.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["available"], serde_json::json!([1]));
    assert!(json["inUse"]["0"]
        .as_str()
        .map(|record| record.starts_with("w0-"))
        .unwrap_or(false));
    assert!(json["lastUpdated"].is_i64());
}
