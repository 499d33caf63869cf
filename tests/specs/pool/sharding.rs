// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sharded pool behavior across separate state directories.

use crate::prelude::{claim_at, tap_at, Env};
use predicates::prelude::*;

#[test]
fn three_shards_cover_the_pool_exactly_once() {
    let env = Env::new();
    let total: u32 = 10;
    let shards: u32 = 3;

    let mut all_claims = Vec::new();
    for shard in 0..shards {
        let dir = env.path().join(format!("shard-{}", shard));
        tap_at(&dir, &env.config)
            .args([
                "init",
                "--count",
                &total.to_string(),
                "--shards",
                &shards.to_string(),
                "--shard-index",
                &shard.to_string(),
            ])
            .assert()
            .success();

        while let Some(index) = claim_at(&dir, &env.config, &format!("shard-{}", shard)) {
            all_claims.push(index);
        }
    }

    all_claims.sort_unstable();
    assert_eq!(all_claims, (0..total).collect::<Vec<u32>>());
}

#[test]
fn shard_status_names_its_slice() {
    let env = Env::new();

    env.tap()
        .args(["init", "--count", "9", "--shards", "3", "--shard-index", "2"])
        .assert()
        .success();

    env.tap()
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shard:     2/3 (slots 6..9)"));
}

#[test]
fn shard_reset_stays_inside_its_range() {
    let env = Env::new();

    env.tap()
        .args(["init", "--count", "6", "--shards", "2", "--shard-index", "1"])
        .assert()
        .success();
    env.claim("a").unwrap();

    env.tap().args(["reset"]).assert().success();

    // First claim after reset is the shard's own lowest index, not 0
    assert_eq!(env.claim("b"), Some(3));
}
