// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::mirror::MutationOp;
use bridge_core::{AnyClock, FakeClock};
use tempfile::tempdir;

#[test]
fn save_then_load_round_trips_the_entity_set() {
    let mirror = Mirror::new(AnyClock::fake(FakeClock::new()));
    mirror
        .mutate(vec![MutationOp::CreatePatch { name: "p1".into() }])
        .expect("create patch");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");

    save_to_path(&mirror, &path).expect("save");
    let restored = load_from_path(&path).expect("load");

    assert_eq!(restored.state.patches.len(), 1);
    assert_eq!(restored.state.patches[0].name, "p1");
    assert!(restored.session.is_none(), "no session was ever started");
}

#[test]
fn restoring_a_snapshot_replaces_the_mirror_state() {
    let mirror = Mirror::new(AnyClock::fake(FakeClock::new()));
    mirror
        .mutate(vec![MutationOp::CreatePatch { name: "old".into() }])
        .expect("create patch");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");

    let other = Mirror::new(AnyClock::fake(FakeClock::new()));
    other
        .mutate(vec![MutationOp::CreatePatch { name: "new".into() }])
        .expect("create patch");
    save_to_path(&other, &path).expect("save");

    let file = load_from_path(&path).expect("load");
    mirror.restore_snapshot(file.state);

    assert_eq!(mirror.patch_count(), 1);
    assert_eq!(mirror.snapshot().patches[0].name, "new");
}

#[test]
fn save_then_load_round_trips_the_active_session_and_its_snapshots() {
    let mirror = Mirror::new(AnyClock::fake(FakeClock::new()));
    mirror
        .mutate(vec![MutationOp::StartSession { name: "s1".into() }])
        .expect("start session");
    mirror
        .mutate(vec![MutationOp::CreatePatch { name: "p1".into() }])
        .expect("create patch");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");

    save_to_path(&mirror, &path).expect("save");
    let restored = load_from_path(&path).expect("load");

    let session = restored.session.expect("an active session was saved");
    assert_eq!(session.name, "s1");
    assert!(session.is_active());
    assert_eq!(session.snapshots.len(), 1, "only the start snapshot so far");
    assert!(session.snapshots[0].patches.is_empty());
}
