// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S6: `session.save` followed by `session.load` restores the exact same
//! patches, objects, and connections (timestamps included, since they're
//! carried verbatim in the snapshot) into a fresh mirror state, plus the
//! `Session` record itself with the snapshots it accumulated at start and
//! end, and the `bridge verify --state` CLI command accepts the saved file.

use std::process::Command;

use assert_cmd::prelude::*;
use bridge_wire::Method;

use crate::common::Harness;

#[tokio::test]
async fn save_then_load_restores_the_same_patches_objects_and_connections() {
    let h = Harness::new();
    let dir = tempfile::tempdir().expect("tempdir");
    let state_path = dir.path().join("session.json");

    let session = h.call_ok(Method::SessionStart, serde_json::json!({"name": "s6"}));
    let session_id = session["id"].as_str().unwrap().to_string();

    let patch = h.call_ok(Method::PatchCreate, serde_json::json!({"name": "demo"}));
    let patch_id = patch["id"].as_str().unwrap().to_string();
    let a = h.call_ok(
        Method::ObjectCreate,
        serde_json::json!({"patchId": patch_id, "kind": "oscA", "x": 1.0, "y": 2.0}),
    );
    let a_id = a["id"].as_str().unwrap().to_string();
    h.call_ok(
        Method::ObjectCreate,
        serde_json::json!({"patchId": patch_id, "kind": "gainB", "x": 3.0, "y": 4.0}),
    );
    h.call_ok(
        Method::ParamSet,
        serde_json::json!({"objectId": a_id, "name": "freq", "value": 110}),
    );

    let before = h.bridge.mirror.snapshot();

    h.call_ok(Method::SessionEnd, serde_json::json!({"sessionId": session_id}));
    h.call_ok(
        Method::SessionSave,
        serde_json::json!({"path": state_path.to_string_lossy()}),
    );

    h.call_ok(Method::SessionLoad, serde_json::json!({"path": state_path.to_string_lossy()}));

    let after = h.bridge.mirror.snapshot();

    similar_asserts::assert_eq!(
        serde_json::to_value(&before.patches).unwrap(),
        serde_json::to_value(&after.patches).unwrap()
    );
    similar_asserts::assert_eq!(
        serde_json::to_value(&before.objects).unwrap(),
        serde_json::to_value(&after.objects).unwrap()
    );
    similar_asserts::assert_eq!(
        serde_json::to_value(&before.connections).unwrap(),
        serde_json::to_value(&after.connections).unwrap()
    );
    assert_ne!(before.sync_id, after.sync_id, "restoring a snapshot still advances syncId");

    let restored_session = h
        .bridge
        .mirror
        .get_session(&bridge_core::SessionId::from_string(&session_id))
        .expect("session record round-trips alongside the entity mirror");
    assert_eq!(restored_session.snapshots.len(), 2, "one snapshot at start, one at end");
    assert!(
        restored_session.snapshots[0].patches.is_empty(),
        "the start snapshot was taken before any patch existed"
    );
    assert_eq!(
        restored_session.snapshots[1].patches.len(),
        1,
        "the end snapshot was taken after the demo patch was created"
    );
    assert!(!restored_session.is_active(), "the session was ended before it was saved");
}

#[test]
fn cli_verify_accepts_a_saved_session_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state_path = dir.path().join("session.json");

    let full = bridge_daemon::mirror::FullState {
        sync_id: 1,
        patches: vec![bridge_core::Patch::new("demo", 0)],
        objects: vec![],
        connections: vec![],
    };
    let file = bridge_daemon::session_manager::SessionFile { state: full, session: None };
    std::fs::write(&state_path, serde_json::to_vec_pretty(&file).unwrap()).unwrap();

    Command::cargo_bin("bridge")
        .expect("bridge binary builds")
        .arg("verify")
        .arg("--state")
        .arg(&state_path)
        .assert()
        .success();
}
