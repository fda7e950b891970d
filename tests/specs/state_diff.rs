// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S4: `state.diff(sinceSyncId)` returns the ops needed to walk a client
//! from an older syncId up to the current one.

use bridge_wire::Method;

use crate::common::Harness;

#[tokio::test]
async fn diff_returns_one_op_per_mutation_since_the_anchor() {
    let h = Harness::new();

    let s0 = h.call_ok(Method::StateSync, serde_json::json!({}));
    let sync_id_0 = s0["syncId"].as_u64().unwrap();

    let patch = h.call_ok(Method::PatchCreate, serde_json::json!({"name": "s4"}));
    let patch_id = patch["id"].as_str().unwrap().to_string();
    let a = h.call_ok(
        Method::ObjectCreate,
        serde_json::json!({"patchId": patch_id, "kind": "oscA", "x": 0.0, "y": 0.0}),
    );
    let a_id = a["id"].as_str().unwrap().to_string();
    h.call_ok(
        Method::ParamSet,
        serde_json::json!({"objectId": a_id, "name": "freq", "value": 220}),
    );

    let diff = h.call_ok(Method::StateDiff, serde_json::json!({"sinceSyncId": sync_id_0}));
    assert_eq!(diff["rebase"], false);
    let ops = diff["ops"].as_array().unwrap();
    assert_eq!(ops.len(), 3, "patch.create + object.create + param.set = 3 committed mutations");

    let current = h.call_ok(Method::StateSync, serde_json::json!({}));
    assert_eq!(diff["syncId"], current["syncId"]);
}

#[tokio::test]
async fn diff_past_the_retention_window_rebases_to_a_full_snapshot() {
    let h = Harness::new();
    let s0 = h.call_ok(Method::StateSync, serde_json::json!({}));
    let sync_id_0 = s0["syncId"].as_u64().unwrap();

    let patch = h.call_ok(Method::PatchCreate, serde_json::json!({"name": "churn"}));
    let patch_id = patch["id"].as_str().unwrap().to_string();
    for i in 0..600 {
        h.call_ok(
            Method::ObjectCreate,
            serde_json::json!({"patchId": patch_id, "kind": format!("node{i}"), "x": 0.0, "y": 0.0}),
        );
    }

    let diff = h.call_ok(Method::StateDiff, serde_json::json!({"sinceSyncId": sync_id_0}));
    assert_eq!(diff["rebase"], true);
    assert!(diff["patches"].as_array().unwrap().len() >= 1);
}
