// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S2: connecting b -> a when a -> b already exists must be rejected as a
//! circular connection (code 312) and must not add an edge.

use bridge_wire::Method;

use crate::common::Harness;

#[tokio::test]
async fn connecting_back_onto_an_existing_edge_is_rejected() {
    let h = Harness::new();

    let patch = h.call_ok(Method::PatchCreate, serde_json::json!({"name": "s2"}));
    let patch_id = patch["id"].as_str().unwrap().to_string();

    let a = h.call_ok(
        Method::ObjectCreate,
        serde_json::json!({"patchId": patch_id, "kind": "oscA", "x": 0.0, "y": 0.0}),
    );
    let a_id = a["id"].as_str().unwrap().to_string();
    let b = h.call_ok(
        Method::ObjectCreate,
        serde_json::json!({"patchId": patch_id, "kind": "gainB", "x": 0.0, "y": 0.0}),
    );
    let b_id = b["id"].as_str().unwrap().to_string();

    h.call_ok(
        Method::ObjectConnect,
        serde_json::json!({
            "patchId": patch_id, "sourceObject": a_id, "sourceOutlet": 0,
            "destObject": b_id, "destInlet": 0,
        }),
    );

    let before = h.call_ok(Method::StateSync, serde_json::json!({}));
    let connection_count_before = before["connections"].as_array().unwrap().len();

    let err = h
        .call(
            Method::ObjectConnect,
            serde_json::json!({
                "patchId": patch_id, "sourceObject": b_id, "sourceOutlet": 0,
                "destObject": a_id, "destInlet": 0,
            }),
        )
        .expect_err("reconnecting backwards must be rejected");
    assert_eq!(err.code(), 312);

    let after = h.call_ok(Method::StateSync, serde_json::json!({}));
    assert_eq!(after["connections"].as_array().unwrap().len(), connection_count_before);
}
