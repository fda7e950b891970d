// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S1: create a patch, two objects, connect them, set and read back a
//! parameter, and confirm the state mirror raises one event per step in
//! the order the mutations were committed.

use std::collections::HashSet;

use bridge_wire::Method;

use crate::common::Harness;

#[tokio::test]
async fn create_connect_and_set_param_raises_events_in_order() {
    let h = Harness::new();
    let subscriber = h.bridge.mirror.subscribe(HashSet::new());

    let patch = h.call_ok(Method::PatchCreate, serde_json::json!({"name": "s1"}));
    let patch_id = patch["id"].as_str().unwrap().to_string();

    let a = h.call_ok(
        Method::ObjectCreate,
        serde_json::json!({"patchId": patch_id, "kind": "oscA", "x": 10.0, "y": 10.0}),
    );
    let a_id = a["id"].as_str().unwrap().to_string();

    let b = h.call_ok(
        Method::ObjectCreate,
        serde_json::json!({"patchId": patch_id, "kind": "gainB", "x": 10.0, "y": 100.0}),
    );
    let b_id = b["id"].as_str().unwrap().to_string();

    h.call_ok(
        Method::ObjectConnect,
        serde_json::json!({
            "patchId": patch_id, "sourceObject": a_id, "sourceOutlet": 0,
            "destObject": b_id, "destInlet": 0,
        }),
    );

    h.call_ok(
        Method::ParamSet,
        serde_json::json!({"objectId": a_id, "name": "freq", "value": 440}),
    );

    let got = h.call_ok(Method::ParamGet, serde_json::json!({"objectId": a_id, "name": "freq"}));
    assert_eq!(got["value"], 440);

    let events = subscriber.recv_batch().await;
    let kinds: Vec<(String, String)> = events
        .iter()
        .map(|e| (e.category.to_string(), e.kind.to_string()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("patch".to_string(), "created".to_string()),
            ("object".to_string(), "created".to_string()),
            ("object".to_string(), "created".to_string()),
            ("connection".to_string(), "connected".to_string()),
            ("parameter".to_string(), "paramChanged".to_string()),
        ]
    );
}
