// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S3: a parameter watch survives an L2 disconnect/reconnect cycle. The
//! subscriber must see exactly one delivery for the post-reconnect value,
//! not zero and not a duplicate of the pre-disconnect state.

use bridge_wire::Method;

use crate::common::Harness;

#[tokio::test]
async fn watch_delivers_exactly_once_after_l2_reconnects() {
    let h = Harness::new();

    let patch = h.call_ok(Method::PatchCreate, serde_json::json!({"name": "s3"}));
    let patch_id = patch["id"].as_str().unwrap().to_string();
    let a = h.call_ok(
        Method::ObjectCreate,
        serde_json::json!({"patchId": patch_id, "kind": "oscA", "x": 0.0, "y": 0.0}),
    );
    let a_id = a["id"].as_str().unwrap().to_string();

    h.call_ok(Method::ParamWatch, serde_json::json!({"objectId": a_id, "name": "freq"}));
    h.bridge.set_l2_connected(true);

    // L2 drops.
    h.bridge.set_l2_connected(false);
    assert!(!h.bridge.l2_connected());

    // Within the back-off window, L2 comes back; the watch registration
    // lives on the router, not the connection, so it is untouched by the
    // drop.
    h.bridge.set_l2_connected(true);
    assert!(h.bridge.l2_connected());

    h.call_ok(
        Method::ParamSet,
        serde_json::json!({"objectId": a_id, "name": "freq", "value": 880}),
    );

    let pending = h.bridge.router.param_sync().drain();
    assert_eq!(pending.len(), 1);
    let (key, value) = &pending[0];
    assert_eq!(key.1, "freq");
    assert_eq!(*value, bridge_core::ParameterValue::Int(880));
}
