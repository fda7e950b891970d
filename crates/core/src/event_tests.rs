// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn state_event_serializes_round_trip() {
    let ev = StateEvent::new(
        StateCategory::Parameter,
        StateEventKind::ParamChanged,
        "obj-abc",
        serde_json::json!({"name": "freq", "value": 440}),
        100,
        1,
    );
    let json = serde_json::to_string(&ev).unwrap();
    let back: StateEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back.category, StateCategory::Parameter);
    assert_eq!(back.kind, StateEventKind::ParamChanged);
    assert_eq!(back.subject_id, "obj-abc");
}

#[test]
fn category_display_matches_wire_names() {
    assert_eq!(StateCategory::GlobalSetting.to_string(), "globalSetting");
    assert_eq!(StateEventKind::ParamChanged.to_string(), "paramChanged");
}

#[test]
fn state_diff_add_carries_value() {
    let diff = StateDiff::add("/objects/obj-1/position", serde_json::json!({"x": 1}));
    assert_eq!(diff.op, DiffOp::Add);
    assert!(diff.value.is_some());
    assert!(diff.from.is_none());
}

#[test]
fn state_diff_remove_has_no_value() {
    let diff = StateDiff::remove("/objects/obj-1");
    assert_eq!(diff.op, DiffOp::Remove);
    assert!(diff.value.is_none());
}
