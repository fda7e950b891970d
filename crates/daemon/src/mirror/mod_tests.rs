// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bridge_core::{AnyClock, FakeClock, ParameterValue};

fn mirror() -> Mirror {
    Mirror::new(AnyClock::fake(FakeClock::new()))
}

fn create_patch(mirror: &Mirror, name: &str) -> PatchId {
    let events = mirror
        .mutate(vec![MutationOp::CreatePatch { name: name.to_string() }])
        .expect("create patch");
    PatchId::from_string(&events[0].subject_id)
}

fn create_object(mirror: &Mirror, patch_id: PatchId) -> ObjectId {
    let events = mirror
        .mutate(vec![MutationOp::CreateObject {
            patch_id,
            kind: bridge_core::ObjectKind::from("osc~"),
            x: 0.0,
            y: 0.0,
            inlets: 2,
            outlets: 1,
        }])
        .expect("create object");
    ObjectId::from_string(&events[0].subject_id)
}

#[test]
fn mutate_creates_patch_and_advances_sync_id_by_one() {
    let mirror = mirror();
    assert_eq!(mirror.sync_id(), 0);
    let events = mirror
        .mutate(vec![MutationOp::CreatePatch { name: "p1".into() }])
        .expect("mutate");
    assert_eq!(events.len(), 1);
    assert_eq!(mirror.sync_id(), 1);
    assert_eq!(events[0].sync_id, 1);
}

#[test]
fn batch_advances_sync_id_by_exactly_one_regardless_of_op_count() {
    let mirror = mirror();
    let patch_id = create_patch(&mirror, "p1");
    let events = mirror
        .mutate(vec![
            MutationOp::CreateObject {
                patch_id,
                kind: "osc~".into(),
                x: 0.0,
                y: 0.0,
                inlets: 1,
                outlets: 1,
            },
            MutationOp::CreateObject {
                patch_id,
                kind: "gain~".into(),
                x: 10.0,
                y: 10.0,
                inlets: 1,
                outlets: 1,
            },
        ])
        .expect("mutate batch");
    assert_eq!(events.len(), 2);
    assert_eq!(mirror.sync_id(), 2);
    assert!(events.iter().all(|e| e.sync_id == 2));
}

#[test]
fn failing_op_in_a_batch_rolls_back_the_whole_batch() {
    let mirror = mirror();
    let patch_id = create_patch(&mirror, "p1");
    let before = mirror.sync_id();
    let result = mirror.mutate(vec![
        MutationOp::CreateObject {
            patch_id,
            kind: "osc~".into(),
            x: 0.0,
            y: 0.0,
            inlets: 1,
            outlets: 1,
        },
        MutationOp::DeleteObject {
            object_id: ObjectId::new(),
        },
    ]);
    assert!(result.is_err());
    assert_eq!(mirror.sync_id(), before);
    assert_eq!(mirror.patch_count(), 1);
    assert_eq!(mirror.get_patch(&patch_id).unwrap().objects.len(), 0);
}

#[test]
fn connect_is_idempotent_on_identical_endpoints() {
    let mirror = mirror();
    let patch_id = create_patch(&mirror, "p1");
    let a = create_object(&mirror, patch_id);
    let b = create_object(&mirror, patch_id);
    let ev1 = mirror
        .mutate(vec![MutationOp::ConnectObjects {
            patch_id,
            source_object: a,
            source_outlet: 0,
            dest_object: b,
            dest_inlet: 0,
        }])
        .expect("first connect");
    let ev2 = mirror
        .mutate(vec![MutationOp::ConnectObjects {
            patch_id,
            source_object: a,
            source_outlet: 0,
            dest_object: b,
            dest_inlet: 0,
        }])
        .expect("second connect");
    assert_eq!(ev1[0].subject_id, ev2[0].subject_id);
    assert_eq!(mirror.get_patch(&patch_id).unwrap().connections.len(), 1);
}

#[test]
fn circular_connection_is_rejected() {
    let mirror = mirror();
    let patch_id = create_patch(&mirror, "p1");
    let a = create_object(&mirror, patch_id);
    let b = create_object(&mirror, patch_id);
    mirror
        .mutate(vec![MutationOp::ConnectObjects {
            patch_id,
            source_object: a,
            source_outlet: 0,
            dest_object: b,
            dest_inlet: 0,
        }])
        .expect("a -> b");
    let err = mirror
        .mutate(vec![MutationOp::ConnectObjects {
            patch_id,
            source_object: b,
            source_outlet: 0,
            dest_object: a,
            dest_inlet: 1,
        }])
        .unwrap_err();
    assert!(matches!(err, BridgeError::CircularConnection));
}

#[test]
fn cross_patch_connection_is_rejected() {
    let mirror = mirror();
    let patch_a = create_patch(&mirror, "p1");
    let patch_b = create_patch(&mirror, "p2");
    let a = create_object(&mirror, patch_a);
    let b = create_object(&mirror, patch_b);
    let err = mirror
        .mutate(vec![MutationOp::ConnectObjects {
            patch_id: patch_a,
            source_object: a,
            source_outlet: 0,
            dest_object: b,
            dest_inlet: 0,
        }])
        .unwrap_err();
    assert!(matches!(err, BridgeError::IncompatibleConnection));
}

#[test]
fn closing_a_patch_cascades_object_and_connection_deletion() {
    let mirror = mirror();
    let patch_id = create_patch(&mirror, "p1");
    let a = create_object(&mirror, patch_id);
    let b = create_object(&mirror, patch_id);
    mirror
        .mutate(vec![MutationOp::ConnectObjects {
            patch_id,
            source_object: a,
            source_outlet: 0,
            dest_object: b,
            dest_inlet: 0,
        }])
        .expect("connect");
    mirror
        .mutate(vec![MutationOp::ClosePatch { patch_id }])
        .expect("close");
    assert!(mirror.get_object(&a).is_none());
    assert!(mirror.get_object(&b).is_none());
    assert_eq!(mirror.get_patch(&patch_id).unwrap().connections.len(), 0);
}

#[test]
fn deleting_an_object_cascades_its_connections() {
    let mirror = mirror();
    let patch_id = create_patch(&mirror, "p1");
    let a = create_object(&mirror, patch_id);
    let b = create_object(&mirror, patch_id);
    mirror
        .mutate(vec![MutationOp::ConnectObjects {
            patch_id,
            source_object: a,
            source_outlet: 0,
            dest_object: b,
            dest_inlet: 0,
        }])
        .expect("connect");
    mirror
        .mutate(vec![MutationOp::DeleteObject { object_id: a }])
        .expect("delete");
    assert_eq!(mirror.get_patch(&patch_id).unwrap().connections.len(), 0);
}

#[test]
fn set_param_enforces_range_and_read_only() {
    let mirror = mirror();
    let patch_id = create_patch(&mirror, "p1");
    let obj_id = create_object(&mirror, patch_id);
    mirror
        .mutate(vec![MutationOp::SetParam {
            object_id: obj_id,
            name: "freq".into(),
            value: ParameterValue::Float(440.0),
        }])
        .expect("first set");
    let param = mirror.get_param(&obj_id, "freq").expect("param exists");
    assert_eq!(param.value, ParameterValue::Float(440.0));
}

#[test]
fn diff_since_current_sync_id_is_empty() {
    let mirror = mirror();
    create_patch(&mirror, "p1");
    let DiffResult::Diff { new_sync_id, ops } = mirror.diff(mirror.sync_id()) else {
        panic!("expected a diff, not a rebase");
    };
    assert_eq!(new_sync_id, mirror.sync_id());
    assert!(ops.is_empty());
}

#[test]
fn diff_since_zero_reports_every_committed_batch() {
    let mirror = mirror();
    create_patch(&mirror, "p1");
    create_patch(&mirror, "p2");
    let DiffResult::Diff { ops, .. } = mirror.diff(0) else {
        panic!("expected a diff, not a rebase");
    };
    assert_eq!(ops.len(), 2);
}

#[tokio::test]
async fn subscriber_only_receives_events_matching_its_filter() {
    let mirror = mirror();
    let mut filter = HashSet::new();
    filter.insert(StateCategory::Parameter);
    let subscriber = mirror.subscribe(filter);
    let patch_id = create_patch(&mirror, "p1");
    let obj_id = create_object(&mirror, patch_id);
    mirror
        .mutate(vec![MutationOp::SetParam {
            object_id: obj_id,
            name: "freq".into(),
            value: ParameterValue::Int(1),
        }])
        .expect("set param");
    assert!(!subscriber.is_lagging());
    let batch = subscriber.recv_batch().await;
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].category, StateCategory::Parameter);
}
