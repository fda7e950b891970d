// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bridge_core::ObjectId;
use std::cell::Cell;

#[test]
fn unwatched_updates_are_dropped() {
    let engine = ParamSyncEngine::new();
    let obj = ObjectId::new();
    engine.enqueue(obj, "freq", ParameterValue::Float(1.0));
    assert_eq!(engine.pending_len(), 0);
}

#[test]
fn watched_updates_coalesce_to_latest_value() {
    let engine = ParamSyncEngine::new();
    let obj = ObjectId::new();
    engine.watch(obj, "freq");
    engine.enqueue(obj, "freq", ParameterValue::Float(1.0));
    engine.enqueue(obj, "freq", ParameterValue::Float(2.0));
    assert_eq!(engine.pending_len(), 1);
    let batch = engine.drain();
    assert_eq!(batch[0].1, ParameterValue::Float(2.0));
}

#[test]
fn enqueue_reports_when_batch_cap_is_reached() {
    let engine = ParamSyncEngine::new();
    let cap = env::param_sync_batch_cap();
    let mut hit_cap = false;
    for i in 0..cap {
        let obj = ObjectId::new();
        engine.watch(obj, "freq");
        hit_cap = engine.enqueue(obj, "freq", ParameterValue::Int(i as i64));
    }
    assert!(hit_cap);
}

#[test]
fn flush_with_retries_up_to_the_attempt_cap_then_errors() {
    let engine = ParamSyncEngine::new();
    let obj = ObjectId::new();
    engine.watch(obj, "freq");
    engine.enqueue(obj, "freq", ParameterValue::Int(1));
    let attempts = Cell::new(0);
    let result = engine.flush_with(|_| {
        attempts.set(attempts.get() + 1);
        Err("send failed".to_string())
    });
    let failure = result.expect_err("retries exhausted");
    assert_eq!(attempts.get(), env::param_sync_max_attempts());
    assert_eq!(failure.keys, vec![(obj, "freq".to_string())]);
    assert!(!engine.is_healthy(obj, "freq"));
}

#[test]
fn flush_with_succeeds_and_drains_the_batch() {
    let engine = ParamSyncEngine::new();
    let obj = ObjectId::new();
    engine.watch(obj, "freq");
    engine.enqueue(obj, "freq", ParameterValue::Int(1));
    let flushed = engine.flush_with(|_| Ok(())).expect("flush");
    assert_eq!(flushed, 1);
    assert_eq!(engine.pending_len(), 0);
}

#[test]
fn a_successful_flush_clears_a_previously_unhealthy_watch() {
    let engine = ParamSyncEngine::new();
    let obj = ObjectId::new();
    engine.watch(obj, "freq");
    engine.enqueue(obj, "freq", ParameterValue::Int(1));
    let _ = engine.flush_with(|_| Err("send failed".to_string()));
    assert!(!engine.is_healthy(obj, "freq"));

    engine.enqueue(obj, "freq", ParameterValue::Int(2));
    engine.flush_with(|_| Ok(())).expect("flush");
    assert!(engine.is_healthy(obj, "freq"));
}
