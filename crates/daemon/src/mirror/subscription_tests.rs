// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bridge_core::{StateCategory, StateEventKind};

fn ev(category: StateCategory) -> StateEvent {
    StateEvent::new(category, StateEventKind::Updated, "x", serde_json::json!({}), 0, 0)
}

#[tokio::test]
async fn recv_batch_drains_all_queued_events_in_order() {
    let queue = SubscriberQueue::new(HashSet::new(), 10);
    queue.push(ev(StateCategory::Patch));
    queue.push(ev(StateCategory::Object));
    let batch = queue.recv_batch().await;
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].category, StateCategory::Patch);
    assert_eq!(batch[1].category, StateCategory::Object);
}

#[test]
fn matches_empty_filter_accepts_everything() {
    let queue = SubscriberQueue::new(HashSet::new(), 10);
    assert!(queue.matches(StateCategory::Parameter));
}

#[test]
fn matches_respects_explicit_filter() {
    let mut filter = HashSet::new();
    filter.insert(StateCategory::Patch);
    let queue = SubscriberQueue::new(filter, 10);
    assert!(queue.matches(StateCategory::Patch));
    assert!(!queue.matches(StateCategory::Object));
}

#[test]
fn overflow_evicts_oldest_parameter_event_not_structural() {
    let queue = SubscriberQueue::new(HashSet::new(), 2);
    queue.push(ev(StateCategory::Parameter));
    queue.push(ev(StateCategory::Patch));
    // Over capacity: should evict the queued parameter event, keep structural.
    queue.push(ev(StateCategory::Object));
    assert!(queue.is_lagging());
}

#[test]
fn overflow_with_no_parameter_events_keeps_all_structural_events() {
    let queue = SubscriberQueue::new(HashSet::new(), 1);
    queue.push(ev(StateCategory::Patch));
    queue.push(ev(StateCategory::Object));
    // Both structural events retained even though capacity was exceeded.
    let inner = queue.inner.lock();
    assert_eq!(inner.len(), 2);
}
