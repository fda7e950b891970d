// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S5: a request that never completes is reaped into a terminal `timedOut`
//! status once its timeout elapses, carrying error code 103.
//!
//! There is no per-call timeout override in the request registry today,
//! only a static per-method one (`Method::timeout_override_ms`). Rather
//! than simulate a literal wall-clock sleep, this drives the same
//! `FakeClock`-controlled reaping path the lifecycle manager already tests
//! against `system.ping`'s 2000ms override.

use std::time::Duration;

use bridge_core::{ErrorCode, RequestStatus};
use bridge_wire::Method;

use crate::common::Harness;

#[tokio::test]
async fn an_overdue_request_is_reaped_as_timed_out() {
    let h = Harness::new();

    let (id, timeout) = h.bridge.requests.begin(Method::SystemPing, serde_json::json!({}));
    assert_eq!(timeout, Duration::from_millis(2_000));

    h.advance(timeout + Duration::from_millis(1));
    let reaped = h.bridge.requests.reap_timeouts();

    assert_eq!(reaped, vec![id]);
    let record = h.bridge.requests.get(&id).expect("still present before the grace window");
    assert_eq!(record.status, RequestStatus::TimedOut);
    assert_eq!(ErrorCode::Timeout.code(), 103);

    let elapsed = record.ended_at.unwrap() - record.started_at;
    assert!(elapsed >= timeout.as_millis() as u64);
}

#[tokio::test]
async fn a_request_that_finishes_before_its_timeout_is_never_reaped() {
    let h = Harness::new();

    let (id, _timeout) = h.bridge.requests.begin(Method::SystemPing, serde_json::json!({}));
    h.bridge.requests.finish(id, RequestStatus::Succeeded);

    h.advance(Duration::from_millis(2_001));
    let reaped = h.bridge.requests.reap_timeouts();
    assert!(reaped.is_empty());
}
