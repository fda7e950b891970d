// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request Lifecycle Manager: tracks every in-flight L2 request from
//! `pending` through to a terminal state, enforces per-method timeouts, and
//! reaps terminal requests after a grace window so memory doesn't grow
//! unbounded across a long-running connection.

use bridge_core::{AnyClock, Clock, RequestId, RequestRecord, RequestStatus};
use bridge_wire::Method;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use crate::env;

pub struct RequestRegistry {
    clock: AnyClock,
    requests: Mutex<HashMap<RequestId, RequestRecord>>,
}

impl RequestRegistry {
    pub fn new(clock: AnyClock) -> Self {
        Self {
            clock,
            requests: Mutex::new(HashMap::new()),
        }
    }

    fn now_ms(&self) -> u64 {
        self.clock.epoch_ms()
    }

    /// Register a new request and mark it running. Returns the timeout to
    /// enforce, which is the method's override if it has one, else the
    /// registry default.
    pub fn begin(&self, method: Method, args: serde_json::Value) -> (RequestId, Duration) {
        let timeout_ms = method
            .timeout_override_ms()
            .unwrap_or_else(|| env::default_request_timeout().as_millis() as u64);
        let now = self.now_ms();
        let mut record = RequestRecord::new(method.as_str(), args, timeout_ms, now);
        record.mark_running();
        let id = record.id;
        self.requests.lock().insert(id, record);
        (id, Duration::from_millis(timeout_ms))
    }

    pub fn finish(&self, id: RequestId, status: RequestStatus) {
        let now = self.now_ms();
        if let Some(record) = self.requests.lock().get_mut(&id) {
            record.finish(status, now);
        }
    }

    pub fn get(&self, id: &RequestId) -> Option<RequestRecord> {
        self.requests.lock().get(id).cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.requests
            .lock()
            .values()
            .filter(|r| !r.status.is_terminal())
            .count()
    }

    /// Transition every request that has overrun its timeout into
    /// `timedOut`. Returns the ids that were reaped this way, so callers can
    /// send back a timeout error frame for each.
    pub fn reap_timeouts(&self) -> Vec<RequestId> {
        let now = self.now_ms();
        let mut reaped = Vec::new();
        let mut requests = self.requests.lock();
        for (id, record) in requests.iter_mut() {
            if !record.status.is_terminal() && record.is_overdue(now) {
                record.finish(RequestStatus::TimedOut, now);
                reaped.push(*id);
            }
        }
        reaped
    }

    /// Drop terminal requests whose grace window has elapsed, bounding
    /// memory use for long-lived connections.
    pub fn reap_grace_window(&self) {
        let now = self.now_ms();
        let grace_ms = env::request_grace_window().as_millis() as u64;
        self.requests
            .lock()
            .retain(|_, record| !record.is_reapable(now, grace_ms));
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
