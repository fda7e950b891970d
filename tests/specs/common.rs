// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the scenario specs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bridge_core::{AnyClock, FakeClock};
use bridge_daemon::bridge::Bridge;
use bridge_wire::Method;
use serde_json::Value;

static NEXT_STATE_FILE: AtomicU64 = AtomicU64::new(0);

/// A `Bridge` wired to a `FakeClock` the test controls directly, so
/// timing-sensitive scenarios (S3, S5) don't depend on real wall-clock
/// sleeps.
pub struct Harness {
    pub bridge: Bridge,
    pub clock: FakeClock,
}

impl Harness {
    pub fn new() -> Self {
        let clock = FakeClock::new();
        let n = NEXT_STATE_FILE.fetch_add(1, Ordering::Relaxed);
        let state_path = std::env::temp_dir().join(format!("bridge-spec-{}-{n}.json", std::process::id()));
        Self {
            bridge: Bridge::new(AnyClock::fake(clock.clone()), state_path),
            clock,
        }
    }

    pub fn advance(&self, d: Duration) {
        self.clock.advance(d);
    }

    pub fn call(&self, method: Method, params: Value) -> Result<Value, bridge_daemon::DaemonError> {
        self.bridge.handle_request(method, params)
    }

    pub fn call_ok(&self, method: Method, params: Value) -> Value {
        self.call(method, params).unwrap_or_else(|e| panic!("{method} failed: {e}"))
    }
}
