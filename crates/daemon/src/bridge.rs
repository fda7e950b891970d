// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Bridge`: the root component graph. Every long-lived piece (the state
//! mirror, the request registry, the parameter-sync engine, the recovery
//! manager) is constructed once here and wired together explicitly, so
//! nothing in the daemon reaches for ambient/global state.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use bridge_core::{AnyClock, Clock};
use bridge_wire::{Method, SessionSummary, StatusSummary};
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::DaemonError;
use crate::lifecycle::RequestRegistry;
use crate::mirror::Mirror;
use crate::recovery::RecoveryManager;
use crate::router::{AddressRouter, MethodRouter};

/// Default L1 address patterns the bridge listens on at startup.
const DEFAULT_L1_PATTERNS: &[&str] = &["/mcp/**"];

pub struct Bridge {
    pub mirror: Mirror,
    pub requests: RequestRegistry,
    pub router: MethodRouter,
    pub addresses: Mutex<AddressRouter>,
    pub recovery: Mutex<RecoveryManager>,
    clock: AnyClock,
    started_at_ms: u64,
    l1_connected: AtomicBool,
    l2_connected: AtomicBool,
}

impl Bridge {
    pub fn new(clock: AnyClock, state_path: PathBuf) -> Self {
        let started_at_ms = clock.epoch_ms();
        let mut addresses = AddressRouter::new();
        for pattern in DEFAULT_L1_PATTERNS {
            // DEFAULT_L1_PATTERNS is a fixed constant; every entry is a glob
            // literal checked by inspection, not user input.
            #[allow(clippy::expect_used)]
            addresses
                .register(pattern)
                .expect("built-in L1 patterns are valid globs");
        }
        Self {
            mirror: Mirror::new(clock.clone()),
            requests: RequestRegistry::new(clock.clone()),
            router: MethodRouter::new(),
            addresses: Mutex::new(addresses),
            recovery: Mutex::new(RecoveryManager::new(state_path)),
            clock,
            started_at_ms,
            l1_connected: AtomicBool::new(false),
            l2_connected: AtomicBool::new(false),
        }
    }

    pub fn set_l1_connected(&self, connected: bool) {
        self.l1_connected.store(connected, Ordering::Relaxed);
    }

    pub fn set_l2_connected(&self, connected: bool) {
        self.l2_connected.store(connected, Ordering::Relaxed);
    }

    pub fn l1_connected(&self) -> bool {
        self.l1_connected.load(Ordering::Relaxed)
    }

    pub fn l2_connected(&self) -> bool {
        self.l2_connected.load(Ordering::Relaxed)
    }

    pub fn uptime_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }

    /// Handle one decoded L2 request end to end: register it with the
    /// request registry, dispatch it, and finish the record with whatever
    /// terminal status the dispatch produced.
    ///
    /// `system.status` is answered here rather than in `handlers::system`,
    /// since the fields it reports (uptime, pending count, connection
    /// flags) live on `Bridge`, not on the Mirror the handler table dispatches
    /// against.
    pub fn handle_request(&self, method: Method, params: Value) -> Result<Value, DaemonError> {
        let (id, _timeout) = self.requests.begin(method, params.clone());
        let result = if method == Method::SystemStatus {
            Ok(self.status_summary())
        } else {
            self.router.dispatch(&self.mirror, method, params)
        };
        let status = match &result {
            Ok(_) => bridge_core::RequestStatus::Succeeded,
            Err(_) => bridge_core::RequestStatus::Failed,
        };
        self.requests.finish(id, status);
        result
    }

    fn status_summary(&self) -> Value {
        let summary = StatusSummary {
            uptime_ms: self.uptime_ms(self.clock.epoch_ms()),
            sync_id: self.mirror.sync_id(),
            active_session: self.mirror.active_session().as_ref().map(SessionSummary::from),
            patch_count: self.mirror.patch_count(),
            pending_requests: self.requests.pending_count(),
            l1_connected: self.l1_connected(),
            l2_connected: self.l2_connected(),
        };
        // Every field is an integer, bool, or a DTO built the same way;
        // nothing here can produce a non-finite float or a non-string key.
        #[allow(clippy::expect_used)]
        serde_json::to_value(summary).expect("StatusSummary always serializes")
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
