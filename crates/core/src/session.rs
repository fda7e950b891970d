// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session entity: a named workspace owning zero or more patches plus
//! global settings and an ordered list of snapshots.

use crate::{PatchId, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

crate::define_id! {
    /// Unique identifier for a [`Session`].
    pub struct SessionId("ses-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Ended,
}

crate::simple_display! {
    SessionStatus {
        Active => "active",
        Ended => "ended",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub status: SessionStatus,
    pub start_time: u64,
    pub end_time: Option<u64>,
    pub duration_ms: Option<u64>,
    pub patches: BTreeSet<PatchId>,
    pub global_settings: BTreeMap<String, String>,
    pub snapshots: Vec<Snapshot>,
}

impl Session {
    pub fn start(name: impl Into<String>, now_ms: u64) -> Self {
        Self {
            id: SessionId::new(),
            name: name.into(),
            status: SessionStatus::Active,
            start_time: now_ms,
            end_time: None,
            duration_ms: None,
            patches: BTreeSet::new(),
            global_settings: BTreeMap::new(),
            snapshots: Vec::new(),
        }
    }

    pub fn end(&mut self, now_ms: u64) {
        self.status = SessionStatus::Ended;
        self.end_time = Some(now_ms);
        self.duration_ms = Some(now_ms.saturating_sub(self.start_time));
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct SessionBuilder => Session {
        into { name: String = "default" }
        set { status: SessionStatus = SessionStatus::Active }
        set { start_time: u64 = 0 }
        option { end_time: u64 = None }
        option { duration_ms: u64 = None }
        set { patches: BTreeSet<PatchId> = BTreeSet::new() }
        set { global_settings: BTreeMap<String, String> = BTreeMap::new() }
        set { snapshots: Vec<Snapshot> = Vec::new() }
        computed { id: SessionId = SessionId::new() }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
