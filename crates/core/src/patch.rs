// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Patch entity: a container of objects and connections.

use crate::{ConnectionId, ObjectId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

crate::define_id! {
    /// Unique identifier for a [`Patch`].
    pub struct PatchId("pch-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchStatus {
    Open,
    Closed,
}

crate::simple_display! {
    PatchStatus {
        Open => "open",
        Closed => "closed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patch {
    pub id: PatchId,
    pub name: String,
    pub filepath: Option<String>,
    pub modified: bool,
    pub created_at: u64,
    pub updated_at: u64,
    pub status: PatchStatus,
    pub objects: BTreeSet<ObjectId>,
    pub connections: BTreeSet<ConnectionId>,
}

impl Patch {
    pub fn new(name: impl Into<String>, now_ms: u64) -> Self {
        Self {
            id: PatchId::new(),
            name: name.into(),
            filepath: None,
            modified: false,
            created_at: now_ms,
            updated_at: now_ms,
            status: PatchStatus::Open,
            objects: BTreeSet::new(),
            connections: BTreeSet::new(),
        }
    }

    pub fn touch(&mut self, now_ms: u64) {
        self.modified = true;
        self.updated_at = now_ms;
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct PatchBuilder => Patch {
        into { name: String = "patch" }
        option { filepath: String = None }
        set { modified: bool = false }
        set { created_at: u64 = 0 }
        set { updated_at: u64 = 0 }
        set { status: PatchStatus = PatchStatus::Open }
        set { objects: BTreeSet<ObjectId> = BTreeSet::new() }
        set { connections: BTreeSet<ConnectionId> = BTreeSet::new() }
        computed { id: PatchId = PatchId::new() }
    }
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;
