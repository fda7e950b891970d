// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot entity: a full state capture taken at an explicit moment
//! (session start, session end, or on request) and retained on the
//! owning [`crate::Session`].

use crate::{Connection, Object, Patch};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a [`Snapshot`].
    pub struct SnapshotId("snp-");
}

/// A consistent image of all entities at a given `syncId`, labelled with
/// the moment it was captured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub sync_id: u64,
    pub taken_at: u64,
    pub patches: Vec<Patch>,
    pub objects: Vec<Object>,
    pub connections: Vec<Connection>,
}

impl Snapshot {
    pub fn new(
        sync_id: u64,
        taken_at: u64,
        patches: Vec<Patch>,
        objects: Vec<Object>,
        connections: Vec<Connection>,
    ) -> Self {
        Self {
            id: SnapshotId::new(),
            sync_id,
            taken_at,
            patches,
            objects,
            connections,
        }
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
