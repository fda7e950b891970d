// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection entity: a directed edge between two objects in one patch.
//!
//! A connection id is deterministic from its endpoints (rather than random,
//! unlike the other entity ids) so that duplicate creation requests are
//! idempotent: `object.connect` issued twice with identical endpoints must
//! produce the same id and leave exactly one edge (spec S-idempotence).

use crate::{ObjectId, PatchId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

crate::define_id! {
    /// Unique identifier for a [`Connection`]; see module docs for the
    /// determinism requirement.
    pub struct ConnectionId("cxn-");
}

impl ConnectionId {
    /// Deterministically derive a connection id from its endpoints, so that
    /// re-issuing `object.connect` with the same endpoints is idempotent.
    pub fn from_endpoints(
        source_object: &ObjectId,
        source_outlet: u32,
        dest_object: &ObjectId,
        dest_inlet: u32,
    ) -> Self {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        source_object.as_str().hash(&mut hasher);
        source_outlet.hash(&mut hasher);
        dest_object.as_str().hash(&mut hasher);
        dest_inlet.hash(&mut hasher);
        let digest = hasher.finish();
        Self::from_string(format!("{}{:016x}", Self::PREFIX, digest))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub patch_id: PatchId,
    pub source_object: ObjectId,
    pub source_outlet: u32,
    pub dest_object: ObjectId,
    pub dest_inlet: u32,
    pub created_at: u64,
}

impl Connection {
    pub fn new(
        patch_id: PatchId,
        source_object: ObjectId,
        source_outlet: u32,
        dest_object: ObjectId,
        dest_inlet: u32,
        now_ms: u64,
    ) -> Self {
        let id = ConnectionId::from_endpoints(&source_object, source_outlet, &dest_object, dest_inlet);
        Self {
            id,
            patch_id,
            source_object,
            source_outlet,
            dest_object,
            dest_inlet,
            created_at: now_ms,
        }
    }
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
