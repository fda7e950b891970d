// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-facing DTOs for the L2 method catalogue's results. Kept distinct
//! from `bridge_core`'s internal entities so the mirror's representation
//! can evolve without breaking the external JSON shape.

use bridge_core::{Connection, Object, Parameter, Patch, PatchStatus, Session, SessionStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub modified: bool,
    pub object_count: usize,
    pub connection_count: usize,
}

impl From<&Patch> for PatchSummary {
    fn from(p: &Patch) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            status: match p.status {
                PatchStatus::Open => "open",
                PatchStatus::Closed => "closed",
            }
            .to_string(),
            modified: p.modified,
            object_count: p.objects.len(),
            connection_count: p.connections.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub id: String,
    pub patch_id: String,
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub inlets: u32,
    pub outlets: u32,
}

impl From<&Object> for ObjectSummary {
    fn from(o: &Object) -> Self {
        Self {
            id: o.id.to_string(),
            patch_id: o.patch_id.to_string(),
            kind: o.kind.0.clone(),
            x: o.position.x,
            y: o.position.y,
            inlets: o.inlets,
            outlets: o.outlets,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSummary {
    pub id: String,
    pub patch_id: String,
    pub source_object: String,
    pub source_outlet: u32,
    pub dest_object: String,
    pub dest_inlet: u32,
}

impl From<&Connection> for ConnectionSummary {
    fn from(c: &Connection) -> Self {
        Self {
            id: c.id.to_string(),
            patch_id: c.patch_id.to_string(),
            source_object: c.source_object.to_string(),
            source_outlet: c.source_outlet,
            dest_object: c.dest_object.to_string(),
            dest_inlet: c.dest_inlet,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDto {
    pub name: String,
    pub value: serde_json::Value,
    #[serde(rename = "type")]
    pub param_type: String,
    pub read_only: bool,
}

impl From<&Parameter> for ParameterDto {
    fn from(p: &Parameter) -> Self {
        Self {
            name: p.name.clone(),
            value: serde_json::to_value(&p.value).unwrap_or(serde_json::Value::Null),
            param_type: p.param_type.to_string(),
            read_only: p.read_only,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub patch_count: usize,
    pub snapshot_count: usize,
}

impl From<&Session> for SessionSummary {
    fn from(s: &Session) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            status: match s.status {
                SessionStatus::Active => "active",
                SessionStatus::Ended => "ended",
            }
            .to_string(),
            patch_count: s.patches.len(),
            snapshot_count: s.snapshots.len(),
        }
    }
}

/// Result payload for `system.status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSummary {
    pub uptime_ms: u64,
    pub sync_id: u64,
    pub active_session: Option<SessionSummary>,
    pub patch_count: usize,
    pub pending_requests: usize,
    pub l1_connected: bool,
    pub l2_connected: bool,
}

#[cfg(test)]
#[path = "dto_tests.rs"]
mod tests;
