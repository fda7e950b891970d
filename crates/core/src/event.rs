// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State events and diffs raised by the State Mirror on every committed
//! mutation, and fanned out to the Parameter Sync Engine, the Session
//! Manager, and the Error/Recovery Manager.

use serde::{Deserialize, Serialize};

/// The entity family a [`StateEvent`] pertains to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateCategory {
    Session,
    Patch,
    Object,
    Parameter,
    Connection,
    GlobalSetting,
}

crate::simple_display! {
    StateCategory {
        Session => "session",
        Patch => "patch",
        Object => "object",
        Parameter => "parameter",
        Connection => "connection",
        GlobalSetting => "globalSetting",
    }
}

/// The kind of mutation a [`StateEvent`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateEventKind {
    Created,
    Updated,
    Deleted,
    Connected,
    Disconnected,
    Moved,
    Resized,
    ParamChanged,
    StateChanged,
    SyncFailed,
}

crate::simple_display! {
    StateEventKind {
        Created => "created",
        Updated => "updated",
        Deleted => "deleted",
        Connected => "connected",
        Disconnected => "disconnected",
        Moved => "moved",
        Resized => "resized",
        ParamChanged => "paramChanged",
        StateChanged => "stateChanged",
        SyncFailed => "syncFailed",
    }
}

/// A record of one committed mutation: `(category, kind, subjectId, data,
/// timestamp)`. Timestamps are monotonic per category (mirror invariant 2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateEvent {
    pub category: StateCategory,
    pub kind: StateEventKind,
    pub subject_id: String,
    pub data: serde_json::Value,
    pub timestamp: u64,
    /// The mirror's `syncId` at the moment this event was committed.
    pub sync_id: u64,
}

impl StateEvent {
    pub fn new(
        category: StateCategory,
        kind: StateEventKind,
        subject_id: impl Into<String>,
        data: serde_json::Value,
        timestamp: u64,
        sync_id: u64,
    ) -> Self {
        Self {
            category,
            kind,
            subject_id: subject_id.into(),
            data,
            timestamp,
            sync_id,
        }
    }
}

/// A JSON-Pointer-style patch operation, as returned by `state.diff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffOp {
    Add,
    Replace,
    Remove,
    Move,
}

crate::simple_display! {
    DiffOp {
        Add => "add",
        Replace => "replace",
        Remove => "remove",
        Move => "move",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateDiff {
    pub op: DiffOp,
    pub path: String,
    pub value: Option<serde_json::Value>,
    /// Present only for `op == Move`: the JSON-Pointer path moved from.
    pub from: Option<String>,
}

impl StateDiff {
    pub fn add(path: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            op: DiffOp::Add,
            path: path.into(),
            value: Some(value),
            from: None,
        }
    }

    pub fn replace(path: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            op: DiffOp::Replace,
            path: path.into(),
            value: Some(value),
            from: None,
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: DiffOp::Remove,
            path: path.into(),
            value: None,
            from: None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
