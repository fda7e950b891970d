// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::bad_args;
use crate::error::DaemonError;
use crate::mirror::{DiffResult, Mirror};
use bridge_wire::{ConnectionSummary, ObjectSummary, PatchSummary};
use serde::Deserialize;
use serde_json::Value;

pub fn sync(mirror: &Mirror, _params: Value) -> Result<Value, DaemonError> {
    let snapshot = mirror.snapshot();
    Ok(serde_json::json!({
        "syncId": snapshot.sync_id,
        "patches": snapshot.patches.iter().map(PatchSummary::from).collect::<Vec<_>>(),
        "objects": snapshot.objects.iter().map(ObjectSummary::from).collect::<Vec<_>>(),
        "connections": snapshot.connections.iter().map(ConnectionSummary::from).collect::<Vec<_>>(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiffParams {
    since_sync_id: u64,
}

pub fn diff(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: DiffParams =
        serde_json::from_value(params).map_err(|e| bad_args("state.diff", e.to_string()))?;
    match mirror.diff(p.since_sync_id) {
        DiffResult::Diff { new_sync_id, ops } => Ok(serde_json::json!({
            "syncId": new_sync_id,
            "rebase": false,
            "ops": ops,
        })),
        DiffResult::Rebase { snapshot } => Ok(serde_json::json!({
            "syncId": snapshot.sync_id,
            "rebase": true,
            "patches": snapshot.patches.iter().map(PatchSummary::from).collect::<Vec<_>>(),
            "objects": snapshot.objects.iter().map(ObjectSummary::from).collect::<Vec<_>>(),
            "connections": snapshot.connections.iter().map(ConnectionSummary::from).collect::<Vec<_>>(),
        })),
    }
}
