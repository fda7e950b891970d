// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{bad_args, to_json};
use crate::error::DaemonError;
use crate::mirror::{Mirror, MutationOp};
use bridge_core::PatchId;
use bridge_wire::PatchSummary;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateParams {
    name: String,
}

pub fn create(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: CreateParams =
        serde_json::from_value(params).map_err(|e| bad_args("patch.create", e.to_string()))?;
    let events = mirror.mutate(vec![MutationOp::CreatePatch { name: p.name }])?;
    let id = PatchId::from_string(&events[0].subject_id);
    let patch = mirror
        .get_patch(&id)
        .ok_or_else(|| DaemonError::Internal(format!("patch {id} vanished right after create")))?;
    to_json(PatchSummary::from(&patch))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenParams {
    name: String,
    filepath: String,
}

pub fn open(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: OpenParams =
        serde_json::from_value(params).map_err(|e| bad_args("patch.open", e.to_string()))?;
    let events = mirror.mutate(vec![MutationOp::OpenPatch {
        name: p.name,
        filepath: p.filepath,
    }])?;
    let id = PatchId::from_string(&events[0].subject_id);
    let patch = mirror
        .get_patch(&id)
        .ok_or_else(|| DaemonError::Internal(format!("patch {id} vanished right after open")))?;
    to_json(PatchSummary::from(&patch))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatchIdParams {
    patch_id: String,
}

pub fn save(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: PatchIdParams =
        serde_json::from_value(params).map_err(|e| bad_args("patch.save", e.to_string()))?;
    let patch_id = PatchId::from_string(&p.patch_id);
    mirror.mutate(vec![MutationOp::SavePatch { patch_id }])?;
    let patch = mirror.get_patch(&patch_id).ok_or_else(|| {
        DaemonError::Internal(format!("patch {patch_id} vanished right after save"))
    })?;
    to_json(PatchSummary::from(&patch))
}

pub fn close(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: PatchIdParams =
        serde_json::from_value(params).map_err(|e| bad_args("patch.close", e.to_string()))?;
    let patch_id = PatchId::from_string(&p.patch_id);
    mirror.mutate(vec![MutationOp::ClosePatch { patch_id }])?;
    Ok(serde_json::json!({"id": p.patch_id}))
}
