// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{bad_args, to_json};
use crate::error::DaemonError;
use crate::mirror::{Mirror, MutationOp};
use bridge_core::{ConnectionId, ObjectId, PatchId};
use bridge_wire::{ConnectionSummary, ObjectSummary};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateParams {
    patch_id: String,
    kind: String,
    x: f64,
    y: f64,
    #[serde(default = "default_ports")]
    inlets: u32,
    #[serde(default = "default_ports")]
    outlets: u32,
}

fn default_ports() -> u32 {
    1
}

pub fn create(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: CreateParams =
        serde_json::from_value(params).map_err(|e| bad_args("object.create", e.to_string()))?;
    let events = mirror.mutate(vec![MutationOp::CreateObject {
        patch_id: PatchId::from_string(&p.patch_id),
        kind: p.kind.as_str().into(),
        x: p.x,
        y: p.y,
        inlets: p.inlets,
        outlets: p.outlets,
    }])?;
    let id = ObjectId::from_string(&events[0].subject_id);
    let object = mirror
        .get_object(&id)
        .ok_or_else(|| DaemonError::Internal(format!("object {id} vanished right after create")))?;
    to_json(ObjectSummary::from(&object))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectIdParams {
    object_id: String,
}

pub fn delete(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: ObjectIdParams =
        serde_json::from_value(params).map_err(|e| bad_args("object.delete", e.to_string()))?;
    mirror.mutate(vec![MutationOp::DeleteObject {
        object_id: ObjectId::from_string(&p.object_id),
    }])?;
    Ok(serde_json::json!({"id": p.object_id}))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveParams {
    object_id: String,
    x: f64,
    y: f64,
}

pub fn move_object(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: MoveParams =
        serde_json::from_value(params).map_err(|e| bad_args("object.move", e.to_string()))?;
    let object_id = ObjectId::from_string(&p.object_id);
    mirror.mutate(vec![MutationOp::MoveObject {
        object_id,
        x: p.x,
        y: p.y,
    }])?;
    let object = mirror.get_object(&object_id).ok_or_else(|| {
        DaemonError::Internal(format!("object {object_id} vanished right after move"))
    })?;
    to_json(ObjectSummary::from(&object))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectParams {
    patch_id: String,
    source_object: String,
    source_outlet: u32,
    dest_object: String,
    dest_inlet: u32,
}

pub fn connect(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: ConnectParams =
        serde_json::from_value(params).map_err(|e| bad_args("object.connect", e.to_string()))?;
    let events = mirror.mutate(vec![MutationOp::ConnectObjects {
        patch_id: PatchId::from_string(&p.patch_id),
        source_object: ObjectId::from_string(&p.source_object),
        source_outlet: p.source_outlet,
        dest_object: ObjectId::from_string(&p.dest_object),
        dest_inlet: p.dest_inlet,
    }])?;
    let id = ConnectionId::from_string(&events[0].subject_id);
    let conn = mirror.get_connection(&id).ok_or_else(|| {
        DaemonError::Internal(format!("connection {id} vanished right after connect"))
    })?;
    to_json(ConnectionSummary::from(&conn))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DisconnectParams {
    connection_id: String,
}

pub fn disconnect(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: DisconnectParams = serde_json::from_value(params)
        .map_err(|e| bad_args("object.disconnect", e.to_string()))?;
    mirror.mutate(vec![MutationOp::DisconnectObjects {
        connection_id: ConnectionId::from_string(&p.connection_id),
    }])?;
    Ok(serde_json::json!({"id": p.connection_id}))
}
