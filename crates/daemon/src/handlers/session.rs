// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{bad_args, to_json};
use crate::error::DaemonError;
use crate::mirror::{Mirror, MutationOp};
use crate::session_manager;
use bridge_core::SessionId;
use bridge_wire::SessionSummary;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartParams {
    #[serde(default = "default_name")]
    name: String,
}

fn default_name() -> String {
    "default".to_string()
}

pub fn start(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: StartParams =
        serde_json::from_value(params).map_err(|e| bad_args("session.start", e.to_string()))?;
    if let Some(active) = mirror.active_session() {
        return Err(DaemonError::Bridge(bridge_core::BridgeError::SessionError {
            reason: format!("session {} is already active", active.id),
        }));
    }
    let events = mirror.mutate(vec![MutationOp::StartSession { name: p.name }])?;
    let id = SessionId::from_string(&events[0].subject_id);
    let session = mirror
        .get_session(&id)
        .ok_or_else(|| DaemonError::Internal(format!("session {id} vanished right after start")))?;
    to_json(SessionSummary::from(&session))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionIdParams {
    session_id: String,
}

pub fn end(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: SessionIdParams =
        serde_json::from_value(params).map_err(|e| bad_args("session.end", e.to_string()))?;
    let session_id = SessionId::from_string(&p.session_id);
    mirror.mutate(vec![MutationOp::EndSession { session_id }])?;
    let session = mirror.get_session(&session_id).ok_or_else(|| {
        DaemonError::Internal(format!("session {session_id} vanished right after end"))
    })?;
    to_json(SessionSummary::from(&session))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PathParams {
    path: String,
}

pub fn save(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: PathParams =
        serde_json::from_value(params).map_err(|e| bad_args("session.save", e.to_string()))?;
    session_manager::save_to_path(mirror, std::path::Path::new(&p.path))?;
    Ok(serde_json::json!({"path": p.path}))
}

pub fn load(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: PathParams =
        serde_json::from_value(params).map_err(|e| bad_args("session.load", e.to_string()))?;
    let file = session_manager::load_from_path(std::path::Path::new(&p.path))?;
    let event = mirror.restore_snapshot(file.state);
    if let Some(session) = file.session {
        mirror.restore_session(session);
    }
    Ok(serde_json::json!({"syncId": event.sync_id}))
}
