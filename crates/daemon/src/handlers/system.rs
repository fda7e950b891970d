// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::DaemonError;
use crate::mirror::Mirror;
use serde_json::Value;

// `system.status` is answered by `Bridge::handle_request` directly: its
// fields (uptime, pending request count, connection flags) live on Bridge,
// not on the Mirror this handler table dispatches against.

pub fn init(_mirror: &Mirror, _params: Value) -> Result<Value, DaemonError> {
    Ok(serde_json::json!({"ok": true}))
}

pub fn shutdown(_mirror: &Mirror, _params: Value) -> Result<Value, DaemonError> {
    Ok(serde_json::json!({"ok": true}))
}

pub fn ping(_mirror: &Mirror, _params: Value) -> Result<Value, DaemonError> {
    Ok(serde_json::json!({"pong": true}))
}
