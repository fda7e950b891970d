// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! L2 method handlers: the business logic behind each entry in
//! `bridge_wire::Method`. Each handler deserialises its request params,
//! drives `Mirror::mutate` (or a direct read), and serialises a DTO result.

mod object;
mod param;
mod patch;
mod session;
mod state;
mod system;

use crate::error::DaemonError;
use crate::mirror::Mirror;
use bridge_wire::Method;
use serde_json::Value;

/// Dispatch one decoded L2 request to its handler. The Router is
/// responsible for correlating the returned value back to a `RpcResponse`.
pub fn dispatch(mirror: &Mirror, method: Method, params: Value) -> Result<Value, DaemonError> {
    match method {
        Method::PatchCreate => patch::create(mirror, params),
        Method::PatchOpen => patch::open(mirror, params),
        Method::PatchSave => patch::save(mirror, params),
        Method::PatchClose => patch::close(mirror, params),
        Method::ObjectCreate => object::create(mirror, params),
        Method::ObjectDelete => object::delete(mirror, params),
        Method::ObjectMove => object::move_object(mirror, params),
        Method::ObjectConnect => object::connect(mirror, params),
        Method::ObjectDisconnect => object::disconnect(mirror, params),
        Method::ParamSet => param::set(mirror, params),
        Method::ParamGet => param::get(mirror, params),
        Method::ParamWatch | Method::ParamUnwatch => {
            // Watch registration is handled by the Router (it owns the
            // subscriber registry), not here; see `crate::router`.
            Err(DaemonError::Internal(
                "watch/unwatch must be routed, not dispatched".to_string(),
            ))
        }
        Method::StateSync => state::sync(mirror, params),
        Method::StateDiff => state::diff(mirror, params),
        Method::SessionStart => session::start(mirror, params),
        Method::SessionEnd => session::end(mirror, params),
        Method::SessionSave => session::save(mirror, params),
        Method::SessionLoad => session::load(mirror, params),
        Method::SystemInit => system::init(mirror, params),
        Method::SystemShutdown => system::shutdown(mirror, params),
        Method::SystemStatus => Err(DaemonError::Internal(
            "system.status is answered by Bridge::handle_request, not dispatched".to_string(),
        )),
        Method::SystemPing => system::ping(mirror, params),
    }
}

pub(crate) fn bad_args(method: &str, reason: impl Into<String>) -> DaemonError {
    DaemonError::Bridge(bridge_core::BridgeError::InvalidArguments {
        method: method.to_string(),
        reason: reason.into(),
    })
}

/// Serialise a DTO into the response envelope, turning the (practically
/// unreachable, since DTOs only carry JSON-finite fields) encode failure
/// into a proper error instead of a panic.
pub(crate) fn to_json(value: impl serde::Serialize) -> Result<Value, DaemonError> {
    serde_json::to_value(value)
        .map_err(|e| DaemonError::Internal(format!("serializing response: {e}")))
}
