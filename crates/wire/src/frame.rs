// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The L2 frame shapes: one JSON object per frame, JSON-RPC-like.
//!
//! Requests carry `{method, params, id}`; responses carry `{id, result}` or
//! `{id, error}`; notifications omit `id`. A single persistent L2
//! connection may have many requests in flight, so correlation is by `id`
//! rather than by connection order (unlike the teacher's one-request-per-
//! connection daemon protocol).

use bridge_core::{BridgeError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request/response correlation id: either a number or a string, per the
/// external protocol (`id:string|number`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameId {
    Number(i64),
    String(String),
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default)]
    pub params: Value,
    pub id: FrameId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<&BridgeError> for RpcError {
    fn from(err: &BridgeError) -> Self {
        Self::new(err.code().code(), err.to_string())
    }
}

impl From<BridgeError> for RpcError {
    fn from(err: BridgeError) -> Self {
        Self::from(&err)
    }
}

impl From<ErrorCode> for RpcError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code.code(), code.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub id: FrameId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn ok(id: FrameId, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: FrameId, error: RpcError) -> Self {
        Self {
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// A fire-and-forget server→client message: outbound `StateEvent`s and
/// parameter-sync batches travel as notifications (no `id`, no reply
/// expected).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcNotification {
    pub method: String,
    pub params: Value,
}

/// A decoded L2 frame. The three shapes are distinguished structurally
/// (presence of `method` and/or `id`), not by an explicit tag, matching the
/// wire format normatively described by the external interface.
#[derive(Debug, Clone)]
pub enum Frame {
    Request(RpcRequest),
    Response(RpcResponse),
    Notification(RpcNotification),
}

impl Serialize for Frame {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Request(r) => r.serialize(serializer),
            Self::Response(r) => r.serialize(serializer),
            Self::Notification(n) => n.serialize(serializer),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("frame is neither a request, response, nor notification: {0}")]
pub struct FrameShapeError(pub String);

impl Frame {
    /// Classify a raw JSON value into one of the three frame shapes by
    /// inspecting its top-level keys.
    pub fn from_value(value: Value) -> Result<Self, FrameShapeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| FrameShapeError("frame is not a JSON object".to_string()))?;
        let has_method = obj.contains_key("method");
        let has_id = obj.contains_key("id");
        let has_result_or_error = obj.contains_key("result") || obj.contains_key("error");

        if has_method && has_id {
            serde_json::from_value(value)
                .map(Frame::Request)
                .map_err(|e| FrameShapeError(e.to_string()))
        } else if has_method {
            serde_json::from_value(value)
                .map(Frame::Notification)
                .map_err(|e| FrameShapeError(e.to_string()))
        } else if has_id && has_result_or_error {
            serde_json::from_value(value)
                .map(Frame::Response)
                .map_err(|e| FrameShapeError(e.to_string()))
        } else {
            Err(FrameShapeError(format!(
                "unrecognised frame shape: {value}"
            )))
        }
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
