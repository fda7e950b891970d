// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The closed fault taxonomy shared by every bridge component.
//!
//! [`BridgeError`] is the one sum type handlers return; [`ErrorCode`] is its
//! serialisation format on the wire. Keeping the numeric mapping in one
//! `From` impl is what stops the taxonomy from drifting between call sites.

use thiserror::Error;

/// Numeric error codes, grouped by range per the external protocol.
///
/// - 100-199 Transport / communication
/// - 200-299 Patch operations
/// - 300-399 Object operations
/// - 400-499 Parameter operations
/// - 500-599 System
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    ConnectionRefused = 101,
    Timeout = 103,
    InvalidAddress = 104,
    InvalidArguments = 105,
    ConnectionLost = 109,
    PatchNotFound = 201,
    PatchCreationFailed = 203,
    ObjectNotFound = 301,
    ObjectCreationFailed = 302,
    ConnectionFailed = 304,
    InletOutOfRange = 307,
    OutletOutOfRange = 308,
    IncompatibleConnection = 311,
    CircularConnection = 312,
    ParameterNotFound = 401,
    ParameterOutOfRange = 407,
    ReadOnlyParameter = 408,
    InsufficientResources = 503,
    InternalError = 507,
    SessionError = 511,
    StateSyncError = 512,
    RateLimitExceeded = 515,
}

impl ErrorCode {
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The closed fault taxonomy. Every handler returns this type; `bridge-wire`
/// converts it to a numeric code + message for the L2 response frame.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("connection refused")]
    ConnectionRefused,
    #[error("request {id} timed out after {timeout_ms}ms")]
    Timeout { id: String, timeout_ms: u64 },
    #[error("invalid address: {address}")]
    InvalidAddress { address: String },
    #[error("invalid arguments for {method}: {reason}")]
    InvalidArguments { method: String, reason: String },
    #[error("connection lost")]
    ConnectionLost,
    #[error("patch not found: {id}")]
    PatchNotFound { id: String },
    #[error("failed to create patch: {reason}")]
    PatchCreationFailed { reason: String },
    #[error("object not found: {id}")]
    ObjectNotFound { id: String },
    #[error("failed to create object: {reason}")]
    ObjectCreationFailed { reason: String },
    #[error("failed to create connection: {reason}")]
    ConnectionFailed { reason: String },
    #[error("inlet {inlet} out of range (object has {inlets} inlets)")]
    InletOutOfRange { inlet: u32, inlets: u32 },
    #[error("outlet {outlet} out of range (object has {outlets} outlets)")]
    OutletOutOfRange { outlet: u32, outlets: u32 },
    #[error("connection endpoints belong to different patches")]
    IncompatibleConnection,
    #[error("connection would create a cycle")]
    CircularConnection,
    #[error("parameter not found: {name}")]
    ParameterNotFound { name: String },
    #[error("parameter {name} out of range ({min:?}..{max:?})")]
    ParameterOutOfRange {
        name: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    #[error("parameter {name} is read-only")]
    ReadOnlyParameter { name: String },
    #[error("insufficient resources: {reason}")]
    InsufficientResources { reason: String },
    #[error("internal error: {0}")]
    InternalError(String),
    #[error("session error: {reason}")]
    SessionError { reason: String },
    #[error("state sync error: {reason}")]
    StateSyncError { reason: String },
    #[error("rate limit exceeded")]
    RateLimitExceeded,
}

impl BridgeError {
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ConnectionRefused => ErrorCode::ConnectionRefused,
            Self::Timeout { .. } => ErrorCode::Timeout,
            Self::InvalidAddress { .. } => ErrorCode::InvalidAddress,
            Self::InvalidArguments { .. } => ErrorCode::InvalidArguments,
            Self::ConnectionLost => ErrorCode::ConnectionLost,
            Self::PatchNotFound { .. } => ErrorCode::PatchNotFound,
            Self::PatchCreationFailed { .. } => ErrorCode::PatchCreationFailed,
            Self::ObjectNotFound { .. } => ErrorCode::ObjectNotFound,
            Self::ObjectCreationFailed { .. } => ErrorCode::ObjectCreationFailed,
            Self::ConnectionFailed { .. } => ErrorCode::ConnectionFailed,
            Self::InletOutOfRange { .. } => ErrorCode::InletOutOfRange,
            Self::OutletOutOfRange { .. } => ErrorCode::OutletOutOfRange,
            Self::IncompatibleConnection => ErrorCode::IncompatibleConnection,
            Self::CircularConnection => ErrorCode::CircularConnection,
            Self::ParameterNotFound { .. } => ErrorCode::ParameterNotFound,
            Self::ParameterOutOfRange { .. } => ErrorCode::ParameterOutOfRange,
            Self::ReadOnlyParameter { .. } => ErrorCode::ReadOnlyParameter,
            Self::InsufficientResources { .. } => ErrorCode::InsufficientResources,
            Self::InternalError(_) => ErrorCode::InternalError,
            Self::SessionError { .. } => ErrorCode::SessionError,
            Self::StateSyncError { .. } => ErrorCode::StateSyncError,
            Self::RateLimitExceeded => ErrorCode::RateLimitExceeded,
        }
    }

    /// Whether this fault is transport-level and therefore eligible for
    /// local retry by the Recovery Manager, rather than immediate surfacing.
    pub const fn is_transport_fault(&self) -> bool {
        matches!(
            self,
            Self::ConnectionRefused | Self::ConnectionLost | Self::Timeout { .. }
        )
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
