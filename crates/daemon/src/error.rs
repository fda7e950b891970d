// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon-level error wrapping: ties `bridge_core::BridgeError` (state/
//! domain faults) together with transport- and protocol-level faults that
//! only exist once there's a socket and a connection loop.

use bridge_core::BridgeError;
use bridge_wire::{ProtocolError, RpcError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    #[error("unknown route: {0}")]
    UnknownRoute(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl DaemonError {
    pub fn code(&self) -> i32 {
        match self {
            Self::Bridge(e) => e.code().code(),
            Self::Protocol(_) => 105, // InvalidArguments: malformed frame
            Self::Io(_) => 101,       // ConnectionRefused: transport fault
            Self::UnknownMethod(_) | Self::UnknownRoute(_) => 104, // InvalidAddress
            Self::Internal(_) => 507,
        }
    }
}

impl From<&DaemonError> for RpcError {
    fn from(err: &DaemonError) -> Self {
        RpcError::new(err.code(), err.to_string())
    }
}

impl From<DaemonError> for RpcError {
    fn from(err: DaemonError) -> Self {
        RpcError::from(&err)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
