// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bridge export-schema`: dump the L2 method catalogue and the error-code
//! taxonomy as JSON, so a client implementation can validate against them
//! without hand-copying constants out of the wire crate.

use bridge_core::ErrorCode;
use bridge_wire::Method;
use serde::Serialize;

use crate::exit_error::ExitError;

#[derive(Debug, Serialize)]
struct MethodEntry {
    name: &'static str,
    timeout_override_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
struct ErrorCodeEntry {
    name: &'static str,
    code: i32,
}

#[derive(Debug, Serialize)]
struct Schema {
    methods: Vec<MethodEntry>,
    error_codes: Vec<ErrorCodeEntry>,
}

const ERROR_CODES: &[(&str, ErrorCode)] = &[
    ("connectionRefused", ErrorCode::ConnectionRefused),
    ("timeout", ErrorCode::Timeout),
    ("invalidAddress", ErrorCode::InvalidAddress),
    ("invalidArguments", ErrorCode::InvalidArguments),
    ("connectionLost", ErrorCode::ConnectionLost),
    ("patchNotFound", ErrorCode::PatchNotFound),
    ("patchCreationFailed", ErrorCode::PatchCreationFailed),
    ("objectNotFound", ErrorCode::ObjectNotFound),
    ("objectCreationFailed", ErrorCode::ObjectCreationFailed),
    ("connectionFailed", ErrorCode::ConnectionFailed),
    ("inletOutOfRange", ErrorCode::InletOutOfRange),
    ("outletOutOfRange", ErrorCode::OutletOutOfRange),
    ("incompatibleConnection", ErrorCode::IncompatibleConnection),
    ("circularConnection", ErrorCode::CircularConnection),
    ("parameterNotFound", ErrorCode::ParameterNotFound),
    ("parameterOutOfRange", ErrorCode::ParameterOutOfRange),
    ("readOnlyParameter", ErrorCode::ReadOnlyParameter),
    ("insufficientResources", ErrorCode::InsufficientResources),
    ("internalError", ErrorCode::InternalError),
    ("sessionError", ErrorCode::SessionError),
    ("stateSyncError", ErrorCode::StateSyncError),
    ("rateLimitExceeded", ErrorCode::RateLimitExceeded),
];

fn build_schema() -> Schema {
    Schema {
        methods: Method::ALL
            .iter()
            .map(|m| MethodEntry {
                name: m.as_str(),
                timeout_override_ms: m.timeout_override_ms(),
            })
            .collect(),
        error_codes: ERROR_CODES
            .iter()
            .map(|(name, code)| ErrorCodeEntry { name, code: code.code() })
            .collect(),
    }
}

pub fn run() -> Result<(), ExitError> {
    let json = serde_json::to_string_pretty(&build_schema())
        .map_err(|e| ExitError::new(1, format!("failed to serialize schema: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[path = "export_schema_tests.rs"]
mod tests;
