// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn code_mapping_matches_taxonomy() {
    assert_eq!(BridgeError::ConnectionLost.code().code(), 109);
    assert_eq!(BridgeError::CircularConnection.code().code(), 312);
    assert_eq!(
        BridgeError::ReadOnlyParameter { name: "x".into() }.code().code(),
        408
    );
    assert_eq!(
        BridgeError::InternalError("boom".into()).code().code(),
        507
    );
}

#[test]
fn transport_faults_are_flagged_for_local_retry() {
    assert!(BridgeError::ConnectionLost.is_transport_fault());
    assert!(BridgeError::ConnectionRefused.is_transport_fault());
    assert!(!BridgeError::CircularConnection.is_transport_fault());
}

#[test]
fn code_ranges_match_spec_taxonomy() {
    assert!((100..200).contains(&ErrorCode::Timeout.code()));
    assert!((200..300).contains(&ErrorCode::PatchNotFound.code()));
    assert!((300..400).contains(&ErrorCode::CircularConnection.code()));
    assert!((400..500).contains(&ErrorCode::ParameterOutOfRange.code()));
    assert!((500..600).contains(&ErrorCode::InternalError.code()));
}
