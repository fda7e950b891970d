// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mutation ops accepted by [`super::Mirror::mutate`]. One call to `mutate`
//! applies a `Vec<MutationOp>` as a single atomic batch: either all ops
//! commit (and the mirror's `syncId` advances by exactly one), or none do.

use bridge_core::{ObjectKind, ParameterValue, PatchId, SessionId};

#[derive(Debug, Clone)]
pub enum MutationOp {
    StartSession {
        name: String,
    },
    EndSession {
        session_id: SessionId,
    },
    CreatePatch {
        name: String,
    },
    OpenPatch {
        name: String,
        filepath: String,
    },
    SavePatch {
        patch_id: PatchId,
    },
    ClosePatch {
        patch_id: PatchId,
    },
    CreateObject {
        patch_id: PatchId,
        kind: ObjectKind,
        x: f64,
        y: f64,
        inlets: u32,
        outlets: u32,
    },
    DeleteObject {
        object_id: bridge_core::ObjectId,
    },
    MoveObject {
        object_id: bridge_core::ObjectId,
        x: f64,
        y: f64,
    },
    ConnectObjects {
        patch_id: PatchId,
        source_object: bridge_core::ObjectId,
        source_outlet: u32,
        dest_object: bridge_core::ObjectId,
        dest_inlet: u32,
    },
    DisconnectObjects {
        connection_id: bridge_core::ConnectionId,
    },
    SetParam {
        object_id: bridge_core::ObjectId,
        name: String,
        value: ParameterValue,
    },
}
