// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host-Lifecycle Adapter: translates the host patcher's own lifecycle
//! notifications (a patch was loaded, saved, closed, or newly created)
//! into mirror mutations, so the bridge's view of open patches tracks the
//! host's even when the assistant process never issued the corresponding
//! `patch.*` request itself.

use bridge_core::{BridgeError, PatchId};
use serde::Deserialize;

use crate::mirror::{Mirror, MutationOp};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HostLifecycleEvent {
    Loaded { name: String, filepath: String },
    Saved { patch_id: PatchId },
    Closed { patch_id: PatchId },
    New { name: String },
}

/// Apply one host-lifecycle notification to the mirror, returning the
/// events it produced.
pub fn handle(mirror: &Mirror, event: HostLifecycleEvent) -> Result<Vec<bridge_core::StateEvent>, BridgeError> {
    let op = match event {
        HostLifecycleEvent::Loaded { name, filepath } => MutationOp::OpenPatch { name, filepath },
        HostLifecycleEvent::Saved { patch_id } => MutationOp::SavePatch { patch_id },
        HostLifecycleEvent::Closed { patch_id } => MutationOp::ClosePatch { patch_id },
        HostLifecycleEvent::New { name } => MutationOp::CreatePatch { name },
    };
    mirror.mutate(vec![op])
}

#[cfg(test)]
#[path = "host_lifecycle_tests.rs"]
mod tests;
