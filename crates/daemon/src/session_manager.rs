// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session & Snapshot Manager: serializes the mirror's full entity set,
//! together with the active `Session` record and its accumulated
//! snapshots, to and from a file for `session.save` / `session.load`.
//! Byte-identical round-trips modulo timestamps are the load-bearing
//! property here (see the session round-trip scenario in the
//! testable-properties ledger).

use crate::error::DaemonError;
use crate::mirror::{FullState, Mirror};
use bridge_core::Session;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk shape of a `session.save` document: the entity mirror plus the
/// `Session` record (with its `snapshots`), if one was active at save time.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionFile {
    pub state: FullState,
    pub session: Option<Session>,
}

pub fn save_to_path(mirror: &Mirror, path: &Path) -> Result<(), DaemonError> {
    let file = SessionFile {
        state: mirror.snapshot(),
        session: mirror.active_session(),
    };
    let bytes = serde_json::to_vec_pretty(&file)
        .map_err(|e| DaemonError::Internal(format!("failed to serialize session: {e}")))?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<SessionFile, DaemonError> {
    let bytes = fs::read(path)?;
    let file: SessionFile = serde_json::from_slice(&bytes)
        .map_err(|e| DaemonError::Internal(format!("failed to parse session file: {e}")))?;
    Ok(file)
}

#[cfg(test)]
#[path = "session_manager_tests.rs"]
mod tests;
