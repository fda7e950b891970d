// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bridge verify --state <path>`: load a persisted state snapshot and
//! confirm it deserialises and its invariants hold, without starting any
//! transport.

use std::path::Path;

use bridge_daemon::mirror::FullState;
use bridge_daemon::session_manager::SessionFile;
use serde::Serialize;

use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

#[derive(Debug, Serialize)]
struct VerifyReport {
    path: String,
    sync_id: u64,
    patches: usize,
    objects: usize,
    connections: usize,
    session: Option<String>,
    snapshots: usize,
}

pub fn run(state_path: &Path, format: OutputFormat) -> Result<(), ExitError> {
    let bytes = std::fs::read(state_path)
        .map_err(|e| ExitError::new(3, format!("cannot read {}: {e}", state_path.display())))?;
    let file: SessionFile = serde_json::from_slice(&bytes)
        .map_err(|e| ExitError::new(3, format!("state at {} is corrupt: {e}", state_path.display())))?;

    check_referential_integrity(&file.state, state_path)?;

    let report = VerifyReport {
        path: state_path.display().to_string(),
        sync_id: file.state.sync_id,
        patches: file.state.patches.len(),
        objects: file.state.objects.len(),
        connections: file.state.connections.len(),
        session: file.session.as_ref().map(|s| s.id.to_string()),
        snapshots: file.session.as_ref().map(|s| s.snapshots.len()).unwrap_or(0),
    };

    format_or_json(format, &report, || {
        println!("state ok: {}", report.path);
        println!("  syncId: {}", report.sync_id);
        println!("  patches: {}", report.patches);
        println!("  objects: {}", report.objects);
        println!("  connections: {}", report.connections);
        match &report.session {
            Some(id) => println!("  session: {id} ({} snapshot(s))", report.snapshots),
            None => println!("  session: none"),
        }
    })
    .map_err(|e| ExitError::new(1, e.to_string()))
}

/// Every connection must reference objects that actually exist in the
/// snapshot. A dangling endpoint means the file was hand-edited or
/// truncated mid-write.
fn check_referential_integrity(full: &FullState, state_path: &Path) -> Result<(), ExitError> {
    let object_ids: std::collections::HashSet<_> = full.objects.iter().map(|o| o.id).collect();
    for conn in &full.connections {
        if !object_ids.contains(&conn.source_object) || !object_ids.contains(&conn.dest_object) {
            return Err(ExitError::new(
                3,
                format!(
                    "state at {} is corrupt: connection {} references a missing object",
                    state_path.display(),
                    conn.id
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
