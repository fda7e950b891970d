// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error/Recovery Manager: tracks L2 connection health, backs off
//! reconnect attempts exponentially, and persists a small side-store so a
//! restarted daemon can tell whether it is resuming a prior session.

use bridge_core::SessionId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::env;

/// Connection lifecycle state for the L2 (assistant) transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Connected,
    Reconnecting,
    ConnectionError,
}

#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted crash-recovery facts, written atomically on every state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideStore {
    pub connection_status: String,
    pub session_id: Option<SessionId>,
    pub last_snapshot_path: Option<PathBuf>,
    pub last_sync_id: u64,
}

impl Default for SideStore {
    fn default() -> Self {
        Self {
            connection_status: "idle".to_string(),
            session_id: None,
            last_snapshot_path: None,
            last_sync_id: 0,
        }
    }
}

const MAX_BAK_FILES: u32 = 3;

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };
    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }
    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }
    bak(1)
}

/// Owns the side-store file and the reconnect backoff schedule.
pub struct RecoveryManager {
    path: PathBuf,
    state: ConnectionState,
    attempt: u32,
}

impl RecoveryManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: ConnectionState::Idle,
            attempt: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Load the side-store, if one exists at `path` (or a `.bak` rotation of
    /// it if the primary file is missing or corrupt).
    pub fn load(&self) -> Result<Option<SideStore>, RecoveryError> {
        for candidate in [self.path.clone(), self.path.with_extension("bak")] {
            if !candidate.exists() {
                continue;
            }
            let bytes = fs::read(&candidate)?;
            match serde_json::from_slice(&bytes) {
                Ok(store) => return Ok(Some(store)),
                Err(_) => continue,
            }
        }
        Ok(None)
    }

    /// Persist the side-store via atomic replace: write to a sibling temp
    /// file, rotate the previous file into `.bak`, then rename into place.
    pub fn persist(&self, store: &SideStore) -> Result<(), RecoveryError> {
        let bytes = serde_json::to_vec_pretty(store)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, &bytes)?;
        if self.path.exists() {
            let bak_path = rotate_bak_path(&self.path);
            fs::rename(&self.path, bak_path)?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    pub fn mark_connecting(&mut self) {
        self.state = ConnectionState::Connecting;
    }

    pub fn mark_connected(&mut self) {
        self.state = ConnectionState::Connected;
        self.attempt = 0;
    }

    /// Record a failed (re)connect attempt and return the backoff delay
    /// before the next attempt, or `None` once the attempt cap is reached.
    pub fn mark_failed(&mut self) -> Option<Duration> {
        self.attempt += 1;
        if self.attempt > env::reconnect_attempt_cap() {
            self.state = ConnectionState::ConnectionError;
            return None;
        }
        self.state = ConnectionState::Reconnecting;
        let base = env::reconnect_base_delay().as_millis() as u64;
        let delay_ms = base.saturating_mul(1u64 << (self.attempt - 1));
        Some(Duration::from_millis(delay_ms))
    }

    pub fn mark_lost(&mut self) {
        self.state = ConnectionState::Reconnecting;
    }
}

#[cfg(test)]
#[path = "recovery_tests.rs"]
mod tests;
