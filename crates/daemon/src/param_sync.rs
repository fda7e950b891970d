// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter Sync Engine: coalesces rapid `param.set` notifications to
//! watching subscribers into batches, flushed on a timer or as soon as the
//! batch hits its size cap, whichever comes first.

use bridge_core::{ObjectId, ParameterValue};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::HashSet;

use crate::env;

pub type WatchKey = (ObjectId, String);

/// A batch that exhausted its retry attempts. Carries every `(objectId,
/// name)` the caller should mark unhealthy and raise a `SyncFailed` event
/// for.
#[derive(Debug)]
pub struct SyncFailure {
    pub reason: String,
    pub keys: Vec<WatchKey>,
}

/// Registers watch interest and coalesces parameter updates between
/// flushes. The coalescing map is an `IndexMap` so a parameter that is set
/// twice in one window keeps its original batch position but only its
/// latest value (last-write-wins within the window).
pub struct ParamSyncEngine {
    watched: Mutex<HashSet<WatchKey>>,
    pending: Mutex<IndexMap<WatchKey, ParameterValue>>,
    /// Watches whose last flush exhausted its retries. Cleared the next
    /// time that watch's batch flushes successfully.
    unhealthy: Mutex<HashSet<WatchKey>>,
}

impl Default for ParamSyncEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamSyncEngine {
    pub fn new() -> Self {
        Self {
            watched: Mutex::new(HashSet::new()),
            pending: Mutex::new(IndexMap::new()),
            unhealthy: Mutex::new(HashSet::new()),
        }
    }

    pub fn watch(&self, object_id: ObjectId, name: impl Into<String>) {
        self.watched.lock().insert((object_id, name.into()));
    }

    pub fn unwatch(&self, object_id: ObjectId, name: &str) {
        self.watched.lock().remove(&(object_id, name.to_string()));
    }

    pub fn is_watched(&self, object_id: ObjectId, name: &str) -> bool {
        self.watched.lock().contains(&(object_id, name.to_string()))
    }

    /// Whether this watch's most recent flush succeeded (or it has never
    /// flushed yet). `false` once retries are exhausted, until the next
    /// successful flush of that key clears it.
    pub fn is_healthy(&self, object_id: ObjectId, name: &str) -> bool {
        !self.unhealthy.lock().contains(&(object_id, name.to_string()))
    }

    /// Record a parameter change. No-op if nobody is watching this
    /// `(objectId, name)` pair. Returns whether the batch cap was hit,
    /// which callers use to trigger an immediate flush instead of waiting
    /// for the next timer tick.
    pub fn enqueue(&self, object_id: ObjectId, name: impl Into<String>, value: ParameterValue) -> bool {
        let name = name.into();
        if !self.is_watched(object_id, &name) {
            return false;
        }
        let mut pending = self.pending.lock();
        pending.insert((object_id, name), value);
        pending.len() >= env::param_sync_batch_cap()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Drain every currently pending update, preserving first-touched
    /// order.
    pub fn drain(&self) -> Vec<(WatchKey, ParameterValue)> {
        let mut pending = self.pending.lock();
        std::mem::take(&mut *pending).into_iter().collect()
    }

    /// Flush the pending batch via `send`, retrying up to
    /// `param_sync_max_attempts` times on failure before giving up. On
    /// exhaustion every key in the batch is marked unhealthy; the caller is
    /// responsible for raising the `SyncFailed` event (the engine has no
    /// reference to the mirror it should fan the event out through).
    pub fn flush_with(
        &self,
        mut send: impl FnMut(&[(WatchKey, ParameterValue)]) -> Result<(), String>,
    ) -> Result<usize, SyncFailure> {
        let batch = self.drain();
        if batch.is_empty() {
            return Ok(0);
        }
        let mut last_err = String::new();
        for _ in 0..env::param_sync_max_attempts() {
            match send(&batch) {
                Ok(()) => {
                    let mut unhealthy = self.unhealthy.lock();
                    for (key, _) in &batch {
                        unhealthy.remove(key);
                    }
                    return Ok(batch.len());
                }
                Err(e) => last_err = e,
            }
        }
        let keys: Vec<WatchKey> = batch.into_iter().map(|(key, _)| key).collect();
        let mut unhealthy = self.unhealthy.lock();
        unhealthy.extend(keys.iter().cloned());
        drop(unhealthy);
        Err(SyncFailure { reason: last_err, keys })
    }
}

#[cfg(test)]
#[path = "param_sync_tests.rs"]
mod tests;
