// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The State Mirror: sole owner of entity data, serialising all mutations
//! through a single linearisation point (an internal lock, never held
//! across an `.await`).

mod ops;
mod subscription;

pub use ops::MutationOp;
pub use subscription::SubscriberQueue;

use bridge_core::{
    BridgeError, Connection, ConnectionId, Object, ObjectId, Parameter, Patch, PatchId,
    PatchStatus, Session, SessionId, Snapshot, StateCategory, StateDiff, StateEvent,
    StateEventKind,
};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Arc;

/// How many committed batches' worth of events the mirror retains for
/// `diff(sinceSyncId)`. Older anchors trigger a full-snapshot rebase.
const CHANGE_LOG_RETENTION: usize = 500;

#[derive(Default)]
struct Inner {
    patches: BTreeMap<PatchId, Patch>,
    objects: BTreeMap<ObjectId, Object>,
    connections: BTreeMap<ConnectionId, Connection>,
    sessions: BTreeMap<SessionId, Session>,
    active_session: Option<SessionId>,
    sync_id: u64,
    /// `(syncId, events committed in that batch)`, newest at the back.
    change_log: VecDeque<(u64, Vec<StateEvent>)>,
    subscribers: Vec<Arc<SubscriberQueue>>,
}

/// A consistent point-in-time image of every entity, labelled with the
/// `syncId` it was taken at.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FullState {
    pub sync_id: u64,
    pub patches: Vec<Patch>,
    pub objects: Vec<Object>,
    pub connections: Vec<Connection>,
}

/// Result of `diff(sinceSyncId)`: either the minimal diff, or a full
/// snapshot when the anchor has aged out of the retention window.
#[derive(Debug, Clone)]
pub enum DiffResult {
    Diff {
        new_sync_id: u64,
        ops: Vec<StateDiff>,
    },
    Rebase {
        snapshot: FullState,
    },
}

pub struct Mirror {
    inner: Mutex<Inner>,
    clock: bridge_core::AnyClock,
}

impl Mirror {
    pub fn new(clock: bridge_core::AnyClock) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            clock,
        }
    }

    fn now_ms(&self) -> u64 {
        self.clock.epoch_ms()
    }

    // --- reads ---

    pub fn get_patch(&self, id: &PatchId) -> Option<Patch> {
        self.inner.lock().patches.get(id).cloned()
    }

    pub fn get_object(&self, id: &ObjectId) -> Option<Object> {
        self.inner.lock().objects.get(id).cloned()
    }

    pub fn get_connection(&self, id: &ConnectionId) -> Option<Connection> {
        self.inner.lock().connections.get(id).cloned()
    }

    pub fn get_session(&self, id: &SessionId) -> Option<Session> {
        self.inner.lock().sessions.get(id).cloned()
    }

    pub fn active_session(&self) -> Option<Session> {
        let inner = self.inner.lock();
        inner.active_session.and_then(|id| inner.sessions.get(&id).cloned())
    }

    pub fn sync_id(&self) -> u64 {
        self.inner.lock().sync_id
    }

    pub fn patch_count(&self) -> usize {
        self.inner.lock().patches.len()
    }

    pub fn get_param(&self, object_id: &ObjectId, name: &str) -> Result<Parameter, BridgeError> {
        let inner = self.inner.lock();
        let obj = inner
            .objects
            .get(object_id)
            .ok_or_else(|| BridgeError::ObjectNotFound {
                id: object_id.to_string(),
            })?;
        obj.params
            .get(name)
            .cloned()
            .ok_or_else(|| BridgeError::ParameterNotFound { name: name.to_string() })
    }

    pub fn snapshot(&self) -> FullState {
        let inner = self.inner.lock();
        FullState {
            sync_id: inner.sync_id,
            patches: inner.patches.values().cloned().collect(),
            objects: inner.objects.values().cloned().collect(),
            connections: inner.connections.values().cloned().collect(),
        }
    }

    pub fn diff(&self, since_sync_id: u64) -> DiffResult {
        let inner = self.inner.lock();
        if since_sync_id >= inner.sync_id {
            return DiffResult::Diff {
                new_sync_id: inner.sync_id,
                ops: Vec::new(),
            };
        }
        let oldest_retained = inner.change_log.front().map(|(s, _)| *s);
        let retained_from_anchor = match oldest_retained {
            Some(oldest) => since_sync_id + 1 >= oldest,
            None => since_sync_id >= inner.sync_id,
        };
        if !retained_from_anchor {
            drop(inner);
            return DiffResult::Rebase {
                snapshot: self.snapshot(),
            };
        }
        let mut ops = Vec::new();
        for (seq, events) in inner.change_log.iter() {
            if *seq <= since_sync_id {
                continue;
            }
            for event in events {
                ops.push(state_event_to_diff(event));
            }
        }
        DiffResult::Diff {
            new_sync_id: inner.sync_id,
            ops,
        }
    }

    pub fn subscribe(&self, filter: HashSet<StateCategory>) -> Arc<SubscriberQueue> {
        let queue = SubscriberQueue::new(filter, subscription::DEFAULT_CAPACITY);
        self.inner.lock().subscribers.push(queue.clone());
        queue
    }

    // --- writes ---

    /// Apply a batch of ops atomically: validated first, then committed in
    /// order. Either every op applies and `syncId` advances by exactly one,
    /// or none do and an error is returned.
    pub fn mutate(&self, ops: Vec<MutationOp>) -> Result<Vec<StateEvent>, BridgeError> {
        let now = self.now_ms();
        let mut inner = self.inner.lock();
        // Validate against a scratch clone so a mid-batch failure leaves no
        // partial effects (handlers are expected to be transactional).
        let mut scratch = Scratch::from(&*inner);
        let mut events = Vec::new();
        let next_sync_id = inner.sync_id + 1;
        for op in &ops {
            let ev = apply_one(&mut scratch, op, now, next_sync_id)?;
            events.push(ev);
        }
        scratch.commit_into(&mut inner);
        inner.sync_id = next_sync_id;
        inner
            .change_log
            .push_back((next_sync_id, events.clone()));
        while inner.change_log.len() > CHANGE_LOG_RETENTION {
            inner.change_log.pop_front();
        }
        for subscriber in inner.subscribers.iter() {
            for event in &events {
                if subscriber.matches(event.category) {
                    subscriber.push(event.clone());
                }
            }
        }
        Ok(events)
    }

    /// Replace the entire entity set with `full` (used by `session.load`).
    /// Bypasses the normal op-by-op diffing: this is a wholesale swap, not
    /// an incremental change, so it emits a single `stateChanged` event on
    /// the session category rather than one event per entity. Does not
    /// touch the sessions map; pair with [`Mirror::restore_session`] when
    /// the loaded document also carries a `Session` record.
    pub fn restore_snapshot(&self, full: FullState) -> StateEvent {
        let now = self.now_ms();
        let mut inner = self.inner.lock();
        inner.patches = full.patches.into_iter().map(|p| (p.id, p)).collect();
        inner.objects = full.objects.into_iter().map(|o| (o.id, o)).collect();
        inner.connections = full.connections.into_iter().map(|c| (c.id, c)).collect();
        let next_sync_id = inner.sync_id + 1;
        inner.sync_id = next_sync_id;
        let event = StateEvent::new(
            StateCategory::Session,
            StateEventKind::StateChanged,
            "restored",
            serde_json::json!({"syncId": next_sync_id}),
            now,
            next_sync_id,
        );
        inner.change_log.push_back((next_sync_id, vec![event.clone()]));
        while inner.change_log.len() > CHANGE_LOG_RETENTION {
            inner.change_log.pop_front();
        }
        for subscriber in inner.subscribers.iter() {
            if subscriber.matches(event.category) {
                subscriber.push(event.clone());
            }
        }
        event
    }

    /// Reinsert a `Session` record loaded from a `session.save` document
    /// (with its `patches`/`global_settings`/`snapshots` intact), marking it
    /// active again if it was active when saved.
    pub fn restore_session(&self, session: Session) {
        let mut inner = self.inner.lock();
        let id = session.id;
        let active = session.is_active();
        inner.sessions.insert(id, session);
        if active {
            inner.active_session = Some(id);
        }
    }

    /// Raise a `SyncFailed` event for a watch whose batch exhausted its
    /// retry attempts. Unlike [`Mirror::mutate`], this records no entity
    /// change and does not advance `syncId`: it is a live notification to
    /// subscribers, not a persisted mutation, so it is not replayed by
    /// `state.diff`.
    pub fn raise_sync_failed(&self, object_id: ObjectId, parameter: &str, reason: &str) -> StateEvent {
        let now = self.now_ms();
        let inner = self.inner.lock();
        let event = StateEvent::new(
            StateCategory::Parameter,
            StateEventKind::SyncFailed,
            object_id.to_string(),
            serde_json::json!({"parameter": parameter, "reason": reason}),
            now,
            inner.sync_id,
        );
        for subscriber in inner.subscribers.iter() {
            if subscriber.matches(event.category) {
                subscriber.push(event.clone());
            }
        }
        event
    }
}

/// Capture a full state image off the in-progress `scratch`, for the
/// implicit snapshots `session.start`/`session.end` take.
fn capture_snapshot(scratch: &Scratch, sync_id: u64, now: u64) -> Snapshot {
    Snapshot::new(
        sync_id,
        now,
        scratch.patches.values().cloned().collect(),
        scratch.objects.values().cloned().collect(),
        scratch.connections.values().cloned().collect(),
    )
}

fn state_event_to_diff(event: &StateEvent) -> StateDiff {
    let path = format!("/{}/{}", event.category, event.subject_id);
    match event.kind {
        StateEventKind::Deleted | StateEventKind::Disconnected => StateDiff::remove(path),
        StateEventKind::Created | StateEventKind::Connected => {
            StateDiff::add(path, event.data.clone())
        }
        _ => StateDiff::replace(path, event.data.clone()),
    }
}

/// A working copy of the mutable entity maps, used so a batch validates
/// entirely before any change is committed to the real state.
struct Scratch {
    patches: BTreeMap<PatchId, Patch>,
    objects: BTreeMap<ObjectId, Object>,
    connections: BTreeMap<ConnectionId, Connection>,
    sessions: BTreeMap<SessionId, Session>,
    active_session: Option<SessionId>,
}

impl From<&Inner> for Scratch {
    fn from(inner: &Inner) -> Self {
        Self {
            patches: inner.patches.clone(),
            objects: inner.objects.clone(),
            connections: inner.connections.clone(),
            sessions: inner.sessions.clone(),
            active_session: inner.active_session,
        }
    }
}

impl Scratch {
    fn commit_into(self, inner: &mut Inner) {
        inner.patches = self.patches;
        inner.objects = self.objects;
        inner.connections = self.connections;
        inner.sessions = self.sessions;
        inner.active_session = self.active_session;
    }
}

fn apply_one(
    scratch: &mut Scratch,
    op: &MutationOp,
    now: u64,
    sync_id: u64,
) -> Result<StateEvent, BridgeError> {
    match op {
        MutationOp::StartSession { name } => {
            let mut session = Session::start(name.clone(), now);
            let id = session.id;
            session.snapshots.push(capture_snapshot(scratch, sync_id, now));
            let data = serde_json::json!({"id": id.to_string(), "name": name});
            scratch.sessions.insert(id, session);
            scratch.active_session = Some(id);
            Ok(StateEvent::new(
                StateCategory::Session,
                StateEventKind::Created,
                id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
        MutationOp::EndSession { session_id } => {
            let closing = capture_snapshot(scratch, sync_id, now);
            let session = scratch
                .sessions
                .get_mut(session_id)
                .ok_or_else(|| BridgeError::SessionError {
                    reason: format!("no such session: {session_id}"),
                })?;
            session.end(now);
            session.snapshots.push(closing);
            if scratch.active_session == Some(*session_id) {
                scratch.active_session = None;
            }
            let data = serde_json::json!({"id": session_id.to_string()});
            Ok(StateEvent::new(
                StateCategory::Session,
                StateEventKind::StateChanged,
                session_id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
        MutationOp::CreatePatch { name } => {
            let patch = Patch::new(name.clone(), now);
            let id = patch.id;
            let data = serde_json::json!({"id": id.to_string(), "name": name});
            scratch.patches.insert(id, patch);
            Ok(StateEvent::new(
                StateCategory::Patch,
                StateEventKind::Created,
                id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
        MutationOp::OpenPatch { name, filepath } => {
            let mut patch = Patch::new(name.clone(), now);
            patch.filepath = Some(filepath.clone());
            let id = patch.id;
            let data = serde_json::json!({"id": id.to_string(), "name": name, "filepath": filepath});
            scratch.patches.insert(id, patch);
            Ok(StateEvent::new(
                StateCategory::Patch,
                StateEventKind::Created,
                id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
        MutationOp::SavePatch { patch_id } => {
            let patch = scratch
                .patches
                .get_mut(patch_id)
                .ok_or_else(|| BridgeError::PatchNotFound {
                    id: patch_id.to_string(),
                })?;
            patch.modified = false;
            patch.updated_at = now;
            let data = serde_json::json!({"id": patch_id.to_string()});
            Ok(StateEvent::new(
                StateCategory::Patch,
                StateEventKind::StateChanged,
                patch_id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
        MutationOp::ClosePatch { patch_id } => {
            let patch = scratch
                .patches
                .get_mut(patch_id)
                .ok_or_else(|| BridgeError::PatchNotFound {
                    id: patch_id.to_string(),
                })?;
            patch.status = PatchStatus::Closed;
            let doomed_objects = patch.objects.clone();
            let doomed_connections = patch.connections.clone();
            for obj_id in doomed_objects {
                scratch.objects.remove(&obj_id);
            }
            for conn_id in doomed_connections {
                scratch.connections.remove(&conn_id);
            }
            let data = serde_json::json!({"id": patch_id.to_string()});
            Ok(StateEvent::new(
                StateCategory::Patch,
                StateEventKind::Deleted,
                patch_id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
        MutationOp::CreateObject {
            patch_id,
            kind,
            x,
            y,
            inlets,
            outlets,
        } => {
            if !scratch.patches.contains_key(patch_id) {
                return Err(BridgeError::PatchNotFound {
                    id: patch_id.to_string(),
                });
            }
            let obj = Object::new(
                *patch_id,
                kind.clone(),
                bridge_core::Position { x: *x, y: *y },
                *inlets,
                *outlets,
                now,
            );
            let id = obj.id;
            let data = serde_json::json!({
                "id": id.to_string(), "patchId": patch_id.to_string(),
                "kind": kind.0, "x": x, "y": y,
            });
            scratch.objects.insert(id, obj);
            // `contains_key` was just checked above in this same scratch;
            // nothing else touches `scratch` between the two calls.
            #[allow(clippy::expect_used)]
            let patch = scratch.patches.get_mut(patch_id).expect("checked above");
            patch.objects.insert(id);
            patch.touch(now);
            Ok(StateEvent::new(
                StateCategory::Object,
                StateEventKind::Created,
                id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
        MutationOp::DeleteObject { object_id } => {
            let obj = scratch
                .objects
                .remove(object_id)
                .ok_or_else(|| BridgeError::ObjectNotFound {
                    id: object_id.to_string(),
                })?;
            if let Some(patch) = scratch.patches.get_mut(&obj.patch_id) {
                patch.objects.remove(object_id);
                let doomed: Vec<ConnectionId> = patch
                    .connections
                    .iter()
                    .filter(|c| {
                        scratch
                            .connections
                            .get(c)
                            .map(|conn| conn.source_object == *object_id || conn.dest_object == *object_id)
                            .unwrap_or(false)
                    })
                    .copied()
                    .collect();
                for conn_id in doomed {
                    patch.connections.remove(&conn_id);
                    scratch.connections.remove(&conn_id);
                }
                patch.touch(now);
            }
            let data = serde_json::json!({"id": object_id.to_string()});
            Ok(StateEvent::new(
                StateCategory::Object,
                StateEventKind::Deleted,
                object_id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
        MutationOp::MoveObject { object_id, x, y } => {
            let obj = scratch
                .objects
                .get_mut(object_id)
                .ok_or_else(|| BridgeError::ObjectNotFound {
                    id: object_id.to_string(),
                })?;
            obj.position.x = *x;
            obj.position.y = *y;
            obj.updated_at = now;
            let data = serde_json::json!({"id": object_id.to_string(), "x": x, "y": y});
            Ok(StateEvent::new(
                StateCategory::Object,
                StateEventKind::Moved,
                object_id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
        MutationOp::ConnectObjects {
            patch_id,
            source_object,
            source_outlet,
            dest_object,
            dest_inlet,
        } => {
            let source = scratch
                .objects
                .get(source_object)
                .ok_or_else(|| BridgeError::ObjectNotFound {
                    id: source_object.to_string(),
                })?;
            let dest = scratch
                .objects
                .get(dest_object)
                .ok_or_else(|| BridgeError::ObjectNotFound {
                    id: dest_object.to_string(),
                })?;
            if source.patch_id != *patch_id || dest.patch_id != *patch_id {
                return Err(BridgeError::IncompatibleConnection);
            }
            if !source.outlet_in_range(*source_outlet) {
                return Err(BridgeError::OutletOutOfRange {
                    outlet: *source_outlet,
                    outlets: source.outlets,
                });
            }
            if !dest.inlet_in_range(*dest_inlet) {
                return Err(BridgeError::InletOutOfRange {
                    inlet: *dest_inlet,
                    inlets: dest.inlets,
                });
            }
            let id = ConnectionId::from_endpoints(source_object, *source_outlet, dest_object, *dest_inlet);
            if scratch.connections.contains_key(&id) {
                // Idempotent re-creation: same triple, no new edge, no event.
                let data = serde_json::json!({"id": id.to_string()});
                return Ok(StateEvent::new(
                    StateCategory::Connection,
                    StateEventKind::Connected,
                    id.to_string(),
                    data,
                    now,
                    sync_id,
                ));
            }
            if would_create_cycle(scratch, *patch_id, *dest_object, *source_object) {
                return Err(BridgeError::CircularConnection);
            }
            let conn = Connection::new(*patch_id, *source_object, *source_outlet, *dest_object, *dest_inlet, now);
            let data = serde_json::json!({
                "id": id.to_string(), "patchId": patch_id.to_string(),
                "sourceObject": source_object.to_string(), "sourceOutlet": source_outlet,
                "destObject": dest_object.to_string(), "destInlet": dest_inlet,
            });
            scratch.connections.insert(id, conn);
            if let Some(patch) = scratch.patches.get_mut(patch_id) {
                patch.connections.insert(id);
                patch.touch(now);
            }
            Ok(StateEvent::new(
                StateCategory::Connection,
                StateEventKind::Connected,
                id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
        MutationOp::DisconnectObjects { connection_id } => {
            let conn = scratch
                .connections
                .remove(connection_id)
                .ok_or_else(|| BridgeError::ConnectionFailed {
                    reason: format!("no such connection: {connection_id}"),
                })?;
            if let Some(patch) = scratch.patches.get_mut(&conn.patch_id) {
                patch.connections.remove(connection_id);
                patch.touch(now);
            }
            let data = serde_json::json!({"id": connection_id.to_string()});
            Ok(StateEvent::new(
                StateCategory::Connection,
                StateEventKind::Disconnected,
                connection_id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
        MutationOp::SetParam {
            object_id,
            name,
            value,
        } => {
            let obj = scratch
                .objects
                .get_mut(object_id)
                .ok_or_else(|| BridgeError::ObjectNotFound {
                    id: object_id.to_string(),
                })?;
            let entry = obj
                .params
                .entry(name.clone())
                .or_insert_with(|| Parameter::new(name.clone(), value.clone(), now));
            entry.try_set(value.clone())?;
            entry.last_updated_at = now;
            let data = serde_json::json!({
                "objectId": object_id.to_string(), "name": name,
                "value": serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
            });
            Ok(StateEvent::new(
                StateCategory::Parameter,
                StateEventKind::ParamChanged,
                object_id.to_string(),
                data,
                now,
                sync_id,
            ))
        }
    }
}

/// Depth-first reachability check: would adding `dest -> ... -> source`
/// already exist via committed connections, i.e. would `source -> dest`
/// close a cycle?
fn would_create_cycle(
    scratch: &Scratch,
    patch_id: PatchId,
    dest_object: ObjectId,
    source_object: ObjectId,
) -> bool {
    let mut visited: HashSet<ObjectId> = HashSet::new();
    let mut stack = vec![dest_object];
    while let Some(current) = stack.pop() {
        if current == source_object {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        for conn in scratch.connections.values() {
            if conn.patch_id == patch_id && conn.source_object == current {
                stack.push(conn.dest_object);
            }
        }
    }
    false
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
