// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single mirror subscriber's event queue.
//!
//! Structural events (create/delete/connect/...) are never dropped. When a
//! subscriber falls behind and its queue is over capacity, the oldest
//! queued *parameter* event is evicted to make room — coalescing is
//! "drop-oldest for parameter events only", matching the mirror's
//! subscribe contract. If the queue holds no parameter events to evict
//! (all structural), the queue grows past capacity rather than dropping a
//! structural event; the subscriber is flagged lagging either way so
//! callers can detect and react.

use bridge_core::{StateCategory, StateEvent};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

pub const DEFAULT_CAPACITY: usize = 256;

pub struct SubscriberQueue {
    filter: HashSet<StateCategory>,
    capacity: usize,
    inner: parking_lot::Mutex<VecDeque<StateEvent>>,
    notify: Notify,
    lagging: AtomicBool,
}

impl SubscriberQueue {
    pub fn new(filter: HashSet<StateCategory>, capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            filter,
            capacity,
            inner: parking_lot::Mutex::new(VecDeque::new()),
            notify: Notify::new(),
            lagging: AtomicBool::new(false),
        })
    }

    pub fn matches(&self, category: StateCategory) -> bool {
        self.filter.is_empty() || self.filter.contains(&category)
    }

    pub fn is_lagging(&self) -> bool {
        self.lagging.load(Ordering::Relaxed)
    }

    /// Push one event. Never blocks.
    pub fn push(&self, event: StateEvent) {
        let mut queue = self.inner.lock();
        if queue.len() >= self.capacity {
            if let Some(pos) = queue
                .iter()
                .position(|e| e.category == StateCategory::Parameter)
            {
                queue.remove(pos);
            }
            self.lagging.store(true, Ordering::Relaxed);
        }
        queue.push_back(event);
        drop(queue);
        self.notify.notify_one();
    }

    /// Wait for and drain all currently queued events.
    pub async fn recv_batch(&self) -> Vec<StateEvent> {
        loop {
            {
                let mut queue = self.inner.lock();
                if !queue.is_empty() {
                    self.lagging.store(false, Ordering::Relaxed);
                    return queue.drain(..).collect();
                }
            }
            self.notify.notified().await;
        }
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
