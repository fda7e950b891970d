// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request entity: an in-flight protocol operation tracked by the
//! Request Lifecycle Manager.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a [`RequestRecord`].
    pub struct RequestId("req-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    TimedOut,
}

crate::simple_display! {
    RequestStatus {
        Pending => "pending",
        Running => "running",
        Succeeded => "succeeded",
        Failed => "failed",
        Cancelled => "cancelled",
        TimedOut => "timedOut",
    }
}

impl RequestStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::Cancelled | Self::TimedOut
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: RequestId,
    pub method: String,
    pub args: serde_json::Value,
    pub status: RequestStatus,
    pub started_at: u64,
    pub ended_at: Option<u64>,
    pub timeout_ms: u64,
    pub attempts: u32,
}

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

impl RequestRecord {
    pub fn new(method: impl Into<String>, args: serde_json::Value, timeout_ms: u64, now_ms: u64) -> Self {
        Self {
            id: RequestId::new(),
            method: method.into(),
            args,
            status: RequestStatus::Pending,
            started_at: now_ms,
            ended_at: None,
            timeout_ms,
            attempts: 0,
        }
    }

    pub fn mark_running(&mut self) {
        self.status = RequestStatus::Running;
        self.attempts += 1;
    }

    pub fn finish(&mut self, status: RequestStatus, now_ms: u64) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.ended_at = Some(now_ms);
    }

    pub fn is_overdue(&self, now_ms: u64) -> bool {
        self.status == RequestStatus::Running && now_ms.saturating_sub(self.started_at) > self.timeout_ms
    }

    /// Whether a terminal request is old enough to be reaped from the
    /// registry (grace window, default >= 5s per spec).
    pub fn is_reapable(&self, now_ms: u64, grace_ms: u64) -> bool {
        match self.ended_at {
            Some(ended) => self.status.is_terminal() && now_ms.saturating_sub(ended) >= grace_ms,
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
