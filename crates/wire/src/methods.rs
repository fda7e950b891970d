// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The L2 method catalogue: every method name the Router's method table
//! may dispatch on. Kept as a closed enum (rather than a bag of string
//! constants) so an unrecognised method name is caught by `FromStr` at the
//! router boundary instead of drifting through string comparisons.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    PatchCreate,
    PatchOpen,
    PatchSave,
    PatchClose,
    ObjectCreate,
    ObjectDelete,
    ObjectMove,
    ObjectConnect,
    ObjectDisconnect,
    ParamSet,
    ParamGet,
    ParamWatch,
    ParamUnwatch,
    StateSync,
    StateDiff,
    SessionStart,
    SessionEnd,
    SessionSave,
    SessionLoad,
    SystemInit,
    SystemShutdown,
    SystemStatus,
    SystemPing,
}

impl Method {
    pub const ALL: &'static [Method] = &[
        Method::PatchCreate,
        Method::PatchOpen,
        Method::PatchSave,
        Method::PatchClose,
        Method::ObjectCreate,
        Method::ObjectDelete,
        Method::ObjectMove,
        Method::ObjectConnect,
        Method::ObjectDisconnect,
        Method::ParamSet,
        Method::ParamGet,
        Method::ParamWatch,
        Method::ParamUnwatch,
        Method::StateSync,
        Method::StateDiff,
        Method::SessionStart,
        Method::SessionEnd,
        Method::SessionSave,
        Method::SessionLoad,
        Method::SystemInit,
        Method::SystemShutdown,
        Method::SystemStatus,
        Method::SystemPing,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PatchCreate => "patch.create",
            Self::PatchOpen => "patch.open",
            Self::PatchSave => "patch.save",
            Self::PatchClose => "patch.close",
            Self::ObjectCreate => "object.create",
            Self::ObjectDelete => "object.delete",
            Self::ObjectMove => "object.move",
            Self::ObjectConnect => "object.connect",
            Self::ObjectDisconnect => "object.disconnect",
            Self::ParamSet => "param.set",
            Self::ParamGet => "param.get",
            Self::ParamWatch => "param.watch",
            Self::ParamUnwatch => "param.unwatch",
            Self::StateSync => "state.sync",
            Self::StateDiff => "state.diff",
            Self::SessionStart => "session.start",
            Self::SessionEnd => "session.end",
            Self::SessionSave => "session.save",
            Self::SessionLoad => "session.load",
            Self::SystemInit => "system.init",
            Self::SystemShutdown => "system.shutdown",
            Self::SystemStatus => "system.status",
            Self::SystemPing => "system.ping",
        }
    }

    /// Per-method timeout override, in ms; `None` means use the Lifecycle
    /// Manager's default (10 000 ms).
    pub const fn timeout_override_ms(self) -> Option<u64> {
        match self {
            Self::SystemPing => Some(2_000),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

#[cfg(test)]
#[path = "methods_tests.rs"]
mod tests;
