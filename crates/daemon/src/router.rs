// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Router/Dispatcher: the L1 address-pattern table and the L2 method
//! table. L1 patterns are matched in registration order and, when more
//! than one pattern matches an inbound address, every match is invoked in
//! that order (rather than stopping at the first hit).

use bridge_core::{ObjectId, ParameterValue};
use bridge_wire::Method;
use globset::{Glob, GlobMatcher};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::DaemonError;
use crate::handlers;
use crate::mirror::Mirror;
use crate::param_sync::ParamSyncEngine;

/// The L1 host-bus address-pattern table. Patterns use glob syntax
/// (`*`, `?`, `[set]`, `{a,b}`) over `/`-delimited addresses.
#[derive(Default)]
pub struct AddressRouter {
    routes: IndexMap<String, GlobMatcher>,
}

impl AddressRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, pattern: &str) -> Result<(), globset::Error> {
        let matcher = Glob::new(pattern)?.compile_matcher();
        self.routes.insert(pattern.to_string(), matcher);
        Ok(())
    }

    /// Every registered pattern that matches `address`, in registration
    /// order.
    pub fn matches(&self, address: &str) -> Vec<&str> {
        self.routes
            .iter()
            .filter(|(_, matcher)| matcher.is_match(address))
            .map(|(pattern, _)| pattern.as_str())
            .collect()
    }
}

/// The L2 method table: dispatches a decoded request to its handler, and
/// owns the parameter-watch registry since `param.watch`/`param.unwatch`
/// mutate it directly rather than the mirror.
pub struct MethodRouter {
    param_sync: ParamSyncEngine,
}

impl Default for MethodRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodRouter {
    pub fn new() -> Self {
        Self {
            param_sync: ParamSyncEngine::new(),
        }
    }

    pub fn param_sync(&self) -> &ParamSyncEngine {
        &self.param_sync
    }

    pub fn dispatch(&self, mirror: &Mirror, method: Method, params: Value) -> Result<Value, DaemonError> {
        match method {
            Method::ParamWatch => self.watch(params),
            Method::ParamUnwatch => self.unwatch(params),
            Method::ParamSet => self.set_and_sync(mirror, params),
            other => handlers::dispatch(mirror, other, params),
        }
    }

    /// `param.set` over L2 both commits the change to the Mirror and, if a
    /// watcher is registered for it, feeds the Parameter Sync Engine so the
    /// next flush notifies subscribers. L1-originated updates take the same
    /// path through `transport::l1::dispatch`.
    fn set_and_sync(&self, mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct P {
            object_id: String,
            name: String,
            value: ParameterValue,
        }
        let p: P = serde_json::from_value(params.clone())
            .map_err(|e| handlers::bad_args("param.set", e.to_string()))?;
        let result = handlers::dispatch(mirror, Method::ParamSet, params)?;
        self.param_sync.enqueue(ObjectId::from_string(&p.object_id), p.name, p.value);
        Ok(result)
    }

    fn watch(&self, params: Value) -> Result<Value, DaemonError> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct P {
            object_id: String,
            name: String,
        }
        let p: P = serde_json::from_value(params)
            .map_err(|e| handlers::bad_args("param.watch", e.to_string()))?;
        self.param_sync.watch(ObjectId::from_string(&p.object_id), p.name);
        Ok(serde_json::json!({"ok": true}))
    }

    fn unwatch(&self, params: Value) -> Result<Value, DaemonError> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct P {
            object_id: String,
            name: String,
        }
        let p: P = serde_json::from_value(params)
            .map_err(|e| handlers::bad_args("param.unwatch", e.to_string()))?;
        self.param_sync.unwatch(ObjectId::from_string(&p.object_id), &p.name);
        Ok(serde_json::json!({"ok": true}))
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
