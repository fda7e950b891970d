// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// `BRIDGE_HOST` — loopback interface L1 binds to. Default `127.0.0.1`.
pub fn host() -> IpAddr {
    std::env::var("BRIDGE_HOST")
        .ok()
        .and_then(|s| IpAddr::from_str(&s).ok())
        .unwrap_or_else(|| IpAddr::from([127, 0, 0, 1]))
}

/// `BRIDGE_L1_IN` — port the bridge receives host-bus datagrams on. Default 7500.
pub fn l1_in_port() -> u16 {
    std::env::var("BRIDGE_L1_IN")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(7500)
}

/// `BRIDGE_L1_OUT` — port the bridge sends host-bus datagrams to. Default 7400.
pub fn l1_out_port() -> u16 {
    std::env::var("BRIDGE_L1_OUT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(7400)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum L2Mode {
    Stdio,
    Socket,
}

/// `BRIDGE_L2_MODE` ∈ {stdio, socket}. Default `stdio`.
pub fn l2_mode() -> L2Mode {
    match std::env::var("BRIDGE_L2_MODE").as_deref() {
        Ok("socket") => L2Mode::Socket,
        _ => L2Mode::Stdio,
    }
}

/// `BRIDGE_L2_PORT` — required when `l2_mode() == Socket`.
pub fn l2_port() -> Option<u16> {
    std::env::var("BRIDGE_L2_PORT").ok().and_then(|s| s.parse().ok())
}

/// `BRIDGE_STATE_PATH` — side-store path for crash recovery. Default `./bridge_state.json`.
pub fn state_path() -> PathBuf {
    std::env::var("BRIDGE_STATE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./bridge_state.json"))
}

/// `BRIDGE_DEBUG` ∈ {true,false}. Raises the default log level to `debug`.
pub fn debug() -> bool {
    std::env::var("BRIDGE_DEBUG")
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Full,
    Restricted,
    ReadOnly,
}

/// `BRIDGE_ACCESS_LEVEL` ∈ {full, restricted, readonly}. Default `full`.
pub fn access_level() -> AccessLevel {
    match std::env::var("BRIDGE_ACCESS_LEVEL").as_deref() {
        Ok("restricted") => AccessLevel::Restricted,
        Ok("readonly") => AccessLevel::ReadOnly,
        _ => AccessLevel::Full,
    }
}

/// Default per-request timeout (10s), overridden per-method by
/// [`bridge_wire::Method::timeout_override_ms`].
pub fn default_request_timeout() -> Duration {
    Duration::from_millis(10_000)
}

/// Grace window terminal requests are retained for before being reaped.
pub fn request_grace_window() -> Duration {
    Duration::from_secs(5)
}

/// Parameter-sync batch window (default 50ms).
pub fn param_sync_batch_window() -> Duration {
    Duration::from_millis(50)
}

/// Parameter-sync batch size cap (default 10 entries per flush).
pub fn param_sync_batch_cap() -> usize {
    10
}

/// Parameter-sync retry attempts before marking a watch unhealthy.
pub fn param_sync_max_attempts() -> u32 {
    3
}

/// Reconnect back-off base delay (default 2000ms).
pub fn reconnect_base_delay() -> Duration {
    Duration::from_millis(2_000)
}

/// Reconnect attempt cap before entering `ConnectionError` (default 5).
pub fn reconnect_attempt_cap() -> u32 {
    5
}

/// Whether `dynamicPorts` is enabled for L1 (scan 49152-65535 on bind conflict).
pub fn dynamic_ports() -> bool {
    std::env::var("BRIDGE_DYNAMIC_PORTS")
        .map(|s| !s.eq_ignore_ascii_case("false"))
        .unwrap_or(true)
}

pub const DYNAMIC_PORT_RANGE: std::ops::RangeInclusive<u16> = 49152..=65535;

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
