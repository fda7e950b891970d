// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn host_defaults_to_loopback() {
    std::env::remove_var("BRIDGE_HOST");
    assert_eq!(host(), IpAddr::from([127, 0, 0, 1]));
}

#[test]
#[serial]
fn host_reads_env_override() {
    std::env::set_var("BRIDGE_HOST", "0.0.0.0");
    assert_eq!(host(), IpAddr::from([0, 0, 0, 0]));
    std::env::remove_var("BRIDGE_HOST");
}

#[test]
#[serial]
fn l1_ports_default_per_spec() {
    std::env::remove_var("BRIDGE_L1_IN");
    std::env::remove_var("BRIDGE_L1_OUT");
    assert_eq!(l1_in_port(), 7500);
    assert_eq!(l1_out_port(), 7400);
}

#[test]
#[serial]
fn l2_mode_defaults_to_stdio() {
    std::env::remove_var("BRIDGE_L2_MODE");
    assert_eq!(l2_mode(), L2Mode::Stdio);
}

#[test]
#[serial]
fn l2_mode_reads_socket_override() {
    std::env::set_var("BRIDGE_L2_MODE", "socket");
    assert_eq!(l2_mode(), L2Mode::Socket);
    std::env::remove_var("BRIDGE_L2_MODE");
}

#[test]
#[serial]
fn access_level_defaults_to_full() {
    std::env::remove_var("BRIDGE_ACCESS_LEVEL");
    assert_eq!(access_level(), AccessLevel::Full);
}

#[test]
#[serial]
fn access_level_reads_readonly_override() {
    std::env::set_var("BRIDGE_ACCESS_LEVEL", "readonly");
    assert_eq!(access_level(), AccessLevel::ReadOnly);
    std::env::remove_var("BRIDGE_ACCESS_LEVEL");
}

#[test]
fn timeouts_and_batch_defaults_match_spec() {
    assert_eq!(default_request_timeout(), Duration::from_millis(10_000));
    assert_eq!(param_sync_batch_window(), Duration::from_millis(50));
    assert_eq!(param_sync_batch_cap(), 10);
    assert_eq!(param_sync_max_attempts(), 3);
    assert_eq!(reconnect_base_delay(), Duration::from_millis(2_000));
    assert_eq!(reconnect_attempt_cap(), 5);
}
