// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::bridge::Bridge;
use bridge_core::{AnyClock, FakeClock};
use bridge_wire::{FrameId, RpcRequest};
use tokio::io::duplex;

fn bridge() -> Arc<Bridge> {
    Arc::new(Bridge::new(AnyClock::fake(FakeClock::new()), std::env::temp_dir().join("l2_test_state.json")))
}

#[tokio::test]
async fn a_valid_request_round_trips_to_a_response() {
    let (client, server) = duplex(4096);
    let (server_read, server_write) = tokio::io::split(server);
    let (client_read, mut client_write) = tokio::io::split(client);

    let bridge = bridge();
    let (_sink, _writer_task) = L2Transport::run(server_read, server_write, bridge).await;

    let request = RpcRequest {
        method: "system.ping".to_string(),
        params: serde_json::json!({}),
        id: FrameId::Number(1),
    };
    bridge_wire::write_frame(&mut client_write, &request).await.expect("write request");

    let mut client_read = client_read;
    let response: RpcResponse = bridge_wire::read_frame(&mut client_read).await.expect("read response");
    assert_eq!(response.id, FrameId::Number(1));
    assert!(response.is_ok());
}

#[tokio::test]
async fn an_unknown_method_yields_an_error_response() {
    let (client, server) = duplex(4096);
    let (server_read, server_write) = tokio::io::split(server);
    let (client_read, mut client_write) = tokio::io::split(client);

    let bridge = bridge();
    let (_sink, _writer_task) = L2Transport::run(server_read, server_write, bridge).await;

    let request = RpcRequest {
        method: "not.a.method".to_string(),
        params: serde_json::json!({}),
        id: FrameId::Number(2),
    };
    bridge_wire::write_frame(&mut client_write, &request).await.expect("write request");

    let mut client_read = client_read;
    let response: RpcResponse = bridge_wire::read_frame(&mut client_read).await.expect("read response");
    assert!(!response.is_ok());
}
