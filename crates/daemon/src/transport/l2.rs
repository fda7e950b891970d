// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! L2 (assistant-channel) transport: length-prefixed JSON frames over
//! stdio or a socket, behind a common trait so the connection loop below
//! doesn't care which. One reader task classifies inbound frames and
//! dispatches requests through the `Bridge`; one writer task drains a
//! bounded outbound channel, giving back-pressure to anything producing
//! notifications faster than the peer can read them.

use std::sync::Arc;

use bridge_wire::{Frame, FrameShapeError, Method, ProtocolError, RpcResponse};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::bridge::Bridge;

/// Outbound frames queued faster than the peer drains them block the
/// producer rather than buffering unboundedly.
const OUTBOUND_CAPACITY: usize = 256;

/// A handle for pushing outbound frames (responses, notifications) onto
/// an L2 connection's write side.
#[derive(Clone)]
pub struct L2Sink {
    tx: mpsc::Sender<Frame>,
}

impl L2Sink {
    pub async fn send(&self, frame: Frame) {
        if self.tx.send(frame).await.is_err() {
            debug!("L2 sink dropped: writer task has exited");
        }
    }
}

pub struct L2Transport;

impl L2Transport {
    /// Run one L2 connection to completion: read frames until EOF or a
    /// protocol error, dispatching requests through `bridge` and replying
    /// on the writer task. Returns the sink so callers (e.g. the
    /// parameter-sync flush loop) can push notifications on the same
    /// connection.
    pub async fn run<R, W>(reader: R, writer: W, bridge: Arc<Bridge>) -> (L2Sink, tokio::task::JoinHandle<()>)
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(OUTBOUND_CAPACITY);
        let sink = L2Sink { tx: tx.clone() };
        let writer_task = tokio::spawn(write_loop(writer, rx));
        let read_sink = sink.clone();
        tokio::spawn(async move {
            if let Err(e) = read_loop(reader, bridge, read_sink).await {
                warn!(error = %e, "L2 read loop exited");
            }
        });
        (sink, writer_task)
    }
}

async fn write_loop<W: AsyncWrite + Unpin>(mut writer: W, mut rx: mpsc::Receiver<Frame>) {
    while let Some(frame) = rx.recv().await {
        if let Err(e) = bridge_wire::write_frame(&mut writer, &frame).await {
            error!(error = %e, "L2 write failed, closing connection");
            return;
        }
    }
}

async fn read_loop<R: AsyncRead + Unpin>(
    mut reader: R,
    bridge: Arc<Bridge>,
    sink: L2Sink,
) -> Result<(), ProtocolError> {
    loop {
        let payload = match bridge_wire::read_message(&mut reader).await {
            Ok(p) => p,
            Err(ProtocolError::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(e) => return Err(e),
        };
        let value: serde_json::Value = bridge_wire::decode(&payload)?;
        let frame = match Frame::from_value(value) {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, "malformed L2 frame");
                continue;
            }
        };
        handle_frame(frame, &bridge, &sink).await;
    }
}

async fn handle_frame(frame: Frame, bridge: &Arc<Bridge>, sink: &L2Sink) {
    match frame {
        Frame::Request(req) => {
            let response = dispatch_request(bridge, req).await;
            sink.send(Frame::Response(response)).await;
        }
        Frame::Notification(note) => {
            debug!(method = %note.method, "ignoring inbound L2 notification");
        }
        Frame::Response(_) => {
            debug!("ignoring unsolicited L2 response frame");
        }
    }
}

async fn dispatch_request(bridge: &Arc<Bridge>, req: bridge_wire::RpcRequest) -> RpcResponse {
    let id = req.id.clone();
    match req.method.parse::<Method>() {
        Ok(method) => match bridge.handle_request(method, req.params) {
            Ok(result) => RpcResponse::ok(id, result),
            Err(e) => RpcResponse::err(id, (&e).into()),
        },
        Err(e) => RpcResponse::err(id, crate::error::DaemonError::UnknownMethod(e.to_string()).into()),
    }
}

#[allow(dead_code)]
fn _silence_unused_frame_shape_error(_: FrameShapeError) {}

#[cfg(test)]
#[path = "l2_tests.rs"]
mod tests;
