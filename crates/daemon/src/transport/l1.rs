// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! L1 (host-bus) transport: UDP datagrams to and from the host patcher.
//! Each inbound datagram is a JSON-encoded [`HostLifecycleEvent`] or a raw
//! address/value pair; addresses are matched against the `AddressRouter`
//! before being handed to the mirror, so a datagram for an address nobody
//! registered is dropped rather than silently misapplied.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use bridge_core::{ObjectId, ParameterValue};
use serde::{Deserialize, Serialize};
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use crate::bridge::Bridge;
use crate::env;
use crate::host_lifecycle::{self, HostLifecycleEvent};
use crate::mirror::MutationOp;

const DATAGRAM_BUF_LEN: usize = 64 * 1024;

/// An inbound L1 datagram: an address the host bus published on plus its
/// JSON payload. `HostLifecycleEvent`s arrive on a reserved address; every
/// other address is a raw parameter/object update routed by pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L1Datagram {
    pub address: String,
    pub payload: serde_json::Value,
}

const LIFECYCLE_ADDRESS: &str = "/bridge/lifecycle";

/// Payload shape for a non-lifecycle L1 datagram: a parameter update on a
/// specific object.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ParamUpdatePayload {
    object_id: ObjectId,
    name: String,
    value: ParameterValue,
}

pub struct L1Transport {
    socket: UdpSocket,
    out_addr: SocketAddr,
    pub bound_port: u16,
}

impl L1Transport {
    /// Bind the inbound socket, retrying across the dynamic port range on
    /// `AddrInUse` if `dynamicPorts` is enabled. Returns the transport and,
    /// when a fallback port was used, the port that was actually bound so
    /// the caller can emit a `PortReassigned` notification to the host.
    pub async fn bind() -> std::io::Result<Self> {
        let host = env::host();
        let out_addr = SocketAddr::new(host, env::l1_out_port());
        match UdpSocket::bind(SocketAddr::new(host, env::l1_in_port())).await {
            Ok(socket) => Ok(Self {
                bound_port: socket.local_addr()?.port(),
                socket,
                out_addr,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse && env::dynamic_ports() => {
                Self::bind_dynamic(host, out_addr).await
            }
            Err(e) => Err(e),
        }
    }

    async fn bind_dynamic(host: IpAddr, out_addr: SocketAddr) -> std::io::Result<Self> {
        for port in env::DYNAMIC_PORT_RANGE {
            match UdpSocket::bind(SocketAddr::new(host, port)).await {
                Ok(socket) => {
                    info!(port, "L1 port reassigned after bind conflict");
                    return Ok(Self {
                        bound_port: port,
                        socket,
                        out_addr,
                    });
                }
                Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => continue,
                Err(e) => return Err(e),
            }
        }
        Err(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "exhausted dynamic port range",
        ))
    }

    /// Receive and dispatch one datagram. Lifecycle events are applied to
    /// the mirror directly; everything else is matched against the
    /// address router and, if matched, applied as a parameter update.
    pub async fn recv_one(&self, bridge: &Arc<Bridge>) -> std::io::Result<()> {
        let mut buf = vec![0u8; DATAGRAM_BUF_LEN];
        let (len, _peer) = self.socket.recv_from(&mut buf).await?;
        let datagram: L1Datagram = match serde_json::from_slice(&buf[..len]) {
            Ok(d) => d,
            Err(e) => {
                warn!(error = %e, "malformed L1 datagram");
                return Ok(());
            }
        };
        self.dispatch(bridge, datagram);
        Ok(())
    }

    fn dispatch(&self, bridge: &Arc<Bridge>, datagram: L1Datagram) {
        if datagram.address == LIFECYCLE_ADDRESS {
            match serde_json::from_value::<HostLifecycleEvent>(datagram.payload) {
                Ok(event) => {
                    if let Err(e) = host_lifecycle::handle(&bridge.mirror, event) {
                        warn!(error = %e, "host lifecycle event rejected");
                    }
                }
                Err(e) => warn!(error = %e, "malformed host lifecycle payload"),
            }
            return;
        }
        let matched = bridge.addresses.lock().matches(&datagram.address).len();
        if matched == 0 {
            debug!(address = %datagram.address, "no route registered for L1 address");
            return;
        }
        let update: ParamUpdatePayload = match serde_json::from_value(datagram.payload) {
            Ok(u) => u,
            Err(e) => {
                warn!(error = %e, address = %datagram.address, "malformed parameter update payload");
                return;
            }
        };
        let op = MutationOp::SetParam {
            object_id: update.object_id,
            name: update.name.clone(),
            value: update.value.clone(),
        };
        match bridge.mirror.mutate(vec![op]) {
            Ok(_) => {
                bridge
                    .router
                    .param_sync()
                    .enqueue(update.object_id, update.name, update.value);
            }
            Err(e) => warn!(error = %e, "L1 parameter update rejected"),
        }
    }

    /// Send a datagram out to the host bus.
    pub async fn send(&self, datagram: &L1Datagram) -> std::io::Result<()> {
        let bytes = serde_json::to_vec(datagram)?;
        self.socket.send_to(&bytes, self.out_addr).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "l1_tests.rs"]
mod tests;
