// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bridged`: the bridge daemon binary. Owns the L1 (host-bus) and L2
//! (assistant-channel) transports and the background tasks that drive
//! parameter-sync flushing, request-timeout reaping, and crash recovery.
//!
//! L2's stdio mode writes the wire protocol to stdout, so logs are never
//! written there: they go to a rolling file via `tracing-appender`.

use std::sync::Arc;

use bridge_core::AnyClock;
use bridge_daemon::bridge::Bridge;
use bridge_daemon::env;
use bridge_daemon::transport::{L1Transport, L2Transport};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _log_guard = init_tracing();
    info!("bridged starting up");

    let bridge = Arc::new(Bridge::new(AnyClock::system(), env::state_path()));
    restore_side_store(&bridge);

    let param_sync_task = spawn_param_sync_loop(Arc::clone(&bridge));
    let reap_task = spawn_reap_loop(Arc::clone(&bridge));
    let l1_task = spawn_l1_loop(Arc::clone(&bridge));
    let l2_result = run_l2(Arc::clone(&bridge)).await;

    if let Err(e) = l2_result {
        error!(error = %e, "L2 transport exited with an error");
    }

    param_sync_task.abort();
    reap_task.abort();
    l1_task.abort();
    info!("bridged shutting down");
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = env::state_path()
        .parent()
        .map(std::path::Path::to_path_buf)
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let file_appender = tracing_appender::rolling::daily(log_dir, "bridged.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let default_level = if env::debug() { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    guard
}

fn restore_side_store(bridge: &Bridge) {
    match bridge.recovery.lock().load() {
        Ok(Some(store)) => info!(
            last_sync_id = store.last_sync_id,
            connection_status = %store.connection_status,
            "resumed from side-store"
        ),
        Ok(None) => info!("no side-store found, starting fresh"),
        Err(e) => error!(error = %e, "failed to load side-store, starting fresh"),
    }
}

fn spawn_param_sync_loop(bridge: Arc<Bridge>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(env::param_sync_batch_window());
        loop {
            ticker.tick().await;
            let result = bridge.router.param_sync().flush_with(|_batch| {
                // L2 notification delivery is wired in `transport::l2`; the
                // flush loop here only drains on the timer.
                Ok(())
            });
            if let Err(failure) = result {
                error!(
                    reason = %failure.reason,
                    watches = failure.keys.len(),
                    "param sync batch exhausted its retries, marking watches unhealthy"
                );
                for (object_id, name) in &failure.keys {
                    bridge.mirror.raise_sync_failed(*object_id, name, &failure.reason);
                }
            }
        }
    })
}

fn spawn_reap_loop(bridge: Arc<Bridge>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(env::request_grace_window());
        loop {
            ticker.tick().await;
            for id in bridge.requests.reap_timeouts() {
                info!(request_id = %id, "request timed out");
            }
            bridge.requests.reap_grace_window();
        }
    })
}

fn spawn_l1_loop(bridge: Arc<Bridge>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let transport = match L1Transport::bind().await {
            Ok(t) => t,
            Err(e) => {
                error!(error = %e, "failed to bind L1 transport");
                return;
            }
        };
        info!(port = transport.bound_port, "L1 transport bound");
        bridge.set_l1_connected(true);
        loop {
            if let Err(e) = transport.recv_one(&bridge).await {
                error!(error = %e, "L1 recv error");
            }
        }
    })
}

async fn run_l2(bridge: Arc<Bridge>) -> std::io::Result<()> {
    bridge.set_l2_connected(true);
    match env::l2_mode() {
        env::L2Mode::Stdio => {
            let (_sink, writer_task) =
                L2Transport::run(tokio::io::stdin(), tokio::io::stdout(), bridge).await;
            let _ = writer_task.await;
            Ok(())
        }
        env::L2Mode::Socket => {
            let port = env::l2_port().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "BRIDGE_L2_PORT is required in socket mode")
            })?;
            let listener = tokio::net::TcpListener::bind((env::host(), port)).await?;
            info!(port, "L2 socket transport listening");
            loop {
                let (stream, peer) = listener.accept().await?;
                info!(%peer, "L2 connection accepted");
                let (reader, writer) = stream.into_split();
                let bridge = Arc::clone(&bridge);
                tokio::spawn(async move {
                    let (_sink, writer_task) = L2Transport::run(reader, writer, bridge).await;
                    let _ = writer_task.await;
                });
            }
        }
    }
}

