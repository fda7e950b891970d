// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! L2 protocol for assistant-channel communication.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload, one
//! JSON-RPC-like frame per message.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod dto;
mod frame;
mod framing;
mod methods;

pub use dto::{
    ConnectionSummary, ObjectSummary, ParameterDto, PatchSummary, SessionSummary, StatusSummary,
};
pub use frame::{Frame, FrameId, FrameShapeError, RpcError, RpcNotification, RpcRequest, RpcResponse};
pub use framing::{
    decode, encode, read_frame, read_message, write_frame, write_message, ProtocolError,
    MAX_FRAME_LEN,
};
pub use methods::{Method, UnknownMethod};
