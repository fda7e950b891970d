// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bridge-core: entity data model, ids, clock, event/diff types, and the
//! fault taxonomy shared by every other bridge crate.

pub mod macros;

pub mod clock;
pub mod connection;
pub mod error;
pub mod event;
pub mod id;
pub mod object;
pub mod parameter;
pub mod patch;
pub mod request;
pub mod session;
pub mod snapshot;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{AnyClock, Clock, FakeClock, SystemClock};
pub use connection::{Connection, ConnectionId};
pub use error::{BridgeError, ErrorCode};
pub use event::{StateCategory, StateDiff, StateEvent, StateEventKind};
pub use id::{short, IdBuf};
pub use object::{Object, ObjectId, ObjectKind, Position, Size};
pub use parameter::{Parameter, ParameterId, ParameterType, ParameterValue};
pub use patch::{Patch, PatchId, PatchStatus};
pub use request::{RequestId, RequestRecord, RequestStatus};
pub use session::{Session, SessionId, SessionStatus};
pub use snapshot::{Snapshot, SnapshotId};
