// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subcommand implementations. Each returns `Result<(), ExitError>` so
//! `main` has a single call site for `std::process::exit`.

pub mod export_schema;
pub mod run;
pub mod verify;
