// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bridge`: the CLI entry point. Thin wrapper over the daemon library —
//! `run` starts it in the foreground, `verify` and `export-schema` are
//! side-channel utilities that never touch a transport.

mod color;
mod commands;
mod exit_error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "bridge", version = env!("BUILD_GIT_HASH"), styles = color::styles())]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Output format for commands that print a result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Command {
    /// Start the daemon in the foreground (default if no subcommand given).
    Run,
    /// Validate a persisted state snapshot without starting any transport.
    Verify {
        #[arg(long)]
        state: PathBuf,
    },
    /// Print the L2 method catalogue and error-code taxonomy as JSON.
    ExportSchema,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Run);

    let result = match command {
        Command::Run => commands::run::run().await,
        Command::Verify { state } => commands::verify::run(&state, cli.output),
        Command::ExportSchema => commands::export_schema::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e.message);
        std::process::exit(e.code);
    }
}
