// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aj: schedule agent workflows on the host's native scheduler.

mod commands;
mod exit_error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_error::ExitError;

#[derive(Parser)]
#[command(
    name = "aj",
    version,
    about = "Schedule agent workflow runs via the host's native scheduler",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Schedule a new agent job
    Add(commands::AddArgs),
    /// List scheduled jobs (scheduler entries merged with metadata)
    List(commands::ListArgs),
    /// Remove a job by name or description
    Remove(commands::RemoveArgs),
    /// Report scheduler service health and list jobs
    Status(commands::StatusArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Add(args) => commands::add(args).await,
        Command::List(args) => commands::list(args).await,
        Command::Remove(args) => commands::remove(args).await,
        Command::Status(args) => commands::status(args).await,
    };

    if let Err(err) = result {
        let code = match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("error: {}", exit.message);
                exit.code
            }
            None => {
                eprintln!("error: {:#}", err);
                1
            }
        };
        std::process::exit(code);
    }
}
