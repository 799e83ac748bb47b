// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `bw`: watch and control batch workflow jobs from the terminal.

mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use bw_core::{BatchAction, BatchId};
use clap::{Parser, Subcommand};
use commands::{ApiArgs, WatchArgs};
use exit_error::ExitError;
use output::OutputFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bw", version, about = "Watch and control batch workflow jobs", styles = color::styles())]
struct Cli {
    #[command(flatten)]
    api: ApiArgs,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Follow batches until none of them is pending or processing
    Watch(WatchArgs),
    /// Fetch and print progress once
    Show {
        /// Batch ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Stop a running batch
    Stop { id: String },
    /// Resume a stopped batch
    Resume { id: String },
    /// Rerun a batch from the start
    Retry { id: String },
    /// Rerun only the failed rows of a batch
    RetryFailed { id: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let coordinator = commands::coordinator(&cli.api)?;
    let (id, action) = match cli.command {
        Command::Watch(args) => return commands::watch::handle(&coordinator, args, cli.output).await,
        Command::Show { ids } => return commands::show::handle(&coordinator, ids, cli.output).await,
        Command::Stop { id } => (id, BatchAction::Stop),
        Command::Resume { id } => (id, BatchAction::Resume),
        Command::Retry { id } => (id, BatchAction::Retry),
        Command::RetryFailed { id } => (id, BatchAction::RetryFailed),
    };
    commands::action::handle(&coordinator, BatchId::new(id), action, cli.output).await
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            let message = exit.to_string();
            if !message.is_empty() {
                eprintln!("{message}");
            }
            std::process::exit(exit.code());
        }
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
