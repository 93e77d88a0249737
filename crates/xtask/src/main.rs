//! Development tasks for the arena client
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Clean, Reconcile, TailLogs};

/// Development tasks for the arena client
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the arena client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Monitor client logs in real-time
    TailLogs(TailLogs),

    /// Delete client logs
    Clean(Clean),

    /// Diff two combat snapshots and print the detected events
    Reconcile(Reconcile),
}

fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Command::TailLogs(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
        Command::Reconcile(cmd) => cmd.execute(),
    }
}
