//! Development tasks for the battle workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{ReadSession, Simulate};
use tracing_subscriber::EnvFilter;

/// Development tasks for the battle workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the battle runtime", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a bot-vs-bot battle on the runtime and print every round
    Simulate(Simulate),

    /// Read and inspect a persisted session record
    ReadSession(ReadSession),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG, ROUND_TIMEOUT_SECS, ...)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::ReadSession(cmd) => cmd.execute(),
    }
}
