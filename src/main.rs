//! Entry point for koyomi, a tool-calling assistant that keeps dated
//! activity logs from the terminal.
//!
//! This binary loads environment variables, parses CLI arguments via
//! [`cli`], and dispatches to the appropriate subcommand handler.

mod accumulator;
mod agent;
mod chat;
mod cli;
mod config;
mod constants;
mod logstore;
mod message;
mod output;
mod prompt;
mod provider;
mod tools;

use anyhow::Result;

/// Runs the koyomi CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, and dispatches the chosen
/// subcommand via [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    cli::run(cli).await
}
