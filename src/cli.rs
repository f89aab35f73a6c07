//! Command-line interface definition and dispatch for koyomi.
//!
//! Uses [`clap`] for argument parsing with derive macros. `chat` and `ask`
//! drive the agent loop; `logs` inspects the stored daily logs directly,
//! without involving the model.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;

use crate::agent;
use crate::config::Config;
use crate::logstore::{LogStore, ReadOutcome};
use crate::output::StdoutRenderer;
use crate::provider::DeepSeekClient;
use crate::tools::ToolRegistry;

/// Top-level CLI structure for koyomi.
#[derive(Parser)]
#[command(name = "koyomi", about = "A tool-calling assistant that keeps dated activity logs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the koyomi CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by
/// clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,
    /// Send a single message and exit
    Ask {
        /// The message to send
        message: Vec<String>,
    },
    /// Inspect stored daily logs
    Logs {
        #[command(subcommand)]
        action: LogsAction,
    },
}

/// Subcommands for the `logs` command.
#[derive(Subcommand)]
pub enum LogsAction {
    /// List all logs, newest first
    List,
    /// Print one day's log
    Show {
        /// Date key, e.g. 2025-07-01
        date: NaiveDate,
    },
}

/// Parses command-line arguments into a [`Cli`] struct.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Chat => {
            let config = Config::load()?;
            crate::chat::run_chat(config).await
        }
        Commands::Ask { message } => {
            let message = message.join(" ");
            if message.trim().is_empty() {
                anyhow::bail!("Nothing to ask");
            }
            let config = Config::load()?;
            let backend = backend_from_config(&config)?;
            let store = Arc::new(LogStore::new(config.log_dir()?));
            let tools = ToolRegistry::with_builtins(store);
            let mut renderer = StdoutRenderer::new();

            let outcome =
                agent::agent_loop(&backend, &[], &message, &tools, &mut renderer).await;
            if outcome.log_written {
                println!("{}", "📝 日志已更新".dimmed());
            }
            Ok(())
        }
        Commands::Logs { action } => {
            let config = Config::load()?;
            let store = LogStore::new(config.log_dir()?);
            match action {
                LogsAction::List => {
                    let entries = store.list()?;
                    if entries.is_empty() {
                        println!("{}", "No logs yet.".dimmed());
                        return Ok(());
                    }
                    let mut current_month = String::new();
                    for entry in entries {
                        let month = entry.date.format("%Y/%m").to_string();
                        if month != current_month {
                            println!("{}", month.bold().cyan());
                            current_month = month;
                        }
                        println!("  {}", entry.date.format("%Y-%m-%d"));
                    }
                    Ok(())
                }
                LogsAction::Show { date } => {
                    match store.read(date)? {
                        ReadOutcome::Found(content) => println!("{}", content),
                        ReadOutcome::NotFound => {
                            println!("{}", format!("No log for {}.", date).dimmed())
                        }
                    }
                    Ok(())
                }
            }
        }
    }
}

/// Builds the completions backend from the loaded config.
pub fn backend_from_config(config: &Config) -> Result<DeepSeekClient> {
    let api_key = config.resolve_api_key()?;
    Ok(DeepSeekClient::new(
        api_key,
        config.base_url(),
        config.model(),
        config.streaming(),
    ))
}
