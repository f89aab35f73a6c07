//! Interactive chat REPL for koyomi.
//!
//! Provides a multi-turn conversation loop using [`rustyline`] for readline
//! support (history, line editing). The full conversation history is sent
//! with each request so the model maintains context across turns; only the
//! user text and the final assistant text are kept — intermediate tool
//! traffic stays inside each [`agent_loop`](crate::agent::agent_loop) call.

mod commands;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

use crate::agent;
use crate::config::Config;
use crate::logstore::LogStore;
use crate::message::Message;
use crate::output::StdoutRenderer;
use crate::tools::ToolRegistry;

/// Runs the interactive chat REPL.
///
/// # Readline behavior
///
/// - **Ctrl+C**: cancels current input, stays in REPL
/// - **Ctrl+D**: exits cleanly with "再见，老大。"
/// - Readline history is persisted to the cache dir
pub async fn run_chat(config: Config) -> Result<()> {
    let backend = crate::cli::backend_from_config(&config)?;
    let store = Arc::new(LogStore::new(config.log_dir()?));
    let tools = ToolRegistry::with_builtins(Arc::clone(&store));

    println!(
        "{} [model: {}] (Ctrl+D to exit)",
        "koyomi".bold().cyan(),
        config.model().yellow(),
    );
    println!();

    // Set up readline with persistent history
    let mut rl = DefaultEditor::new()?;
    let history_path = Config::cache_dir()?.join(crate::constants::HISTORY_FILENAME);
    if history_path.exists() {
        let _ = rl.load_history(&history_path);
    }

    let mut history: Vec<Message> = Vec::new();

    loop {
        let readline = rl.readline(&format!("{} ", ">".green().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }

                // Slash commands
                if line.starts_with('/') {
                    match commands::handle_slash_command(&line, &mut history, &store)? {
                        commands::CommandAction::Continue => continue,
                        commands::CommandAction::Quit => break,
                        commands::CommandAction::Unknown(cmd) => {
                            println!("{} Unknown command: {}", "?".yellow(), cmd);
                            continue;
                        }
                    }
                }

                let _ = rl.add_history_entry(&line);
                println!();

                let mut renderer = StdoutRenderer::new();
                let outcome =
                    agent::agent_loop(&backend, &history, &line, &tools, &mut renderer).await;

                if outcome.log_written {
                    println!("{}", "📝 日志已更新".dimmed());
                }
                println!();

                history.push(Message::user(line));
                history.push(Message::assistant(outcome.content));
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "再见，老大。".dimmed());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                break;
            }
        }
    }

    // Save readline history
    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.save_history(&history_path);

    Ok(())
}
