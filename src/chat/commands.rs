//! Slash commands for the chat REPL.

use anyhow::Result;
use colored::Colorize;

use crate::logstore::LogStore;
use crate::message::Message;

/// What the REPL should do after a slash command.
pub enum CommandAction {
    /// Command handled; prompt for the next line.
    Continue,
    /// Leave the REPL.
    Quit,
    /// Not a recognized command.
    Unknown(String),
}

/// Handles a line starting with `/`.
pub fn handle_slash_command(
    line: &str,
    history: &mut Vec<Message>,
    store: &LogStore,
) -> Result<CommandAction> {
    match line.split_whitespace().next().unwrap_or("") {
        "/help" => {
            println!("  /logs   list recorded days");
            println!("  /clear  forget this conversation");
            println!("  /quit   exit");
            Ok(CommandAction::Continue)
        }
        "/logs" => {
            let entries = store.list()?;
            if entries.is_empty() {
                println!("{}", "No logs yet.".dimmed());
            }
            for entry in entries {
                println!("  {}", entry.rel_path);
            }
            Ok(CommandAction::Continue)
        }
        "/clear" => {
            history.clear();
            println!("{}", "History cleared.".dimmed());
            Ok(CommandAction::Continue)
        }
        "/quit" | "/exit" => Ok(CommandAction::Quit),
        other => Ok(CommandAction::Unknown(other.to_string())),
    }
}
