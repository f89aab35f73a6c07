//! Output rendering abstraction for koyomi.
//!
//! Defines the [`Renderer`] trait that decouples the agent loop from the
//! display layer: content fragments, tool events, and errors are pushed
//! through it in arrival order. [`StdoutRenderer`] prints to the terminal;
//! tests substitute collecting renderers.

use colored::Colorize;
use std::io::{self, Write};

/// Write-only sink for one conversation turn's output.
pub trait Renderer {
    /// Render a single content fragment as it arrives.
    fn render_token(&mut self, token: &str);

    /// Called when the model requests a tool, before it runs.
    fn tool_start(&mut self, name: &str, arguments: &str);

    /// Called with a tool's result text once it has run.
    fn tool_result(&mut self, name: &str, result: &str);

    /// Called when the full response is complete.
    fn render_done(&mut self);

    /// Called when an error occurs during the turn.
    fn render_error(&mut self, err: &str);
}

/// Renders streaming output directly to stdout.
///
/// Each fragment is printed immediately with an explicit flush so the user
/// sees a "typing" effect; tool activity is shown dimmed between fragments.
pub struct StdoutRenderer {
    printed_anything: bool,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self {
            printed_anything: false,
        }
    }
}

impl Renderer for StdoutRenderer {
    fn render_token(&mut self, token: &str) {
        print!("{}", token);
        // Flush immediately so each fragment appears as it arrives
        io::stdout().flush().ok();
        self.printed_anything = true;
    }

    fn tool_start(&mut self, name: &str, arguments: &str) {
        if self.printed_anything {
            println!();
            self.printed_anything = false;
        }
        println!("{}", format!("🔧 {} {}", name, arguments).dimmed());
    }

    fn tool_result(&mut self, name: &str, result: &str) {
        // Single-line summary; full results go back to the model, not the user.
        let first_line = result.lines().next().unwrap_or("");
        println!("{}", format!("✅ {}: {}", name, first_line).dimmed());
    }

    fn render_done(&mut self) {
        println!();
    }

    fn render_error(&mut self, err: &str) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), err);
    }
}
