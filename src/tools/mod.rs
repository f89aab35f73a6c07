//! Tool catalogue and execution gateway.
//!
//! Every action the model may take against log storage is a [`Tool`]:
//! a name, a description, a JSON-Schema parameter block, and an async
//! handler. [`ToolRegistry`] owns the fixed catalogue and dispatches
//! [`ToolCall`]s by name.
//!
//! Dispatch never fails toward the agent loop: unknown names, undecodable
//! argument text, and handler errors all come back as the tool's textual
//! result so the model can read them and react. Only the `wrote_log` bit
//! escapes as structured data — it drives the caller's "refresh the file
//! listing" state.

pub mod create_log;
pub mod edit_log;
pub mod read_log;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::logstore::LogStore;
use crate::message::ToolCall;

use create_log::CreateLogTool;
use edit_log::EditLogTool;
use read_log::ReadLogTool;

/// The result of executing a tool handler.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: String) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(content: String) -> Self {
        Self {
            content,
            is_error: true,
        }
    }
}

/// Catalogue entry sent to the LLM so it knows what tools are available.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool's arguments.
    pub parameters: Value,
}

/// One dispatched call's outcome, matched back by `tool_call_id`.
#[derive(Debug, Clone)]
pub struct ToolReply {
    pub tool_call_id: String,
    pub name: String,
    pub content: String,
    /// True only when a persistence-class tool completed without error.
    pub wrote_log: bool,
}

/// Every tool implements this trait.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the LLM uses to call this tool.
    fn name(&self) -> &str;

    /// Human-readable description for the catalogue.
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's input parameters.
    fn schema(&self) -> Value;

    /// Whether a successful run counts as a durable log write.
    fn writes_log(&self) -> bool {
        false
    }

    /// Execute the tool with the given JSON input.
    async fn execute(&self, input: Value) -> Result<ToolResult>;
}

/// Holds the fixed tool set and dispatches calls by name.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Called during startup.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(Arc::from(tool));
    }

    /// Create a registry with the three log tools sharing one store.
    pub fn with_builtins(store: Arc<LogStore>) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ReadLogTool::new(Arc::clone(&store))));
        registry.register(Box::new(CreateLogTool::new(Arc::clone(&store))));
        registry.register(Box::new(EditLogTool::new(store)));
        registry
    }

    /// Produce catalogue definitions for the LLM (sent with every request).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.schema(),
            })
            .collect()
    }

    /// Executes one call, absorbing every failure into the result text.
    ///
    /// Calls within a round are independent (each targets its own path),
    /// so the agent loop may run several `dispatch` futures concurrently;
    /// replies carry the originating `tool_call_id` for matching.
    pub async fn dispatch(&self, call: &ToolCall) -> ToolReply {
        let reply = |content: String, wrote_log: bool| ToolReply {
            tool_call_id: call.id.clone(),
            name: call.name.clone(),
            content,
            wrote_log,
        };

        let Some(tool) = self.tools.iter().find(|t| t.name() == call.name) else {
            return reply(format!("未知工具：{}", call.name), false);
        };

        // Models occasionally emit zero-length argument payloads for
        // no-argument intents; treat those as an empty object.
        let raw = if call.arguments.trim().is_empty() {
            "{}"
        } else {
            call.arguments.as_str()
        };
        let input: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                return reply(format!("错误：工具 {} 的参数不是有效的 JSON：{}", call.name, e), false)
            }
        };

        match tool.execute(input).await {
            Ok(result) => {
                let wrote_log = tool.writes_log() && !result.is_error;
                reply(result.content, wrote_log)
            }
            Err(e) => reply(format!("执行工具时出错：{}", e), false),
        }
    }

    /// How many tools are registered.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

#[cfg(test)]
mod tests;
