//! Backend capability for generative-text completions.
//!
//! The agent loop talks to an opaque [`ChatBackend`]: given the message
//! history and the tool catalogue, produce either textual content or a set
//! of tool calls, optionally as an incremental stream. The default
//! implementation is [`DeepSeekClient`], an OpenAI-compatible
//! chat-completions client; tests substitute scripted backends.

mod client;
mod wire;

pub use client::DeepSeekClient;

use anyhow::Result;
use futures::stream::BoxStream;

use crate::message::{Message, ToolCall};
use crate::tools::ToolDefinition;

/// One partial piece of a streamed tool call.
///
/// `index` is the stable per-invocation key; the other fields carry
/// whatever this fragment happened to include.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallFragment {
    pub index: u32,
    pub id: Option<String>,
    pub name: Option<String>,
    pub arguments_delta: Option<String>,
}

/// One item of a streamed backend turn. The stream ending is the
/// end-of-turn signal.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A fragment of visible assistant text.
    Content(String),
    /// A fragment of a tool call, to be reassembled by the accumulator.
    ToolCall(ToolCallFragment),
}

/// A complete non-streamed backend turn.
#[derive(Debug, Clone)]
pub struct TurnReply {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

/// Stream of turn items produced by [`ChatBackend::converse_stream`].
pub type EventStream = BoxStream<'static, Result<StreamEvent>>;

/// An opaque completion backend.
///
/// Implementations must be usable from concurrent agent-loop calls; all
/// per-conversation state lives in the loop, not the backend.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one turn and streams the reply incrementally.
    ///
    /// # Errors
    ///
    /// Transport, auth, and quota failures — fatal to the current agent
    /// call, which converts them to a fixed apology.
    async fn converse_stream(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<EventStream>;

    /// Sends one turn and returns the fully-formed reply.
    async fn converse(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<TurnReply>;

    /// Whether the agent loop should prefer the streaming path.
    fn supports_streaming(&self) -> bool {
        true
    }
}
