//! Message types for koyomi's conversation history.
//!
//! Provides a structured [`Message`] type with a [`Role`] enum representing
//! conversation turns. These are koyomi's internal types, converted to the
//! backend's wire format by the provider layer when sent to the LLM.

use serde::{Deserialize, Serialize};

/// A tool invocation requested by the LLM.
///
/// `arguments` holds the raw argument text exactly as the backend produced
/// it (concatenated from stream fragments). It is only parsed as JSON at
/// dispatch time, so a malformed payload surfaces as a tool-result error
/// instead of poisoning the conversation loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Identifier for this call (used to match the result back).
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// Raw JSON argument text.
    pub arguments: String,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// The role of a message sender in the conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Creates the assistant message that declares a round's tool calls.
    ///
    /// `content` may be empty: models often emit tool calls with no
    /// accompanying text.
    pub fn assistant_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
        }
    }

    /// Creates a tool result message to feed back to the LLM.
    ///
    /// Must immediately follow the assistant message that declared the
    /// call with the matching `tool_call_id`.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "you"),
            Role::Assistant => write!(f, "koyomi"),
            Role::Tool => write!(f, "tool"),
        }
    }
}
