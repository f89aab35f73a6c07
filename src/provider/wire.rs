//! Serde types for the OpenAI-compatible chat-completions wire format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::{Message, Role, ToolCall};
use crate::tools::ToolDefinition;

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
    pub stream: bool,
    pub max_tokens: u64,
}

/// One message as the backend expects it.
#[derive(Debug, Serialize)]
pub struct WireMessage {
    pub role: &'static str,
    /// `None` for assistant messages that carry only tool calls.
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WireToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: WireFunction,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    /// Raw JSON argument text, passed through unparsed.
    pub arguments: String,
}

/// Catalogue entry in function-calling shape.
#[derive(Debug, Serialize)]
pub struct WireTool {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: WireToolFunction,
}

#[derive(Debug, Serialize)]
pub struct WireToolFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

// --- Non-streaming response ---

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<WireToolCall>,
}

// --- Streaming response (one SSE data payload) ---

#[derive(Debug, Deserialize)]
pub struct ChatChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCallDelta>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCallDelta {
    pub index: u32,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub function: Option<FunctionDelta>,
}

#[derive(Debug, Deserialize)]
pub struct FunctionDelta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
}

/// Converts koyomi messages to the wire shape.
///
/// An assistant message with tool calls sends `content: null` when its text
/// is empty; every other role always sends its text.
pub fn to_wire_messages(messages: &[Message]) -> Vec<WireMessage> {
    messages
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
                Role::Tool => "tool",
            };
            let content = if m.role == Role::Assistant && m.content.is_empty() && !m.tool_calls.is_empty()
            {
                None
            } else {
                Some(m.content.clone())
            };
            WireMessage {
                role,
                content,
                tool_calls: m.tool_calls.iter().map(to_wire_tool_call).collect(),
                tool_call_id: m.tool_call_id.clone(),
            }
        })
        .collect()
}

fn to_wire_tool_call(call: &ToolCall) -> WireToolCall {
    WireToolCall {
        id: call.id.clone(),
        kind: "function".to_string(),
        function: WireFunction {
            name: call.name.clone(),
            arguments: call.arguments.clone(),
        },
    }
}

pub fn to_wire_tools(tools: &[ToolDefinition]) -> Vec<WireTool> {
    tools
        .iter()
        .map(|t| WireTool {
            kind: "function",
            function: WireToolFunction {
                name: t.name.clone(),
                description: t.description.clone(),
                parameters: t.parameters.clone(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[test]
    fn assistant_tool_call_message_sends_null_content() {
        let msg = Message::assistant_tool_calls(
            "",
            vec![ToolCall {
                id: "call_1".into(),
                name: "read_log".into(),
                arguments: "{\"path\":\"a.md\"}".into(),
            }],
        );
        let wire = to_wire_messages(&[msg]);
        let json = serde_json::to_value(&wire[0]).unwrap();
        assert_eq!(json["role"], "assistant");
        assert!(json["content"].is_null());
        assert_eq!(json["tool_calls"][0]["id"], "call_1");
        assert_eq!(json["tool_calls"][0]["type"], "function");
        assert_eq!(json["tool_calls"][0]["function"]["name"], "read_log");
    }

    #[test]
    fn tool_result_message_carries_call_id() {
        let wire = to_wire_messages(&[Message::tool_result("call_1", "成功创建文件 x")]);
        let json = serde_json::to_value(&wire[0]).unwrap();
        assert_eq!(json["role"], "tool");
        assert_eq!(json["tool_call_id"], "call_1");
        assert_eq!(json["content"], "成功创建文件 x");
    }

    #[test]
    fn chunk_with_tool_call_delta_parses() {
        let raw = r#"{"object":"chat.completion.chunk","choices":[{"delta":{"tool_calls":[{"index":0,"id":"call_1","function":{"name":"read_log","arguments":""}}]},"finish_reason":null}]}"#;
        let chunk: ChatChunk = serde_json::from_str(raw).unwrap();
        let delta = &chunk.choices[0].delta.tool_calls[0];
        assert_eq!(delta.index, 0);
        assert_eq!(delta.id.as_deref(), Some("call_1"));
        assert_eq!(
            delta.function.as_ref().unwrap().name.as_deref(),
            Some("read_log")
        );
    }
}
