//! DeepSeek chat-completions client.
//!
//! Implements [`ChatBackend`] against any OpenAI-compatible
//! `/chat/completions` endpoint. Streaming replies arrive as SSE; each
//! `data:` payload is one [`wire::ChatChunk`] whose delta carries either
//! visible text or tool-call fragments, and `[DONE]` closes the turn.

use anyhow::{anyhow, Context, Result};
use eventsource_stream::Eventsource;
use futures::stream::{self, StreamExt};

use super::wire;
use super::{ChatBackend, EventStream, StreamEvent, ToolCallFragment, TurnReply};
use crate::message::{Message, ToolCall};
use crate::tools::ToolDefinition;

/// A configured chat-completions backend.
pub struct DeepSeekClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    streaming: bool,
}

impl DeepSeekClient {
    pub fn new(api_key: String, base_url: String, model: String, streaming: bool) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            model,
            streaming,
        }
    }

    /// Issues one completions request and returns the raw HTTP response.
    async fn post_chat(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        stream: bool,
    ) -> Result<reqwest::Response> {
        let body = wire::ChatRequest {
            model: self.model.clone(),
            messages: wire::to_wire_messages(messages),
            tools: wire::to_wire_tools(tools),
            stream,
            max_tokens: crate::constants::MAX_TOKENS,
        };
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to reach the completions endpoint")?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("Completions request failed with {}: {}", status, detail);
        }
        Ok(response)
    }
}

/// Maps one SSE payload to its stream events.
///
/// A single chunk may carry text and several tool-call deltas at once.
fn parse_chunk(data: &str) -> Result<Vec<StreamEvent>> {
    let chunk: wire::ChatChunk = serde_json::from_str(data)
        .with_context(|| format!("Undecodable completions chunk: {}", data))?;
    let mut events = Vec::new();
    for choice in chunk.choices {
        if let Some(text) = choice.delta.content {
            if !text.is_empty() {
                events.push(StreamEvent::Content(text));
            }
        }
        for delta in choice.delta.tool_calls {
            let (name, arguments_delta) = match delta.function {
                Some(f) => (f.name, f.arguments),
                None => (None, None),
            };
            events.push(StreamEvent::ToolCall(ToolCallFragment {
                index: delta.index,
                id: delta.id,
                name,
                arguments_delta,
            }));
        }
    }
    Ok(events)
}

#[async_trait::async_trait]
impl ChatBackend for DeepSeekClient {
    async fn converse_stream(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<EventStream> {
        let response = self.post_chat(messages, tools, true).await?;

        let events = response
            .bytes_stream()
            .eventsource()
            // [DONE] is the end-of-turn sentinel, not data.
            .take_while(|item| {
                let done = matches!(item, Ok(event) if event.data == "[DONE]");
                futures::future::ready(!done)
            })
            .map(|item| match item {
                Ok(event) => parse_chunk(&event.data),
                Err(e) => Err(anyhow!("SSE stream error: {}", e)),
            })
            .flat_map(|parsed| match parsed {
                Ok(events) => stream::iter(events.into_iter().map(Ok)).left_stream(),
                Err(e) => stream::iter(vec![Err(e)]).right_stream(),
            });

        Ok(events.boxed())
    }

    async fn converse(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<TurnReply> {
        let response = self.post_chat(messages, tools, false).await?;
        let completion: wire::ChatCompletion = response
            .json()
            .await
            .context("Undecodable completions response")?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Completions response contained no choices"))?;
        let tool_calls = choice
            .message
            .tool_calls
            .into_iter()
            .map(|tc| ToolCall {
                id: tc.id,
                name: tc.function.name,
                arguments: tc.function.arguments,
            })
            .collect();
        Ok(TurnReply {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
        })
    }

    fn supports_streaming(&self) -> bool {
        self.streaming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_with_text_and_tool_delta_yields_both_events() {
        let raw = r#"{"choices":[{"delta":{"content":"好的","tool_calls":[{"index":0,"function":{"arguments":"{\"pa"}}]}}]}"#;
        let events = parse_chunk(raw).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], StreamEvent::Content("好的".to_string()));
        assert_eq!(
            events[1],
            StreamEvent::ToolCall(ToolCallFragment {
                index: 0,
                id: None,
                name: None,
                arguments_delta: Some("{\"pa".to_string()),
            })
        );
    }

    #[test]
    fn empty_delta_yields_no_events() {
        let raw = r#"{"choices":[{"delta":{}}]}"#;
        assert!(parse_chunk(raw).unwrap().is_empty());
    }

    #[test]
    fn garbage_chunk_is_an_error() {
        assert!(parse_chunk("not json").is_err());
    }
}
