//! The tool-augmented conversation loop.
//!
//! [`agent_loop`] drives bounded rounds against a [`ChatBackend`]: stream
//! the reply, reassemble any tool calls, dispatch them through the
//! [`ToolRegistry`], feed the results back, and repeat until the model
//! answers in plain text or the round budget runs out. The caller gets a
//! guaranteed non-empty answer plus a flag saying whether a log file was
//! durably written this turn.
//!
//! All per-call state (message list, accumulator, side-effect flag, round
//! budget) is local to one invocation, so concurrent calls against the
//! same backend and registry never interfere.

use anyhow::Result;
use futures::future;
use futures::StreamExt;

use crate::accumulator::ToolCallAccumulator;
use crate::constants::{
    BACKEND_FAILURE_MESSAGE, EMPTY_REPLY_FALLBACK, MAX_ROUNDS, ROUND_LIMIT_MESSAGE,
};
use crate::message::{Message, ToolCall};
use crate::output::Renderer;
use crate::prompt;
use crate::provider::{ChatBackend, StreamEvent};
use crate::tools::ToolRegistry;

/// Result of one orchestration call.
#[derive(Debug)]
pub struct AgentOutcome {
    /// The final assistant answer. Never empty: blank model output is
    /// replaced with a fixed fallback.
    pub content: String,
    /// True if any tool durably created or extended a log this call, so
    /// the caller knows to refresh file listings.
    pub log_written: bool,
}

/// Runs one user turn through the tool-calling loop.
///
/// `history` is the caller's conversation so far (user/assistant text
/// only); intermediate assistant-tool and tool-result messages live and
/// die inside this call. Backend failures and undecodable tool-call
/// streams never escape: they are reported through the renderer's error
/// channel and converted into a fixed apology.
///
/// Dropping the returned future cancels the call; nothing is written to
/// the renderer afterwards.
pub async fn agent_loop(
    backend: &dyn ChatBackend,
    history: &[Message],
    user_text: &str,
    tools: &ToolRegistry,
    renderer: &mut dyn Renderer,
) -> AgentOutcome {
    match run_rounds(backend, history, user_text, tools, renderer).await {
        Ok(outcome) => outcome,
        Err(e) => {
            // Operator-facing detail on stderr; the user gets the apology.
            renderer.render_error(&format!("agent loop failed: {:#}", e));
            renderer.render_token(BACKEND_FAILURE_MESSAGE);
            renderer.render_done();
            AgentOutcome {
                content: BACKEND_FAILURE_MESSAGE.to_string(),
                log_written: false,
            }
        }
    }
}

async fn run_rounds(
    backend: &dyn ChatBackend,
    history: &[Message],
    user_text: &str,
    tools: &ToolRegistry,
    renderer: &mut dyn Renderer,
) -> Result<AgentOutcome> {
    let today = chrono::Local::now().date_naive();
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(prompt::system_prompt(today)));
    messages.extend_from_slice(history);
    messages.push(Message::user(user_text));

    let catalogue = tools.definitions();
    let mut log_written = false;
    let mut rounds_left = MAX_ROUNDS;

    while rounds_left > 0 {
        rounds_left -= 1;

        let (content, tool_calls) = if backend.supports_streaming() {
            stream_round(backend, &messages, &catalogue, renderer).await?
        } else {
            let reply = backend.converse(&messages, &catalogue).await?;
            if !reply.content.is_empty() {
                renderer.render_token(&reply.content);
            }
            (reply.content, reply.tool_calls)
        };

        // No tool calls: this round's content is the final answer.
        if tool_calls.is_empty() {
            let content = if content.trim().is_empty() {
                renderer.render_token(EMPTY_REPLY_FALLBACK);
                EMPTY_REPLY_FALLBACK.to_string()
            } else {
                content
            };
            renderer.render_done();
            return Ok(AgentOutcome {
                content,
                log_written,
            });
        }

        for call in &tool_calls {
            renderer.tool_start(&call.name, &call.arguments);
        }
        messages.push(Message::assistant_tool_calls(content, tool_calls.clone()));

        // Fan-out/fan-in: calls within a round are independent, but every
        // result must be collected before the next backend round — the
        // model expects exactly one result per declared call.
        let replies = future::join_all(tool_calls.iter().map(|call| tools.dispatch(call))).await;
        for reply in replies {
            renderer.tool_result(&reply.name, &reply.content);
            log_written |= reply.wrote_log;
            messages.push(Message::tool_result(reply.tool_call_id, reply.content));
        }
    }

    renderer.render_token(ROUND_LIMIT_MESSAGE);
    renderer.render_done();
    Ok(AgentOutcome {
        content: ROUND_LIMIT_MESSAGE.to_string(),
        log_written,
    })
}

/// Consumes one streamed backend turn.
///
/// Content fragments are forwarded to the renderer immediately and
/// buffered; tool-call fragments go to the accumulator. The stream ending
/// seals the accumulator. A nameless invocation index makes the whole
/// round undecodable and escalates to the caller's outer handler.
async fn stream_round(
    backend: &dyn ChatBackend,
    messages: &[Message],
    catalogue: &[crate::tools::ToolDefinition],
    renderer: &mut dyn Renderer,
) -> Result<(String, Vec<ToolCall>)> {
    let mut stream = backend.converse_stream(messages, catalogue).await?;
    let mut content = String::new();
    let mut accumulator = ToolCallAccumulator::new();

    while let Some(event) = stream.next().await {
        match event? {
            StreamEvent::Content(text) => {
                renderer.render_token(&text);
                content.push_str(&text);
            }
            StreamEvent::ToolCall(fragment) => accumulator.absorb(fragment),
        }
    }

    let tool_calls = accumulator.finish()?;
    Ok((content, tool_calls))
}
