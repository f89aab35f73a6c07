//! Reassembly of streamed tool-call fragments.
//!
//! Streaming backends deliver a tool call's id, name, and argument text in
//! arbitrarily many fragments, interleaved with fragments of other calls
//! from the same turn. Each fragment carries a stable integer index
//! identifying which call it belongs to. [`ToolCallAccumulator`] collects
//! fragments by index and yields the completed calls once the stream ends.
//!
//! One accumulator is owned by a single round of a single agent-loop call;
//! nothing here is shared across conversations.

use std::collections::BTreeMap;

use crate::message::ToolCall;
use crate::provider::ToolCallFragment;

/// A tool-call stream that cannot be assembled into complete calls.
#[derive(Debug, thiserror::Error)]
pub enum AccumulateError {
    /// The backend never named the function for this index. Dropping the
    /// entry instead would leave the declared call without a result message
    /// in the next turn, so the whole round is rejected.
    #[error("streamed tool call at index {index} never received a function name")]
    MissingName { index: u32 },
}

#[derive(Debug, Default)]
struct Entry {
    id: String,
    name: String,
    arguments: String,
}

/// Accumulates [`ToolCallFragment`]s keyed by invocation index.
///
/// `id` and `name` are *set* (last non-empty value wins — backends send
/// them at most once per call); argument text is *appended* in fragment
/// arrival order.
#[derive(Debug, Default)]
pub struct ToolCallAccumulator {
    by_index: BTreeMap<u32, Entry>,
}

impl ToolCallAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one fragment into the call it belongs to, creating the entry
    /// on first sight of its index.
    pub fn absorb(&mut self, fragment: ToolCallFragment) {
        let entry = self.by_index.entry(fragment.index).or_default();
        if let Some(id) = fragment.id {
            if !id.is_empty() {
                entry.id = id;
            }
        }
        if let Some(name) = fragment.name {
            if !name.is_empty() {
                entry.name = name;
            }
        }
        if let Some(delta) = fragment.arguments_delta {
            entry.arguments.push_str(&delta);
        }
    }

    /// True if no fragments were absorbed this round.
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    /// Consumes the accumulator, yielding completed calls in ascending
    /// index order.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulateError::MissingName`] if any index never received
    /// a function name. A missing id is tolerated (left empty): it only
    /// degrades result matching, while a nameless call cannot be dispatched
    /// at all.
    pub fn finish(self) -> Result<Vec<ToolCall>, AccumulateError> {
        let mut calls = Vec::with_capacity(self.by_index.len());
        for (index, entry) in self.by_index {
            if entry.name.is_empty() {
                return Err(AccumulateError::MissingName { index });
            }
            calls.push(ToolCall {
                id: entry.id,
                name: entry.name,
                arguments: entry.arguments,
            });
        }
        Ok(calls)
    }
}
