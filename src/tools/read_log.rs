//! Read-log tool — returns a daily log's full Markdown content.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{Tool, ToolResult};
use crate::logstore::{date_key_from_path, LogStore, ReadOutcome};

/// Tool that reads the log file addressed by a dated path.
///
/// Not-found is an expected outcome rendered as an error string the model
/// is prompted to react to (by switching to `create_log`).
pub struct ReadLogTool {
    store: Arc<LogStore>,
}

impl ReadLogTool {
    pub fn new(store: Arc<LogStore>) -> Self {
        Self { store }
    }
}

#[derive(Deserialize)]
struct ReadLogInput {
    path: String,
}

#[async_trait::async_trait]
impl Tool for ReadLogTool {
    fn name(&self) -> &str {
        "read_log"
    }

    fn description(&self) -> &str {
        "读取指定路径的日志文件内容。路径形如 logs/YYYY/MM/YYYY-MM-DD.md。"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "要读取的日志文件路径"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let input: ReadLogInput = serde_json::from_value(input)?;
        let Some(date) = date_key_from_path(&input.path) else {
            return Ok(ToolResult::error(format!(
                "错误：无法从路径 {} 解析日期（文件名需要是 YYYY-MM-DD.md）",
                input.path
            )));
        };
        match self.store.read(date)? {
            ReadOutcome::Found(content) => Ok(ToolResult::success(content)),
            ReadOutcome::NotFound => Ok(ToolResult::error(format!(
                "错误：文件 {} 不存在",
                input.path
            ))),
        }
    }
}
