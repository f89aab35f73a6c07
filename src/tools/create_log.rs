//! Create-log tool — writes a new daily log file.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{Tool, ToolResult};
use crate::logstore::{date_key_from_path, CreateOutcome, LogStore};

/// Tool that creates the log file for a given dated path.
///
/// Never overwrites: an existing log is reported back so the model can
/// switch to `edit_log`. Counts as a persistence side effect on success.
pub struct CreateLogTool {
    store: Arc<LogStore>,
}

impl CreateLogTool {
    pub fn new(store: Arc<LogStore>) -> Self {
        Self { store }
    }
}

#[derive(Deserialize)]
struct CreateLogInput {
    path: String,
    content: String,
}

#[async_trait::async_trait]
impl Tool for CreateLogTool {
    fn name(&self) -> &str {
        "create_log"
    }

    fn description(&self) -> &str {
        "创建新的日志文件并写入内容。文件已存在时会失败，请改用 edit_log。"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "要创建的日志文件路径"
                },
                "content": {
                    "type": "string",
                    "description": "文件内容"
                }
            },
            "required": ["path", "content"]
        })
    }

    fn writes_log(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let input: CreateLogInput = serde_json::from_value(input)?;
        let Some(date) = date_key_from_path(&input.path) else {
            return Ok(ToolResult::error(format!(
                "错误：无法从路径 {} 解析日期（文件名需要是 YYYY-MM-DD.md）",
                input.path
            )));
        };
        match self.store.create(date, &input.content)? {
            CreateOutcome::Created(_) => Ok(ToolResult::success(format!(
                "成功创建文件 {}",
                input.path
            ))),
            CreateOutcome::AlreadyExists => Ok(ToolResult::error(format!(
                "错误：文件 {} 已存在，请使用 edit_log 进行编辑",
                input.path
            ))),
        }
    }
}
