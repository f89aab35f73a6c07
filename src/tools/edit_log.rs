//! Edit-log tool — appends new entries to an existing daily log.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{Tool, ToolResult};
use crate::logstore::{date_key_from_path, AppendOutcome, LogStore};

/// Tool that appends content to the log addressed by a dated path.
///
/// Appends rather than replaces, so earlier entries from the same day are
/// never lost. A missing log is reported back so the model can switch to
/// `create_log`. Counts as a persistence side effect on success.
pub struct EditLogTool {
    store: Arc<LogStore>,
}

impl EditLogTool {
    pub fn new(store: Arc<LogStore>) -> Self {
        Self { store }
    }
}

#[derive(Deserialize)]
struct EditLogInput {
    path: String,
    content: String,
}

#[async_trait::async_trait]
impl Tool for EditLogTool {
    fn name(&self) -> &str {
        "edit_log"
    }

    fn description(&self) -> &str {
        "编辑已存在的日志文件，把新内容追加到文件末尾。文件不存在时会失败，请改用 create_log。"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "要编辑的日志文件路径"
                },
                "content": {
                    "type": "string",
                    "description": "追加到文件末尾的新内容"
                }
            },
            "required": ["path", "content"]
        })
    }

    fn writes_log(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let input: EditLogInput = serde_json::from_value(input)?;
        let Some(date) = date_key_from_path(&input.path) else {
            return Ok(ToolResult::error(format!(
                "错误：无法从路径 {} 解析日期（文件名需要是 YYYY-MM-DD.md）",
                input.path
            )));
        };
        match self.store.append(date, &input.content)? {
            AppendOutcome::Appended(_) => Ok(ToolResult::success(format!(
                "成功编辑文件 {}",
                input.path
            ))),
            AppendOutcome::NotFound => Ok(ToolResult::error(format!(
                "错误：文件 {} 不存在，请使用 create_log 创建",
                input.path
            ))),
        }
    }
}
