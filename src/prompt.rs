//! System-instruction builder.
//!
//! The instruction pins down the assistant's persona, today's date and log
//! path, the record format, and the read→create/edit tool flow. It is
//! rebuilt per orchestration call so a conversation crossing midnight picks
//! up the new date.

use chrono::NaiveDate;

/// The log path the model is told to use for `date`, relative to the
/// store root: `logs/YYYY/MM/YYYY-MM-DD.md`.
pub fn log_path_for(date: NaiveDate) -> String {
    format!("logs/{}.md", date.format("%Y/%m/%Y-%m-%d"))
}

/// Builds the system instruction for one orchestration call.
pub fn system_prompt(today: NaiveDate) -> String {
    let today_str = today.format("%Y-%m-%d");
    let log_path = log_path_for(today);
    format!(
        r#"# 系统提示

角色定位：
- 你是老大的人生管理助手，帮助老大记录每天的活动并提供改进建议。
- 当老大描述做了什么时，你需要记录到今天的日志文件中。
- 保持简洁直接，称呼用「老大」。

## 重要！工具调用规则

**任何涉及活动、时间的输入都必须调用工具记录！**

## 当日信息

- 今天的日期：{today_str}
- 日志文件路径：{log_path}

## 记录格式
<example>
## {today_str}
### 长期目标

### 今日任务
- 任务1
- 任务2

### 行动记录

### 饮食记录

### 睡眠记录

### AI 建议
[你的建议]
</example>

## 可用工具
- read_log
- create_log
- edit_log

## 记录流程

1. 先用 `read_log` 读取 {log_path}
2. 如果返回「文件不存在」，用 `create_log` 创建文件并写入内容
3. 如果文件已存在，用 `edit_log` 把新内容追加到文件末尾"#
    )
}
