use super::*;
use crate::message::ToolCall;
use serde_json::json;

fn registry() -> (tempfile::TempDir, ToolRegistry) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LogStore::new(dir.path().to_path_buf()));
    (dir, ToolRegistry::with_builtins(store))
}

fn call(name: &str, args: serde_json::Value) -> ToolCall {
    ToolCall {
        id: format!("call_{}", name),
        name: name.to_string(),
        arguments: args.to_string(),
    }
}

#[tokio::test]
async fn test_registry_catalogue() {
    let (_dir, registry) = registry();
    assert_eq!(registry.len(), 3);
    let defs = registry.definitions();
    assert_eq!(defs[0].name, "read_log");
    assert_eq!(defs[1].name, "create_log");
    assert_eq!(defs[2].name, "edit_log");
    for def in &defs {
        assert!(def.parameters["properties"]["path"].is_object());
    }
}

#[tokio::test]
async fn test_read_log_not_found() {
    let (_dir, registry) = registry();
    let reply = registry
        .dispatch(&call("read_log", json!({"path": "logs/2025/07/2025-07-01.md"})))
        .await;
    assert_eq!(reply.tool_call_id, "call_read_log");
    assert!(reply.content.contains("不存在"));
    assert!(!reply.wrote_log);
}

#[tokio::test]
async fn test_create_then_read_then_duplicate() {
    let (_dir, registry) = registry();
    let path = "logs/2025/07/2025-07-01.md";

    let created = registry
        .dispatch(&call("create_log", json!({"path": path, "content": "## 2025-07-01"})))
        .await;
    assert!(created.content.contains("成功创建"));
    assert!(created.wrote_log);

    let read = registry.dispatch(&call("read_log", json!({"path": path}))).await;
    assert_eq!(read.content, "## 2025-07-01");
    assert!(!read.wrote_log);

    let duplicate = registry
        .dispatch(&call("create_log", json!({"path": path, "content": "again"})))
        .await;
    assert!(duplicate.content.contains("已存在"));
    // A refused create is not a side effect.
    assert!(!duplicate.wrote_log);
}

#[tokio::test]
async fn test_edit_log_appends() {
    let (_dir, registry) = registry();
    let path = "logs/2025/07/2025-07-02.md";

    let early = registry
        .dispatch(&call("edit_log", json!({"path": path, "content": "- 写代码2小时"})))
        .await;
    assert!(early.content.contains("不存在"));
    assert!(!early.wrote_log);

    registry
        .dispatch(&call("create_log", json!({"path": path, "content": "## 2025-07-02"})))
        .await;
    let edited = registry
        .dispatch(&call("edit_log", json!({"path": path, "content": "- 写代码2小时"})))
        .await;
    assert!(edited.content.contains("成功编辑"));
    assert!(edited.wrote_log);

    let read = registry.dispatch(&call("read_log", json!({"path": path}))).await;
    assert_eq!(read.content, "## 2025-07-02\n- 写代码2小时");
}

#[tokio::test]
async fn test_unknown_tool_is_reported_not_raised() {
    let (_dir, registry) = registry();
    let reply = registry
        .dispatch(&call("delete_everything", json!({"path": "/"})))
        .await;
    assert_eq!(reply.content, "未知工具：delete_everything");
    assert!(!reply.wrote_log);
}

#[tokio::test]
async fn test_malformed_argument_text() {
    let (_dir, registry) = registry();
    let broken = ToolCall {
        id: "call_1".into(),
        name: "read_log".into(),
        arguments: "{\"path\": ".into(),
    };
    let reply = registry.dispatch(&broken).await;
    assert!(reply.content.contains("参数不是有效的 JSON"));
    assert!(!reply.wrote_log);
}

#[tokio::test]
async fn test_missing_required_field() {
    let (_dir, registry) = registry();
    // Valid JSON, wrong shape: handled by the tool's own decode, still
    // rendered as result text.
    let reply = registry
        .dispatch(&call("create_log", json!({"content": "no path"})))
        .await;
    assert!(reply.content.contains("执行工具时出错"));
    assert!(!reply.wrote_log);
}

#[tokio::test]
async fn test_undated_path_is_rejected() {
    let (_dir, registry) = registry();
    let reply = registry
        .dispatch(&call("create_log", json!({"path": "logs/notes.md", "content": "x"})))
        .await;
    assert!(reply.content.contains("无法从路径"));
    assert!(!reply.wrote_log);
}

#[tokio::test]
async fn test_empty_arguments_default_to_empty_object() {
    let (_dir, registry) = registry();
    let bare = ToolCall {
        id: "call_1".into(),
        name: "read_log".into(),
        arguments: String::new(),
    };
    let reply = registry.dispatch(&bare).await;
    // Decodes as {}, then fails the tool's own input decode.
    assert!(reply.content.contains("执行工具时出错"));
}
