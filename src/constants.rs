//! Centralized constants for koyomi.
//!
//! All magic numbers, default strings, and fixed user-facing messages live
//! here so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "koyomi";

/// Default chat-completions model identifier.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default base URL for the chat-completions backend.
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";

/// Environment variable checked first for the backend API key.
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// Maximum tokens requested per completion.
pub const MAX_TOKENS: u64 = 4096;

/// Maximum backend round-trips per user turn. The agent loop terminates
/// forcibly once this many rounds are spent, even if the model is still
/// asking for tools.
pub const MAX_ROUNDS: u32 = 5;

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "chat_history.txt";

/// Directory under the data dir (unless overridden in config) holding the
/// year/month-partitioned daily logs.
pub const LOG_DIR_NAME: &str = "life_logs";

// --- Fixed user-facing messages ---
//
// The assistant addresses the user as 「老大」 throughout; these are the only
// replies ever produced without the model's involvement.

/// Returned when a round produces neither tool calls nor visible content.
pub const EMPTY_REPLY_FALLBACK: &str = "抱歉老大，我暂时没有获取到有效回复，请稍后再试。";

/// Returned when the round budget is exhausted with tool calls still pending.
pub const ROUND_LIMIT_MESSAGE: &str = "抱歉老大，处理请求超出了最大轮次限制。";

/// Returned when the backend itself fails (network, auth, quota).
pub const BACKEND_FAILURE_MESSAGE: &str = "抱歉老大，我暂时无法连接到 AI 服务，请稍后再试。";
