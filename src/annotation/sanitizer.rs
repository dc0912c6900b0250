//! 清理 LLM 原始输出
//!
//! 去掉 markdown 代码块标记以及 JSON 前后的说明文字。不会失败，
//! 最坏情况下原样返回，交给后续解析阶段报错。

use regex::Regex;
use std::sync::LazyLock;

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+\-]*[ \t]*\r?\n").expect("valid regex"));
static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```\s*$").expect("valid regex"));

/// 清理 LLM 返回的文本，使其更可能被解析为 JSON
pub fn sanitize_response(raw: &str) -> String {
    let mut cleaned = raw.trim();

    if cleaned.starts_with("```") {
        if let Some(open) = FENCE_OPEN.find(cleaned) {
            cleaned = &cleaned[open.end()..];
            if let Some(close) = FENCE_CLOSE.find(cleaned) {
                cleaned = &cleaned[..close.start()];
            }
        }
    }

    if let Some(start) = cleaned.find(['[', '{']) {
        cleaned = &cleaned[start..];
    }
    if let Some(end) = cleaned.rfind([']', '}']) {
        cleaned = &cleaned[..=end];
    }

    cleaned.to_string()
}
