//! 容错 JSON 提取
//!
//! 按从严到宽的顺序尝试多种修复策略，返回第一个成功的结果；
//! 全部失败时汇总每一步的错误信息，连同原始文本一起返回。

use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

static ARRAY_SUBSTRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[\s\S]*?\]").expect("valid regex"));

/// 修复策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStage {
    /// 直接解析
    Direct,
    /// 去掉末尾未闭合的字符串后解析
    TruncateUnterminated,
    /// 只解析第一个 `[` 到最近的 `]`
    ArraySubstring,
}

impl RepairStage {
    pub fn name(self) -> &'static str {
        match self {
            RepairStage::Direct => "直接解析",
            RepairStage::TruncateUnterminated => "截断未闭合字符串",
            RepairStage::ArraySubstring => "提取数组片段",
        }
    }
}

type Strategy = fn(&str) -> Result<Value, String>;

const STRATEGIES: [(RepairStage, Strategy); 3] = [
    (RepairStage::Direct, parse_direct),
    (RepairStage::TruncateUnterminated, parse_truncated),
    (RepairStage::ArraySubstring, parse_array_substring),
];

/// 单个修复策略的失败信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub stage: RepairStage,
    pub message: String,
}

/// 所有修复策略均失败
#[derive(Debug, Clone)]
pub struct ParseError {
    pub attempts: Vec<StageFailure>,
    /// LLM 原始输出
    pub raw: String,
    /// 清理后的文本
    pub sanitized: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AI返回的格式无法解析")?;
        for (i, attempt) in self.attempts.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}[{}] {}", sep, attempt.stage.name(), attempt.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// 从清理后的文本中提取 JSON
///
/// # 参数
/// - `raw`: LLM 原始输出，仅用于错误诊断
/// - `sanitized`: 经过 `sanitize_response` 处理的文本
pub fn extract_json(raw: &str, sanitized: &str) -> Result<Value, ParseError> {
    let mut attempts = Vec::with_capacity(STRATEGIES.len());

    for (stage, strategy) in STRATEGIES {
        match strategy(sanitized) {
            Ok(value) => {
                if stage != RepairStage::Direct {
                    tracing::debug!("JSON 修复成功，策略: {}", stage.name());
                }
                return Ok(value);
            }
            Err(message) => {
                tracing::debug!("JSON 解析策略 [{}] 失败: {}", stage.name(), message);
                attempts.push(StageFailure { stage, message });
            }
        }
    }

    Err(ParseError {
        attempts,
        raw: raw.to_string(),
        sanitized: sanitized.to_string(),
    })
}

fn parse_direct(text: &str) -> Result<Value, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

fn parse_truncated(text: &str) -> Result<Value, String> {
    let repaired = match unterminated_string_start(text) {
        Some(pos) => &text[..pos],
        None => text,
    };
    serde_json::from_str(repaired).map_err(|e| e.to_string())
}

fn parse_array_substring(text: &str) -> Result<Value, String> {
    let found = ARRAY_SUBSTRING
        .find(text)
        .ok_or_else(|| "未找到有效数组".to_string())?;
    serde_json::from_str(found.as_str()).map_err(|e| e.to_string())
}

/// 如果文本在字符串字面量内部结束，返回该字符串开头 `"` 的字节位置
fn unterminated_string_start(text: &str) -> Option<usize> {
    let mut open: Option<usize> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        match open {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(_) if c == '"' => open = None,
            Some(_) => {}
            None if c == '"' => open = Some(i),
            None => {}
        }
    }

    open
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_parse() {
        let text = r#"[{"text":"孔子","label":"人物"}]"#;
        let value = extract_json(text, text).unwrap();
        assert_eq!(value, json!([{"text": "孔子", "label": "人物"}]));
    }

    #[test]
    fn test_array_substring_recovers_from_noise() {
        let text = r#"prefix noise [{"text":"a","label":"地名"}] trailing"#;
        let value = extract_json(text, text).unwrap();
        assert_eq!(value, json!([{"text": "a", "label": "地名"}]));
    }

    #[test]
    fn test_truncate_unterminated_string() {
        // 截断后剩下一个完整的值
        let text = r#"["孔子", "孟"#;
        assert_eq!(unterminated_string_start(text), Some(11));
        let text = r#"{"a": 1} "trailing"#;
        let value = extract_json(text, text).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_unterminated_detection_handles_escapes() {
        assert_eq!(unterminated_string_start(r#""a\"b""#), None);
        assert_eq!(unterminated_string_start(r#""a" "b\""#), Some(4));
        assert_eq!(unterminated_string_start("no quotes"), None);
    }

    #[test]
    fn test_truncated_array_reports_all_stages() {
        let raw = r#"```json
[{"text":"a","label":"人物""#;
        let sanitized = r#"[{"text":"a","label":"人物""#;
        let err = extract_json(raw, sanitized).unwrap_err();

        assert_eq!(err.attempts.len(), 3);
        assert_eq!(err.attempts[0].stage, RepairStage::Direct);
        assert_eq!(err.attempts[1].stage, RepairStage::TruncateUnterminated);
        assert_eq!(err.attempts[2].stage, RepairStage::ArraySubstring);
        assert_eq!(err.attempts[2].message, "未找到有效数组");
        assert_eq!(err.raw, raw);
        assert_eq!(err.sanitized, sanitized);
        assert!(err.to_string().starts_with("AI返回的格式无法解析: [直接解析]"));
    }

    #[test]
    fn test_empty_input_fails_cleanly() {
        let err = extract_json("", "").unwrap_err();
        assert_eq!(err.attempts.len(), 3);
    }

    #[test]
    fn test_shortest_array_match() {
        // 第一个 `]` 之前的片段可以解析
        let text = r#"[1, 2] 和 [3"#;
        let value = extract_json(text, text).unwrap();
        assert_eq!(value, json!([1, 2]));
    }
}
