//! 实体标注结果修复流水线
//!
//! LLM 输出 → 清理 → 容错解析 → 校验定位 → 去重排序
//!
//! 整个流水线是纯函数：不做 I/O，不持有状态，可以在任意多个请求中并发调用。

pub mod dedup;
pub mod extractor;
pub mod locator;
pub mod sanitizer;

pub use dedup::dedup_and_sort;
pub use extractor::{extract_json, ParseError, RepairStage, StageFailure};
pub use locator::locate_candidates;
pub use sanitizer::sanitize_response;

use crate::models::AnnotationSet;

/// 从 LLM 原始输出恢复出原文上的标注列表
///
/// # 参数
/// - `raw`: LLM 返回的原始文本
/// - `document`: 被标注的原文
///
/// # 返回
/// 去重并按起始位置排序的标注；所有解析策略都失败时返回 `ParseError`
pub fn annotate_response(raw: &str, document: &str) -> Result<AnnotationSet, ParseError> {
    let sanitized = sanitize_response(raw);
    let value = extract_json(raw, &sanitized)?;
    let spans = locate_candidates(&value, document);
    Ok(dedup_and_sort(spans))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityLabel, Span};

    #[test]
    fn test_fenced_response() {
        let raw = "```json\n[{\"text\":\"孔子\",\"label\":\"人物\"}]\n```";
        let result = annotate_response(raw, "孔子曰：").unwrap();
        assert_eq!(result, vec![Span::new(0, 2, EntityLabel::Person)]);
    }

    #[test]
    fn test_truncated_response_is_parse_error() {
        let raw = r#"[{"text":"a","label":"人物""#;
        let err = annotate_response(raw, "abc").unwrap_err();
        assert_eq!(err.raw, raw);
        assert_eq!(err.sanitized, raw);
    }

    #[test]
    fn test_duplicate_candidates_collapse() {
        let raw = r#"[
            {"text": "子", "label": "人物"},
            {"text": "孔子", "label": "人物"},
            {"text": "孔子", "label": "人物"},
            {"text": "子", "label": "概念"}
        ]"#;
        let result = annotate_response(raw, "孔子曰").unwrap();
        assert_eq!(
            result,
            vec![
                Span::new(0, 2, EntityLabel::Person),
                Span::new(1, 2, EntityLabel::Person),
                Span::new(1, 2, EntityLabel::Concept),
            ]
        );
    }

    #[test]
    fn test_prose_wrapped_response() {
        let raw = "好的，标注如下：\n[{\"text\":\"春\",\"label\":\"时间\"}]\n以上。";
        let result = annotate_response(raw, "春，王正月").unwrap();
        assert_eq!(result, vec![Span::new(0, 1, EntityLabel::Time)]);
    }
}
