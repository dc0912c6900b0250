//! 校验候选实体并在原文中定位
//!
//! 不合法的候选（非对象、缺字段、标签无效、空文本）直接丢弃，不算错误。

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::models::{AnnotationCandidate, EntityLabel, Span};

/// 把解析出的 JSON 转为原文中的标注
///
/// 顶层必须是数组，其他值（包括单个对象）不产生候选。
pub fn locate_candidates(value: &Value, document: &str) -> Vec<Span> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            debug!("标注结果不是数组，忽略: {}", other);
            return Vec::new();
        }
    };

    let index = CharIndex::new(document);
    let mut spans = Vec::new();

    for item in items {
        let Some((text, label)) = validate(item) else {
            continue;
        };
        for start in index.find_all(document, &text) {
            spans.push(Span::new(start, start + text.chars().count(), label));
        }
    }

    spans
}

fn validate(item: &Value) -> Option<(String, EntityLabel)> {
    // 结构体的派生反序列化也接受数组形式，需先排除
    if !item.is_object() {
        debug!("丢弃非对象标注: {}", item);
        return None;
    }

    let candidate = match AnnotationCandidate::deserialize(item) {
        Ok(candidate) => candidate,
        Err(e) => {
            debug!("丢弃格式不正确的标注 {}: {}", item, e);
            return None;
        }
    };

    let Some(label) = EntityLabel::parse(&candidate.label) else {
        debug!("丢弃无效标签: {}", candidate.label);
        return None;
    };

    if candidate.text.is_empty() {
        debug!("丢弃空文本标注");
        return None;
    }

    Some((candidate.text, label))
}

/// 字节偏移与字符下标的对照表
struct CharIndex {
    /// 每个字符起始的字节偏移
    offsets: Vec<usize>,
}

impl CharIndex {
    fn new(document: &str) -> Self {
        Self {
            offsets: document.char_indices().map(|(i, _)| i).collect(),
        }
    }

    fn char_at(&self, byte: usize) -> usize {
        self.offsets.partition_point(|&offset| offset < byte)
    }

    /// 查找 `needle` 的所有出现位置（字符下标），每次匹配后从下一个字符继续，允许重叠
    fn find_all(&self, document: &str, needle: &str) -> Vec<usize> {
        let mut found = Vec::new();
        if needle.is_empty() {
            return found;
        }

        let mut cursor = 0;
        while let Some(rel) = document[cursor..].find(needle) {
            let byte = cursor + rel;
            let char_pos = self.char_at(byte);
            found.push(char_pos);
            cursor = self
                .offsets
                .get(char_pos + 1)
                .copied()
                .unwrap_or(document.len());
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(spans: &[Span]) -> Vec<(usize, usize, &'static str)> {
        spans.iter().map(|s| (s.start, s.end, s.label.name())).collect()
    }

    #[test]
    fn test_locates_by_char_index() {
        let value = json!([{"text": "孔子", "label": "人物"}, {"text": "鲁", "label": "地名"}]);
        let spans = locate_candidates(&value, "孔子居鲁，孔子曰");
        assert_eq!(
            labels(&spans),
            vec![(0, 2, "人物"), (5, 7, "人物"), (3, 4, "地名")]
        );
    }

    #[test]
    fn test_overlapping_occurrences() {
        let value = json!([{"text": "甲", "label": "概念"}]);
        let spans = locate_candidates(&value, "甲甲甲");
        let starts: Vec<usize> = spans.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0, 1, 2]);

        let value = json!([{"text": "甲甲", "label": "概念"}]);
        let spans = locate_candidates(&value, "甲甲甲");
        assert_eq!(labels(&spans), vec![(0, 2, "概念"), (1, 3, "概念")]);
    }

    #[test]
    fn test_discards_invalid_entries() {
        let value = json!([
            "孔子",
            42,
            ["孔子", "人物"],
            {"text": "孔子"},
            {"label": "人物"},
            {"text": 1, "label": "人物"},
            {"text": "孔子", "label": "unknown"},
            {"text": "", "label": "人物"},
            {"text": "孟子", "label": "人物"},
            {"text": "孔子", "label": "人物"}
        ]);
        let spans = locate_candidates(&value, "孔子曰");
        assert_eq!(labels(&spans), vec![(0, 2, "人物")]);
    }

    #[test]
    fn test_non_array_top_level_ignored() {
        let value = json!({"text": "曰", "label": "概念"});
        assert!(locate_candidates(&value, "孔子曰").is_empty());
        assert!(locate_candidates(&json!("孔子"), "孔子曰").is_empty());
        assert!(locate_candidates(&json!(null), "孔子曰").is_empty());
    }

    #[test]
    fn test_array_shaped_element_discarded() {
        let spans = locate_candidates(&json!([["孔子", "人物"]]), "孔子曰");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_english_label_normalized() {
        let value = json!([{"text": "齐", "label": "place"}]);
        let spans = locate_candidates(&value, "齐人");
        assert_eq!(labels(&spans), vec![(0, 1, "地名")]);
    }

    #[test]
    fn test_mixed_width_document() {
        let value = json!([{"text": "A君", "label": "人物"}]);
        let spans = locate_candidates(&value, "曰A君，A君");
        assert_eq!(labels(&spans), vec![(1, 3, "人物"), (4, 6, "人物")]);
    }
}
