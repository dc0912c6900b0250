use serde::{Deserialize, Serialize};

use super::label::EntityLabel;

/// LLM 报告的候选实体，尚未校验
///
/// `text` 不保证是原文子串，`label` 不保证在标签集合内。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnnotationCandidate {
    pub text: String,
    pub label: String,
}

/// 原文中的一段标注，`[start, end)` 为字符下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

impl Span {
    pub fn new(start: usize, end: usize, label: EntityLabel) -> Self {
        Self { start, end, label }
    }

    pub fn key(&self) -> (usize, usize, EntityLabel) {
        (self.start, self.end, self.label)
    }

    /// 取出原文中该标注覆盖的文本
    pub fn slice<'a>(&self, document: &'a str) -> Option<&'a str> {
        if self.end < self.start {
            return None;
        }
        let mut indices = document
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(document.len()));
        let start = indices.nth(self.start)?;
        let end = if self.end == self.start {
            start
        } else {
            indices.nth(self.end - self.start - 1)?
        };
        document.get(start..end)
    }
}

/// 去重并按起始位置排序后的标注列表
pub type AnnotationSet = Vec<Span>;
