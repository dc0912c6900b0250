use std::collections::HashSet;

use crate::models::{AnnotationSet, Span};

/// 去掉 (start, end, label) 完全相同的标注，并按 start 稳定排序
pub fn dedup_and_sort(spans: Vec<Span>) -> AnnotationSet {
    let mut seen = HashSet::with_capacity(spans.len());
    let mut unique: AnnotationSet = spans
        .into_iter()
        .filter(|span| seen.insert(span.key()))
        .collect();
    unique.sort_by_key(|span| span.start);
    unique
}
