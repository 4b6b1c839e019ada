//! Emotion aggregation.
//!
//! Free-text emotion labels produced by the analyzer are folded onto a fixed
//! vocabulary of canonical emotion words and tallied for charting.

mod chart;

pub use chart::{render_chart, ChartStyle};

use std::collections::HashMap;

use crate::types::EmotionRecord;

/// Canonical emotion vocabulary.
///
/// Order matters: the first word found in a label wins.
pub const CANONICAL_EMOTIONS: [&str; 15] = [
    "기쁨", "행복", "설렘", "사랑", "감동", "감사", "그리움", "기대",
    "슬픔", "우울", "불안", "걱정", "화남", "짜증", "답답함",
];

/// Fold a free-text label onto the canonical vocabulary.
///
/// Returns the first canonical word contained in `text`; otherwise the first
/// whitespace-delimited token; otherwise an empty string. No case or
/// whitespace normalization is applied.
pub fn map_to_canonical_emotion(text: &str) -> String {
    CANONICAL_EMOTIONS
        .iter()
        .find(|canonical| text.contains(*canonical))
        .map(|canonical| canonical.to_string())
        .or_else(|| text.split_whitespace().next().map(String::from))
        .unwrap_or_default()
}

/// Count records per canonical label.
pub fn build_distribution(records: &[EmotionRecord]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        *counts
            .entry(map_to_canonical_emotion(&record.emotion))
            .or_insert(0) += 1;
    }
    counts
}

/// Labels by descending count, ties broken by label.
pub fn ranked(distribution: &HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = distribution
        .iter()
        .map(|(label, count)| (label.clone(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}
