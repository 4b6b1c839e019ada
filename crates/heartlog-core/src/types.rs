//! Shared types for heartlog-core.
//!
//! These types are persisted by the store and returned by the API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Entity Types
// ─────────────────────────────────────────────────────────────────────────────

/// One saved conversation with its derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub emotion: String,
    pub empathy: String,
    /// Relative to the data directory, e.g. `images/2024-03-05_first_date.jpg`
    #[serde(default)]
    pub image_path: Option<String>,
}

/// The single emotion entry for a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub date: NaiveDate,
    pub emotion: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayWord {
    pub date: NaiveDate,
    pub word: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Types (for creating entities)
// ─────────────────────────────────────────────────────────────────────────────

/// Input for appending a memory. The date is assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewMemory {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub emotion: String,
    pub empathy: String,
    /// Raw photo bytes (JPEG or PNG)
    pub image: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_serializes_plain_date() {
        let memory = Memory {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            title: "첫 데이트".into(),
            content: "안녕".into(),
            summary: "요약".into(),
            emotion: "행복".into(),
            empathy: "좋았겠어요".into(),
            image_path: None,
        };
        let json = serde_json::to_value(&memory).unwrap();
        assert_eq!(json["date"], "2024-03-05");
        assert!(json["image_path"].is_null());
    }

    #[test]
    fn test_memory_without_image_field() {
        let json = r#"{"date":"2024-03-05","title":"t","content":"c","summary":"s","emotion":"e","empathy":"p"}"#;
        let memory: Memory = serde_json::from_str(json).unwrap();
        assert!(memory.image_path.is_none());
    }
}
