//! Instruction templates for the three analysis fields.

use crate::config::{AnalyzerConfig, FieldConfig};

/// One of the three generated fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Summary,
    Emotion,
    Empathy,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Summary, Field::Emotion, Field::Empathy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Summary => "summary",
            Field::Emotion => "emotion",
            Field::Empathy => "empathy",
        }
    }

    /// System instruction sent with every request for this field.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Field::Summary => "당신은 커플의 대화를 따뜻하게 요약해주는 AI입니다.",
            Field::Emotion => "당신은 커플의 대화에서 감정을 분석하는 AI입니다.",
            Field::Empathy => "당신은 커플의 대화에 공감하는 따뜻한 AI입니다.",
        }
    }

    /// Template appended after the transcript.
    pub fn instruction(&self) -> &'static str {
        match self {
            Field::Summary => {
                "이 대화를 짧고 따뜻하게 요약해줘. 핵심 키워드를 포함해서 2~3줄로 정리해줘."
            }
            Field::Emotion => {
                "이 대화를 읽고 느껴지는 감정을 하나 또는 두 개로 정리해줘. 감정 단어와 간단한 이유를 말해줘."
            }
            Field::Empathy => "이 대화에 어울리는 다정한 공감의 한마디를 해줘. 1문장으로 부탁해.",
        }
    }

    /// Placeholder used when the request for this field fails.
    pub fn fallback(&self) -> &'static str {
        match self {
            Field::Summary => "요약을 생성하지 못했습니다.",
            Field::Emotion => "감정을 분석하지 못했습니다.",
            Field::Empathy => "공감 멘트를 생성하지 못했습니다.",
        }
    }

    /// User message: transcript, blank line, template.
    pub fn user_message(&self, transcript: &str) -> String {
        format!("{}\n\n{}", transcript, self.instruction())
    }

    pub fn sampling<'a>(&self, config: &'a AnalyzerConfig) -> &'a FieldConfig {
        match self {
            Field::Summary => &config.summary,
            Field::Emotion => &config.emotion,
            Field::Empathy => &config.empathy,
        }
    }
}
