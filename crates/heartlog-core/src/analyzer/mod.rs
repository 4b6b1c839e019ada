//! Conversation analysis.
//!
//! A transcript is sent to a chat-completion backend three times, once per
//! field (summary, emotion, empathy). Requests run one after another. A field
//! whose request fails gets a fixed placeholder so [`Analyzer::analyze`]
//! always produces a full [`Analysis`].

mod client;
mod prompts;

pub use client::{CompletionClient, CompletionRequest, OpenAiClient};
pub use prompts::Field;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};

/// Message shown when the title is missing.
pub const MISSING_TITLE: &str = "추억의 제목을 입력해주세요.";
/// Message shown when the transcript is missing.
pub const MISSING_TRANSCRIPT: &str = "대화 내용을 입력해주세요.";

/// Generated text for one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    pub emotion: String,
    pub empathy: String,
}

impl Analysis {
    /// All three placeholders.
    pub fn fallback() -> Self {
        Self {
            summary: Field::Summary.fallback().to_string(),
            emotion: Field::Emotion.fallback().to_string(),
            empathy: Field::Empathy.fallback().to_string(),
        }
    }
}

/// Runs the three analysis requests against a [`CompletionClient`].
#[derive(Clone)]
pub struct Analyzer {
    client: Arc<dyn CompletionClient>,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(client: Arc<dyn CompletionClient>, config: AnalyzerConfig) -> Self {
        Self { client, config }
    }

    /// Analyzer backed by [`OpenAiClient`].
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        let client = OpenAiClient::new(config)?;
        Ok(Self::new(Arc::new(client), config.clone()))
    }

    /// Produce summary, emotion and empathy for `transcript`.
    ///
    /// Never fails: each field falls back independently.
    pub async fn analyze(&self, transcript: &str) -> Analysis {
        let summary = self.run(Field::Summary, transcript).await;
        let emotion = self.run(Field::Emotion, transcript).await;
        let empathy = self.run(Field::Empathy, transcript).await;

        Analysis {
            summary,
            emotion,
            empathy,
        }
    }

    async fn run(&self, field: Field, transcript: &str) -> String {
        let sampling = field.sampling(&self.config);
        let request = CompletionRequest {
            system: field.system_prompt().to_string(),
            user: field.user_message(transcript),
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
        };

        let outcome = tokio::time::timeout(self.config.timeout(), self.client.complete(&request))
            .await
            .unwrap_or_else(|_| Err(Error::Analyzer("request timed out".into())));

        match outcome {
            Ok(text) => {
                info!(field = field.as_str(), "Analysis field generated");
                text
            }
            Err(e) => {
                warn!(field = field.as_str(), error = %e, "Analysis request failed, using placeholder");
                field.fallback().to_string()
            }
        }
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

/// Messages for every missing required input, in form order.
pub fn missing_fields(title: &str, transcript: &str) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if title.trim().is_empty() {
        missing.push(MISSING_TITLE);
    }
    if transcript.trim().is_empty() {
        missing.push(MISSING_TRANSCRIPT);
    }
    missing
}

/// Reject an entry whose title or transcript is blank.
pub fn validate_entry(title: &str, transcript: &str) -> Result<()> {
    let missing = missing_fields(title, transcript);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(missing.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers by field and records every request.
    #[derive(Default)]
    struct MockClient {
        fail_summary: bool,
        hang_empathy: bool,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl CompletionClient for MockClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request.clone());

            if request.system == Field::Summary.system_prompt() {
                if self.fail_summary {
                    return Err(Error::Analyzer("upstream 500".into()));
                }
                return Ok("둘이 함께 산책한 이야기".into());
            }
            if request.system == Field::Emotion.system_prompt() {
                return Ok("행복: 함께 웃었어요".into());
            }
            if self.hang_empathy {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            Ok("정말 따뜻한 하루였네요.".into())
        }
    }

    fn analyzer(client: Arc<MockClient>, timeout_secs: u64) -> Analyzer {
        let config = AnalyzerConfig {
            timeout_secs,
            ..Default::default()
        };
        Analyzer::new(client, config)
    }

    #[tokio::test]
    async fn test_analyze_all_fields() {
        let client = Arc::new(MockClient::default());
        let analysis = analyzer(client.clone(), 5).analyze("A: 산책 가자\nB: 좋아").await;

        assert_eq!(analysis.summary, "둘이 함께 산책한 이야기");
        assert_eq!(analysis.emotion, "행복: 함께 웃었어요");
        assert_eq!(analysis.empathy, "정말 따뜻한 하루였네요.");

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].max_tokens, 150);
        assert_eq!(requests[1].max_tokens, 100);
        assert_eq!(requests[2].temperature, 0.8);
        assert!(requests[0].user.starts_with("A: 산책 가자\nB: 좋아\n\n"));
    }

    #[tokio::test]
    async fn test_failed_field_uses_placeholder() {
        let client = Arc::new(MockClient {
            fail_summary: true,
            ..Default::default()
        });
        let analysis = analyzer(client, 5).analyze("대화").await;

        assert_eq!(analysis.summary, "요약을 생성하지 못했습니다.");
        assert_eq!(analysis.emotion, "행복: 함께 웃었어요");
        assert_eq!(analysis.empathy, "정말 따뜻한 하루였네요.");
    }

    #[tokio::test]
    async fn test_timeout_uses_placeholder() {
        let client = Arc::new(MockClient {
            hang_empathy: true,
            ..Default::default()
        });
        let analysis = analyzer(client, 1).analyze("대화").await;

        assert_eq!(analysis.empathy, "공감 멘트를 생성하지 못했습니다.");
        assert_eq!(analysis.summary, "둘이 함께 산책한 이야기");
    }

    #[test]
    fn test_missing_key_gives_all_placeholders() {
        let analyzer = Analyzer::from_config(&AnalyzerConfig::default()).unwrap();
        let analysis = tokio_test::block_on(analyzer.analyze("대화"));
        assert_eq!(analysis, Analysis::fallback());
    }

    #[test]
    fn test_validate_entry() {
        assert!(validate_entry("첫 데이트", "A: 안녕").is_ok());

        let err = validate_entry("", "A: 안녕").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains(MISSING_TITLE));

        let err = validate_entry("  ", "\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains(MISSING_TITLE));
        assert!(message.contains(MISSING_TRANSCRIPT));
    }

    #[test]
    fn test_missing_fields_order() {
        assert_eq!(
            missing_fields("", ""),
            vec![MISSING_TITLE, MISSING_TRANSCRIPT]
        );
        assert!(missing_fields("t", "c").is_empty());
    }
}
