//! Literary analysis through a text-completion service.
//!
//! The extractor sends a fixed schema-defining instruction plus the book text,
//! then repairs the free-form completion into a JSON object. Only JSON
//! well-formedness is checked unless strict schema validation is enabled.

mod config;
mod prompts;
pub mod repair;

pub use config::{AnalysisConfig, DEFAULT_MAX_CHARS};
pub use prompts::ANALYSIS_SYSTEM_PROMPT;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::llm::{ChatMessage, CompletionService, LlmError};
use crate::models::AnalysisResult;

/// Errors from the analysis extractor.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Completion failed: {0}")]
    Completion(#[from] LlmError),

    /// The completion could not be repaired into valid JSON.
    #[error("Could not parse analysis: {0}")]
    Parse(String),

    /// The JSON object does not match the analysis schema.
    #[error("Analysis does not match schema: {0}")]
    SchemaValidation(String),
}

/// Turns book text into a structured analysis.
#[derive(Clone)]
pub struct AnalysisExtractor {
    completion: Arc<dyn CompletionService>,
    strict_schema: bool,
}

impl AnalysisExtractor {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            strict_schema: false,
        }
    }

    /// Require the result to deserialize as a complete [`AnalysisResult`].
    pub fn with_strict_schema(mut self, strict: bool) -> Self {
        self.strict_schema = strict;
        self
    }

    /// Analyze already-truncated book text.
    pub async fn analyze(&self, text: &str) -> Result<serde_json::Value, AnalysisError> {
        let messages = [
            ChatMessage::system(ANALYSIS_SYSTEM_PROMPT),
            ChatMessage::user(text),
        ];

        let completion = self.completion.complete(&messages).await?;
        debug!("Completion returned {} bytes", completion.len());

        let value = parse_completion(&completion)?;

        if self.strict_schema {
            AnalysisResult::from_value(&value)
                .map_err(|e| AnalysisError::SchemaValidation(e.to_string()))?;
        } else if AnalysisResult::from_value(&value).is_err() {
            warn!("Analysis does not match the full schema, storing as-is");
        }

        Ok(value)
    }
}

/// Repair a raw completion and parse it as JSON.
pub fn parse_completion(completion: &str) -> Result<serde_json::Value, AnalysisError> {
    let cleaned = repair::clean_json_content(completion)
        .ok_or_else(|| AnalysisError::Parse("no JSON object in completion".to_string()))?;

    serde_json::from_str(&cleaned).map_err(|e| AnalysisError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Completion service returning a canned reply and recording requests.
    struct CannedCompletion {
        reply: Result<String, ()>,
        requests: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl CannedCompletion {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionService for CannedCompletion {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(messages.to_vec());
            self.reply
                .clone()
                .map_err(|_| LlmError::Api("HTTP 500".to_string()))
        }
    }

    const FULL_ANALYSIS: &str = r#"```json
{
  "summary": "A whale hunt.",
  "themes": ["obsession"],
  "main_characters": [{"name": "Ahab", "description": "Captain of the Pequod"}],
  "main_places": ["Nantucket"],
  "target_audience": "Adults",
  "writing_style": "Digressive",
  "key_insights": ["Nature is indifferent"],
  "sentiment_analysis": "Dark"
}
```"#;

    #[tokio::test]
    async fn test_sends_prompt_and_text() {
        let completion = CannedCompletion::ok(FULL_ANALYSIS);
        let extractor = AnalysisExtractor::new(completion.clone());

        let value = extractor.analyze("Call me Ishmael.").await.unwrap();
        assert_eq!(value["main_characters"][0]["name"], "Ahab");

        let requests = completion.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0][0], ChatMessage::system(ANALYSIS_SYSTEM_PROMPT));
        assert_eq!(requests[0][1], ChatMessage::user("Call me Ishmael."));
    }

    #[tokio::test]
    async fn test_unparseable_completion() {
        let extractor = AnalysisExtractor::new(CannedCompletion::ok("not json at all"));
        let err = extractor.analyze("text").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)));
    }

    #[tokio::test]
    async fn test_invalid_json_in_braces() {
        let extractor = AnalysisExtractor::new(CannedCompletion::ok("{summary: x}"));
        assert!(matches!(
            extractor.analyze("text").await,
            Err(AnalysisError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_partial_object_passes_through_by_default() {
        let extractor = AnalysisExtractor::new(CannedCompletion::ok(r#"{"summary": "x"}"#));
        let value = extractor.analyze("text").await.unwrap();
        assert_eq!(value, serde_json::json!({ "summary": "x" }));
    }

    #[tokio::test]
    async fn test_strict_schema_rejects_partial_object() {
        let extractor = AnalysisExtractor::new(CannedCompletion::ok(r#"{"summary": "x"}"#))
            .with_strict_schema(true);
        assert!(matches!(
            extractor.analyze("text").await,
            Err(AnalysisError::SchemaValidation(_))
        ));
    }

    #[tokio::test]
    async fn test_strict_schema_accepts_full_object() {
        let extractor =
            AnalysisExtractor::new(CannedCompletion::ok(FULL_ANALYSIS)).with_strict_schema(true);
        assert!(extractor.analyze("text").await.is_ok());
    }

    #[tokio::test]
    async fn test_completion_error_propagates() {
        let extractor = AnalysisExtractor::new(CannedCompletion::failing());
        assert!(matches!(
            extractor.analyze("text").await,
            Err(AnalysisError::Completion(LlmError::Api(_)))
        ));
    }
}
