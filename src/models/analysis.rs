//! Literary analysis schema.

use serde::{Deserialize, Serialize};

/// A character entry in an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub description: String,
}

/// Structured analysis requested from the completion service.
///
/// Stored records keep the raw JSON object; this type is the strict view used
/// for schema validation and typed access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Very short overview (three to four sentences are requested).
    pub summary: String,
    pub themes: Vec<String>,
    pub main_characters: Vec<Character>,
    pub main_places: Vec<String>,
    pub target_audience: String,
    pub writing_style: String,
    pub key_insights: Vec<String>,
    pub sentiment_analysis: String,
}

impl AnalysisResult {
    /// Deserialize from a JSON value, requiring every field.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}
