//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Default number of characters of book text sent for analysis.
pub const DEFAULT_MAX_CHARS: usize = 20_000;

/// Configuration for book analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Characters of book text sent to the completion service.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// Reject completions that do not match the full analysis schema.
    #[serde(default)]
    pub strict_schema: bool,
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl AnalysisConfig {
    fn base_default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            strict_schema: false,
        }
    }

    /// Check if the config equals the default (for skip_serializing_if).
    pub fn is_default(&self) -> bool {
        *self == Self::base_default()
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `ANALYSIS_MAX_CHARS`: characters of text to analyze
    /// - `ANALYSIS_STRICT_SCHEMA`: "true" or "1" to validate every field
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup (the environment in production).
    pub fn with_overrides_from<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Zero would send empty text to the completion service
        if let Some(n) = var("ANALYSIS_MAX_CHARS").and_then(|v| v.parse::<usize>().ok()) {
            if n > 0 {
                self.max_chars = n;
            }
        }
        if let Some(val) = var("ANALYSIS_STRICT_SCHEMA") {
            self.strict_schema = val.eq_ignore_ascii_case("true") || val == "1";
        }
        self
    }
}
