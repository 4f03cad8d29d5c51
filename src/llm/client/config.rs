//! LLM client configuration.

use serde::{Deserialize, Serialize};

/// LLM provider type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Ollama API (local)
    Ollama,
    /// OpenAI-compatible API (OpenAI, Groq, Together.ai, etc.)
    #[default]
    OpenAI,
}

impl LlmProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "openai" | "groq" | "together" => Some(Self::OpenAI),
            _ => None,
        }
    }
}

/// Configuration for LLM client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Whether analysis requests are allowed
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// LLM provider (ollama or openai)
    #[serde(default)]
    pub provider: LlmProvider,
    /// API endpoint (provider-specific defaults apply)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key for OpenAI-compatible providers
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Model to use for analysis
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    // 5 min timeout for slow models
    300
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl LlmConfig {
    /// Base default without env overrides (used internally to avoid recursion).
    fn base_default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: LlmProvider::default(),
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Check if the config equals the default (for skip_serializing_if).
    pub fn is_default(&self) -> bool {
        *self == Self::base_default()
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LLM_ENABLED`: "true" or "false"
    /// - `LLM_PROVIDER`: "openai" (default), "groq", "together", or "ollama"
    /// - `LLM_ENDPOINT`: API endpoint (defaults based on provider)
    /// - `LLM_API_KEY`: API key for OpenAI-compatible providers
    /// - `LLM_MODEL`: Model name
    /// - `LLM_MAX_TOKENS`: Maximum tokens in response
    /// - `LLM_TEMPERATURE`: Generation temperature (0.0-1.0)
    /// - `LLM_TIMEOUT_SECS`: Request timeout
    ///
    /// Without `LLM_API_KEY`, the key is taken from `GROQ_API_KEY` or
    /// `OPENAI_API_KEY` depending on the provider.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup (the environment in production).
    pub fn with_overrides_from<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("LLM_ENABLED") {
            self.enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }

        // Check if provider is explicitly set - this is authoritative
        let explicit_provider = var("LLM_PROVIDER");
        if let Some(ref val) = explicit_provider {
            if let Some(provider) = LlmProvider::from_str(val) {
                self.provider = provider;
            }
        }

        // Explicit endpoint always wins
        let explicit_endpoint = var("LLM_ENDPOINT");
        if let Some(ref endpoint) = explicit_endpoint {
            self.endpoint = endpoint.clone();
        }

        // Explicit API key always wins
        if let Some(val) = var("LLM_API_KEY") {
            self.api_key = Some(val);
        }

        // Without an env provider the configured one decides
        let provider_name = match explicit_provider {
            Some(ref val) => val.to_lowercase(),
            None => match self.provider {
                LlmProvider::Ollama => "ollama".to_string(),
                LlmProvider::OpenAI => "groq".to_string(),
            },
        };

        // Only a default endpoint follows the provider; a configured one is kept
        if explicit_endpoint.is_none() && self.endpoint == default_endpoint() {
            match provider_name.as_str() {
                "openai" => self.endpoint = "https://api.openai.com".to_string(),
                "together" => self.endpoint = "https://api.together.xyz".to_string(),
                "ollama" => self.endpoint = "http://localhost:11434".to_string(),
                _ => {} // groq keeps default
            }
        }

        if self.api_key.is_none() {
            match provider_name.as_str() {
                "groq" => self.api_key = var("GROQ_API_KEY").or_else(|| var("OPENAI_API_KEY")),
                "openai" => self.api_key = var("OPENAI_API_KEY"),
                // together uses LLM_API_KEY which we already checked
                _ => {}
            }
        }

        if let Some(val) = var("LLM_MODEL") {
            self.model = val;
        }
        if let Some(n) = var("LLM_MAX_TOKENS").and_then(|v| v.parse().ok()) {
            self.max_tokens = n;
        }
        if let Some(t) = var("LLM_TEMPERATURE").and_then(|v| v.parse().ok()) {
            self.temperature = t;
        }
        if let Some(n) = var("LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.timeout_secs = n;
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_provider(mut self, provider: LlmProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Config with built-in defaults only, ignoring the environment.
    pub fn without_env() -> Self {
        Self::base_default()
    }
}
