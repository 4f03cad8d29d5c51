//! LLM integration for literary analysis.
//!
//! Talks to an OpenAI-compatible chat-completions API (Groq by default) or a
//! local Ollama instance.

mod client;

pub use client::{ChatMessage, ChatRole, CompletionService, LlmClient, LlmConfig, LlmError, LlmProvider};
