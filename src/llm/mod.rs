//! Answerer client abstraction.
//!
//! The answer-generation step is an external service; this module provides a
//! unified interface over the supported backends plus the HTTP plumbing they
//! share.

mod gemini;
mod ollama;
pub mod prompt;

pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use prompt::build_answer_prompt;

use crate::models::Timestamp;
use crate::Result;
use std::time::Duration;

/// Trait for answer-generation backends.
pub trait Answerer: Send + Sync {
    /// The backend name.
    fn name(&self) -> &'static str;

    /// Generates a completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Answerer`] if the completion fails.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Answers a question against assembled capture context.
    ///
    /// `moments` are the captures behind `context`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Answerer`] if the backend fails.
    ///
    /// Default implementation renders the memory-assistant prompt and calls
    /// [`Self::complete`]; backends with a separate system-prompt channel may
    /// override it.
    fn answer(&self, question: &str, context: &str, moments: &[Timestamp]) -> Result<String> {
        tracing::debug!(
            backend = self.name(),
            moments = moments.len(),
            "requesting answer"
        );
        let prompt = build_answer_prompt(question, context);
        self.complete(&prompt)
    }
}

/// HTTP client configuration for answerer backends.
#[derive(Debug, Clone, Copy)]
pub struct AnswerHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for AnswerHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 60_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl AnswerHttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Loads HTTP configuration from config file settings.
    #[must_use]
    pub fn from_config(config: &crate::config::LlmConfig) -> Self {
        let mut settings = Self::default();
        if let Some(timeout_ms) = config.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = config.connect_timeout_ms {
            settings.connect_timeout_ms = connect_timeout_ms;
        }
        settings
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("REWIND_LLM_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("REWIND_LLM_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        self
    }
}

/// Builds a blocking HTTP client for answerer requests with configured timeouts.
#[must_use]
pub fn build_http_client(config: AnswerHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build answerer HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}
