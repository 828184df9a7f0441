//! Ollama (local) client.

use super::{AnswerHttpConfig, Answerer, build_http_client};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Ollama local answerer client.
pub struct OllamaClient {
    /// API endpoint.
    endpoint: String,
    /// Model to use.
    model: String,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl OllamaClient {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:11434";

    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "llama3.2";

    /// Creates a new Ollama client.
    #[must_use]
    pub fn new() -> Self {
        let endpoint =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| Self::DEFAULT_ENDPOINT.to_string());
        let model =
            std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        Self {
            endpoint,
            model,
            client: build_http_client(AnswerHttpConfig::from_env()),
        }
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets HTTP client timeouts for answerer requests.
    #[must_use]
    pub fn with_http_config(mut self, config: AnswerHttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }

    /// Checks if Ollama is available.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.endpoint))
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Makes a request to the Generate API.
    fn request(&self, prompt: &str) -> Result<String> {
        tracing::info!(backend = "ollama", model = %self.model, "Making answerer request");

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.endpoint))
            .json(&request)
            .send()
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_request() {
                    "request"
                } else {
                    "unknown"
                };
                tracing::error!(
                    backend = "ollama",
                    model = %self.model,
                    error = %e,
                    error_kind = error_kind,
                    "Answerer request failed"
                );
                Error::Answerer(format!("{error_kind} error: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            tracing::error!(
                backend = "ollama",
                model = %self.model,
                status = %status,
                body = %body,
                "Answerer API returned error status"
            );
            return Err(Error::Answerer(format!(
                "API returned status: {status} - {body}"
            )));
        }

        let response: GenerateResponse = response.json().map_err(|e| {
            tracing::error!(
                backend = "ollama",
                model = %self.model,
                error = %e,
                "Failed to parse answerer response"
            );
            Error::Answerer(format!("invalid response body: {e}"))
        })?;

        Ok(response.response)
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Answerer for OllamaClient {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn complete(&self, prompt: &str) -> Result<String> {
        self.request(prompt)
    }
}

/// Request to the Generate API.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from the Generate API.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OllamaClient::new();
        assert_eq!(client.name(), "ollama");
    }

    #[test]
    fn test_client_configuration() {
        let client = OllamaClient::new()
            .with_endpoint("http://localhost:12345")
            .with_model("codellama");

        assert_eq!(client.endpoint, "http://localhost:12345");
        assert_eq!(client.model, "codellama");
    }

    #[test]
    fn test_default_values() {
        let client = OllamaClient {
            endpoint: OllamaClient::DEFAULT_ENDPOINT.to_string(),
            model: OllamaClient::DEFAULT_MODEL.to_string(),
            client: reqwest::blocking::Client::new(),
        };

        assert_eq!(client.endpoint, "http://localhost:11434");
        assert_eq!(client.model, "llama3.2");
    }
}
