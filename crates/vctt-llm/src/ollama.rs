//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API.
//!
//! # Features
//!
//! - Async HTTP communication with the `/api/generate` endpoint
//! - JSON mode for structured generation
//! - Configurable endpoint, model and sampling temperature
//! - Retry logic with exponential backoff
//!
//! # Examples
//!
//! ```no_run
//! use vctt_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3")
//!     .with_temperature(0.3);
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use vctt_domain::traits::LlmProvider as LlmProviderTrait;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
    temperature: f32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        // Builder only fails when the TLS backend cannot initialise; fall back to defaults then
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Create a new Ollama provider on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Model name this provider talks to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate free text
    ///
    /// # Errors
    ///
    /// Returns error if Ollama is not running, the model is not available,
    /// the network fails or the response cannot be decoded.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        self.send(prompt, None).await
    }

    /// Generate output in Ollama's JSON mode
    pub async fn generate_json(&self, prompt: &str) -> Result<String, LlmError> {
        self.send(prompt, Some("json")).await
    }

    async fn send(&self, prompt: &str, format: Option<&str>) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format,
            options: OllamaOptions {
                temperature: self.temperature,
            },
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            debug!("Ollama request attempt {} to {}", attempts + 1, url);

            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response
                            .json::<OllamaGenerateResponse>()
                            .await
                            .map(|r| r.response)
                            .map_err(|e| {
                                LlmError::InvalidResponse(format!(
                                    "Failed to parse response: {}",
                                    e
                                ))
                            });
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!("Ollama request failed, retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    /// Run an async request to completion from synchronous code
    ///
    /// Agents call providers from the blocking pool, where a private
    /// current-thread runtime can be driven without nesting inside the
    /// caller's runtime.
    fn block_on<F>(&self, future: F) -> Result<String, LlmError>
    where
        F: std::future::Future<Output = Result<String, LlmError>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
        runtime.block_on(future)
    }
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.block_on(self.generate_text(prompt))
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        let prompt = format!("{}\n\nRespond with JSON matching this schema:\n{}", prompt, schema);
        self.block_on(self.generate_json(&prompt))
    }
}
