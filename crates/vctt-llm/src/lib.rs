//! VCTT LLM Provider Layer
//!
//! Pluggable LLM provider implementations of the `LlmProvider` trait from
//! `vctt-domain`. The agents in `vctt-agents` are generic over this trait, so
//! every backend is interchangeable.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use vctt_llm::MockProvider;
//! use vctt_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use vctt_domain::traits::LlmProvider as LlmProviderTrait;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// A scripted reply for prompts containing a marker
#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail,
}

#[derive(Debug, Default)]
struct MockState {
    rules: Vec<(String, Scripted)>,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Agent prompts are long and embed the user's text, so replies are keyed by
/// a marker substring rather than the exact prompt: the first registered
/// marker contained in the prompt wins, otherwise the default reply is used.
/// Every prompt is recorded for later inspection.
///
/// # Examples
///
/// ```
/// use vctt_llm::MockProvider;
/// use vctt_domain::traits::LlmProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt").unwrap(), "Fixed response");
///
/// // Marker-keyed responses
/// let provider = MockProvider::default()
///     .with_response("ARGUMENT", "{\"fallacies\": []}")
///     .with_response("CONCEPTS", "{\"concepts\": []}");
/// assert_eq!(provider.generate("...ARGUMENT...").unwrap(), "{\"fallacies\": []}");
/// assert_eq!(provider.generate("...CONCEPTS...").unwrap(), "{\"concepts\": []}");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only means a test panicked mid-call; the data is still usable
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reply with `response` to prompts containing `marker`
    pub fn add_response(&mut self, marker: impl Into<String>, response: impl Into<String>) {
        self.state()
            .rules
            .push((marker.into(), Scripted::Reply(response.into())));
    }

    /// Builder form of [`MockProvider::add_response`]
    pub fn with_response(mut self, marker: impl Into<String>, response: impl Into<String>) -> Self {
        self.add_response(marker, response);
        self
    }

    /// Fail prompts containing `marker`
    pub fn add_error(&mut self, marker: impl Into<String>) {
        self.state().rules.push((marker.into(), Scripted::Fail));
    }

    /// Builder form of [`MockProvider::add_error`]
    pub fn with_error(mut self, marker: impl Into<String>) -> Self {
        self.add_error(marker);
        self
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.state().prompts.len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.prompts.push(prompt.to_string());

        let scripted = state
            .rules
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .map(|(_, scripted)| scripted.clone());

        match scripted {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.generate(prompt)
    }
}
