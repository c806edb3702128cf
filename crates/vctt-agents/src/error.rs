//! Error types for the agents

use thiserror::Error;

/// Errors that can occur inside an agent
///
/// Agents recover from all of these internally; they are surfaced by the
/// parsing helpers and logged when an agent degrades.
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Reply does not have the expected shape
    #[error("Invalid reply format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AgentError {
    fn from(e: serde_json::Error) -> Self {
        AgentError::JsonParse(e.to_string())
    }
}
