//! Error types for the Orchestrator

use thiserror::Error;
use vctt_domain::AgentKind;

/// Errors that abort a pipeline run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// An agent returned an error
    #[error("{kind} agent failed: {message}")]
    Agent {
        /// Failing agent
        kind: AgentKind,
        /// Agent error message
        message: String,
    },

    /// An agent did not answer within the configured timeout
    #[error("{0} agent timed out")]
    Timeout(AgentKind),

    /// The blocking task running an agent panicked or was cancelled
    #[error("Task join error: {0}")]
    Join(String),
}

impl OrchestratorError {
    /// Short error name reported in the `type` field of an error response
    pub fn type_name(&self) -> &'static str {
        match self {
            OrchestratorError::TextTooLong(..) => "TextTooLong",
            OrchestratorError::Agent { .. } => "AgentError",
            OrchestratorError::Timeout(_) => "Timeout",
            OrchestratorError::Join(_) => "JoinError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = OrchestratorError::Agent {
            kind: AgentKind::Relational,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "relational agent failed: boom");
        assert_eq!(err.type_name(), "AgentError");

        let err = OrchestratorError::TextTooLong(12, 10);
        assert_eq!(err.to_string(), "Text too long: 12 chars (max: 10)");
    }
}
