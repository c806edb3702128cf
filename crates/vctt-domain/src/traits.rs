//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the scoring core and the
//! infrastructure around it. Implementations live in other crates.

use crate::{AgentInput, AgentKind, AgentOutput};

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (vctt-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate output constrained to JSON matching `schema` (if supported)
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}

/// A producer: turns text plus upstream context into a typed result with a
/// confidence
///
/// The three pipeline producers (analysis, relational, synthesis) are
/// independent implementations of this one contract. Implemented by the
/// application layer (vctt-agents), or by test stubs.
pub trait Agent {
    /// Result record produced by this agent
    type Output;

    /// Error type for agent operations
    type Error;

    /// Which producer this is
    fn kind(&self) -> AgentKind;

    /// Process one input
    fn process(&self, input: &AgentInput) -> Result<AgentOutput<Self::Output>, Self::Error>;
}
