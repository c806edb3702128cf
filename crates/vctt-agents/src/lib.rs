//! VCTT Agents
//!
//! The three LLM-backed producers that feed the signal modules.
//!
//! # Overview
//!
//! Each agent implements the [`Agent`](vctt_domain::traits::Agent) trait and
//! is generic over an [`LlmProvider`](vctt_domain::traits::LlmProvider), so a
//! `MockProvider` and a live Ollama backend are interchangeable.
//!
//! | Agent | LLM calls | Result |
//! |-------|-----------|--------|
//! | [`AnalystAgent`] | 1 (structured) | argument structure, fallacies, strength |
//! | [`RelationalAgent`] | 1 (structured) | concepts, relationships, graph metrics |
//! | [`SynthesiserAgent`] | 2 (free text) | synthesis, insights, narrative |
//!
//! # Degradation
//!
//! LLM failures and malformed replies never surface as errors. Each agent
//! logs a warning and falls back to a default (or heuristic) record, lowering
//! its confidence where the record is less trustworthy.
//!
//! # Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use vctt_agents::{AgentConfig, AnalystAgent};
//! use vctt_domain::traits::Agent;
//! use vctt_domain::{AgentInput, Validity};
//! use vctt_llm::MockProvider;
//!
//! let llm = Arc::new(MockProvider::new(
//!     r#"{"structure": {"type": "deductive", "validity": "valid", "soundness": "sound"}}"#,
//! ));
//! let analyst = AnalystAgent::new(llm, AgentConfig::default());
//!
//! let output = analyst.process(&AgentInput::new("All men are mortal.")).unwrap();
//! assert_eq!(output.result.structure.validity, Validity::Valid);
//! ```

#![warn(missing_docs)]

mod analyst;
mod config;
mod error;
mod parser;
mod prompt;
mod relational;
mod synthesiser;

#[cfg(test)]
mod tests;

pub use analyst::AnalystAgent;
pub use config::AgentConfig;
pub use error::AgentError;
pub use parser::{extract_json, AnalystReply, RelationalReply};
pub use prompt::{
    PromptBuilder, ANALYST_MARKER, NARRATIVE_MARKER, RELATIONAL_MARKER, SYNTHESIS_MARKER,
};
pub use relational::RelationalAgent;
pub use synthesiser::{SynthesiserAgent, NARRATIVE_FALLBACK, SYNTHESIS_FALLBACK};

use vctt_domain::traits::LlmProvider;

/// Call the provider, flattening its error into [`AgentError::Llm`]
pub(crate) fn call_llm<L>(llm: &L, prompt: &str, schema: Option<&str>) -> Result<String, AgentError>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    let reply = match schema {
        Some(schema) => llm.generate_structured(prompt, schema),
        None => llm.generate(prompt),
    };
    reply.map_err(|e| AgentError::Llm(e.to_string()))
}
