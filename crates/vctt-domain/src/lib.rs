//! VCTT Domain Layer
//!
//! This crate holds the records and trait interfaces shared by every other
//! layer of the engine. It has no runtime dependencies beyond `serde`, because
//! producer records cross the LLM boundary as JSON and must deserialize
//! defensively.
//!
//! ## Key Concepts
//!
//! - **Agent output**: a structured result plus a confidence in [0, 1]
//! - **Analysis record**: argument structure, fallacies, strength
//! - **Relational record**: concepts, directed relationships, graph metrics
//! - **Situational metrics**: tension, uncertainty, emotional intensity
//! - **Regulation mode**: normal, clarify, slow_down
//! - **Internal state**: the per-run snapshot owned by the orchestrator
//!
//! ## Architecture
//!
//! - Pure data and pure helpers only
//! - Infrastructure (LLM providers, agents, pipeline) lives in other crates
//! - Trait definitions for every external interaction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agent;
pub mod analysis;
pub mod regulation;
pub mod relational;
pub mod score;
pub mod situation;
pub mod state;
pub mod synthesis;
pub mod traits;

// Re-exports for convenience
pub use agent::{AgentContext, AgentInput, AgentKind, AgentOutput};
pub use analysis::{
    AnalysisResult, ArgumentStrength, ArgumentStructure, ArgumentType, Fallacy, Soundness,
    StrengthRating, TextStats, Validity,
};
pub use regulation::RegulationMode;
pub use relational::{Concept, GraphMetrics, ImplicitRelationship, RelationalResult, Relationship};
pub use score::clamp_unit;
pub use situation::SituationalMetrics;
pub use state::{InternalState, RegulationState};
pub use synthesis::{ContradictionResolution, Insight, Synthesis, SynthesisResult};

use std::time::{SystemTime, UNIX_EPOCH};

/// Current timestamp in seconds since the Unix epoch
///
/// A clock set before 1970 reads as 0 rather than failing.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
