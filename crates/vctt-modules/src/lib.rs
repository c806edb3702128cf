//! VCTT Signal Modules
//!
//! The five synchronous components of the engine. Each is a plain struct
//! owned by one orchestrator; none of them performs I/O or suspends.
//!
//! | Module | Input | Output | State |
//! |--------|-------|--------|-------|
//! | [`SituationScorer`] | text, analysis | tension / uncertainty / emotional intensity | last metrics |
//! | [`ContradictionScorer`] | text, analysis, relational | contradiction records + score | last batch |
//! | [`TrustAggregator`] | analysis, relational, metrics, contradiction | trust score + factors + trend | append-only history |
//! | [`RegulationEngine`] | metrics, contradiction, trust | mode | transition history |
//! | [`InferenceEngine`] | concepts, relationships | inferred edges, paths, key concepts | none |
//!
//! Every score is clamped to `[0.0, 1.0]` where it is computed.
//!
//! # Example
//!
//! ```
//! use vctt_modules::{ContradictionScorer, RegulationEngine, SituationScorer, TrustAggregator};
//! use vctt_domain::RegulationMode;
//!
//! let text = "I love this plan, but it could fail. Maybe not.";
//!
//! let metrics = SituationScorer::new().analyze(text, None);
//! let contradictions = ContradictionScorer::new().analyze(text, None, None);
//! let trust = TrustAggregator::new().calculate_trust(
//!     None,
//!     None,
//!     Some(&metrics),
//!     contradictions.contradiction_score,
//! );
//! let decision = RegulationEngine::new().regulate(
//!     &metrics,
//!     contradictions.contradiction_score,
//!     trust.trust_score,
//! );
//! assert_ne!(decision.mode, RegulationMode::Normal);
//! ```

#![warn(missing_docs)]

mod contradiction;
mod inference;
mod regulation;
mod situation;
mod trust;

pub use contradiction::{
    ContradictionAnalysis, ContradictionKind, ContradictionRecord, ContradictionScorer,
};
pub use inference::{
    GraphStructure, InferenceEngine, InferenceResult, InferredRelationship, KeyConcept,
    ReasoningPath,
};
pub use regulation::{RegulationDecision, RegulationEngine, RegulationTransition};
pub use situation::SituationScorer;
pub use trust::{TrustAggregator, TrustAssessment, TrustFactors, TrustHistoryEntry, TrustTrend};
