//! Agent input and output envelopes
//!
//! Every producer (analysis, relational, synthesis) receives an
//! [`AgentInput`] and returns an [`AgentOutput`] carrying its typed result and
//! a confidence in [0, 1].

use crate::score::clamp_unit;
use crate::{AnalysisResult, InternalState, RelationalResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which producer generated an output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Argument structure and fallacy analysis
    Analyst,
    /// Concept and relationship mapping
    Relational,
    /// Multi-source synthesis
    Synthesiser,
}

impl AgentKind {
    /// Wire name of the agent
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Analyst => "analyst",
            AgentKind::Relational => "relational",
            AgentKind::Synthesiser => "synthesiser",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream context handed to an agent
#[derive(Debug, Clone, Default)]
pub struct AgentContext {
    /// Caller identity, if known
    pub user_id: Option<String>,

    /// Analyst output from an earlier stage
    pub analyst_output: Option<AgentOutput<AnalysisResult>>,

    /// Relational output from an earlier stage
    pub relational_output: Option<AgentOutput<RelationalResult>>,

    /// Internal state snapshot
    pub module_state: Option<InternalState>,
}

/// Input to an agent
#[derive(Debug, Clone, Default)]
pub struct AgentInput {
    /// Text to process
    pub text: String,

    /// Session identifier
    pub session_id: Option<String>,

    /// Upstream context
    pub context: AgentContext,
}

impl AgentInput {
    /// Create an input with empty context
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the session identifier
    pub fn with_session(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    /// Set the context
    pub fn with_context(mut self, context: AgentContext) -> Self {
        self.context = context;
        self
    }
}

/// Output of an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutput<R> {
    /// Producing agent
    pub agent_type: AgentKind,

    /// Typed result record
    pub result: R,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Free-form metadata
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,

    /// Creation time (Unix seconds)
    pub timestamp: u64,
}

impl<R> AgentOutput<R> {
    /// Create an output stamped with the current time, clamping the confidence
    pub fn new(agent_type: AgentKind, result: R, confidence: f64) -> Self {
        Self {
            agent_type,
            result,
            confidence: clamp_unit(confidence),
            metadata: BTreeMap::new(),
            timestamp: crate::unix_timestamp(),
        }
    }

    /// Add a metadata entry
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
