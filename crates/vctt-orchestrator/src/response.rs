//! Pipeline response records

use crate::error::OrchestratorError;
use serde::{Deserialize, Serialize};
use vctt_domain::{
    AgentOutput, AnalysisResult, InternalState, RelationalResult, SituationalMetrics,
    SynthesisResult,
};
use vctt_modules::{ContradictionAnalysis, InferenceResult, RegulationDecision, TrustAssessment};

/// Agents run by every pipeline, in order
pub const AGENTS_USED: [&str; 3] = ["analyst", "relational", "synthesiser"];

/// Modules run by every pipeline, as reported in the response
pub const MODULES_EXECUTED: [&str; 5] = ["sim", "cam", "sre", "ctm", "ril"];

/// Outcome of one pipeline run
///
/// Serializes as `{"status": "success", "data": ...}` or
/// `{"status": "error", "error": {"message": ..., "type": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PipelineResponse {
    /// Every stage completed
    Success {
        /// Aggregated results
        data: Box<PipelineData>,
    },

    /// A stage failed and nothing was committed
    Error {
        /// What went wrong
        error: ErrorInfo,
    },
}

impl PipelineResponse {
    /// Whether the run succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineResponse::Success { .. })
    }

    /// Results of a successful run
    pub fn data(&self) -> Option<&PipelineData> {
        match self {
            PipelineResponse::Success { data } => Some(data),
            PipelineResponse::Error { .. } => None,
        }
    }

    /// Error of a failed run
    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            PipelineResponse::Success { .. } => None,
            PipelineResponse::Error { error } => Some(error),
        }
    }
}

impl From<PipelineData> for PipelineResponse {
    fn from(data: PipelineData) -> Self {
        PipelineResponse::Success {
            data: Box::new(data),
        }
    }
}

impl From<&OrchestratorError> for PipelineResponse {
    fn from(err: &OrchestratorError) -> Self {
        PipelineResponse::Error {
            error: ErrorInfo {
                message: err.to_string(),
                kind: err.type_name().to_string(),
            },
        }
    }
}

/// Error body of a failed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Human-readable message
    pub message: String,

    /// Error name
    #[serde(rename = "type")]
    pub kind: String,
}

/// Data of a successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineData {
    /// Caller-supplied session identifier
    pub session_id: Option<String>,

    /// Agent outputs
    pub analysis: AnalysisBundle,

    /// Internal state after the run
    pub internal_state: InternalState,

    /// Full module outputs
    pub module_details: ModuleDetails,

    /// Run metadata
    pub metadata: PipelineMetadata,
}

/// The three agent outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBundle {
    /// Analyst output
    pub analyst_output: AgentOutput<AnalysisResult>,

    /// Relational output
    pub relational_output: AgentOutput<RelationalResult>,

    /// Synthesiser output
    pub synthesis: AgentOutput<SynthesisResult>,
}

/// Full outputs of the five modules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDetails {
    /// Situational metrics
    pub sim: SituationalMetrics,

    /// Contradiction records and score
    pub cam: ContradictionAnalysis,

    /// Regulation decision
    pub sre: RegulationDecision,

    /// Trust assessment
    pub ctm: TrustAssessment,

    /// Relational inference
    pub ril: InferenceResult,
}

/// Run metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetadata {
    /// Wall-clock time of the run
    pub processing_time_ms: u64,

    /// Agents that ran
    pub agents_used: Vec<String>,

    /// Modules that ran
    pub modules_executed: Vec<String>,

    /// Configured model name
    pub model: String,

    /// Completion time (Unix seconds)
    pub timestamp: u64,
}

impl PipelineMetadata {
    /// Metadata for a completed run
    pub fn new(processing_time_ms: u64, model: impl Into<String>) -> Self {
        Self {
            processing_time_ms,
            agents_used: AGENTS_USED.iter().map(|s| s.to_string()).collect(),
            modules_executed: MODULES_EXECUTED.iter().map(|s| s.to_string()).collect(),
            model: model.into(),
            timestamp: vctt_domain::unix_timestamp(),
        }
    }
}
