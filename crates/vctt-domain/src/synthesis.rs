//! Synthesis record produced by the synthesiser agent

use serde::{Deserialize, Serialize};

/// Multi-source synthesis text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Synthesis {
    /// Synthesised text
    pub text: String,

    /// Sources that fed the synthesis
    pub sources: Vec<String>,

    /// Key sentences pulled from the text
    pub key_points: Vec<String>,
}

/// A single generated insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Insight category, e.g. "argument_quality"
    #[serde(rename = "type")]
    pub kind: String,

    /// Insight sentence
    pub insight: String,

    /// Confidence in [0, 1]
    pub confidence: f64,
}

/// A contradiction flagged for resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionResolution {
    /// Contradiction category
    #[serde(rename = "type")]
    pub kind: String,

    /// What was detected
    pub description: String,

    /// Severity in [0, 1]
    pub severity: f64,

    /// Suggested resolution
    pub resolution: String,
}

/// Full synthesis record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisResult {
    /// Synthesis
    pub synthesis: Synthesis,

    /// Insights
    pub insights: Vec<Insight>,

    /// Narrative explanation
    pub narrative: String,

    /// Contradictions that need resolution
    pub contradiction_resolution: Vec<ContradictionResolution>,

    /// One-line summary
    pub summary: String,

    /// Recommendations
    pub recommendations: Vec<String>,
}
