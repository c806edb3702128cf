//! Trust aggregation with historical trend tracking
//!
//! Trust is a weighted sum of three per-source factors minus a contradiction
//! penalty. Missing sources count as a neutral 0.5 and the weights are not
//! renormalized, so a run with no producer outputs tops out well below 1.0.
//!
//! The aggregator's own previous score never feeds into the next computation;
//! history is read only to classify the trend.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vctt_domain::{
    clamp_unit, unix_timestamp, AgentOutput, AnalysisResult, RelationalResult, SituationalMetrics,
    Validity,
};

/// Weight of the analyst factor
pub const ANALYST_WEIGHT: f64 = 0.35;
/// Weight of the relational factor
pub const RELATIONAL_WEIGHT: f64 = 0.25;
/// Weight of the situational factor
pub const SITUATIONAL_WEIGHT: f64 = 0.25;
/// Value assumed for a missing factor
pub const NEUTRAL_FACTOR: f64 = 0.5;
/// Fraction of the contradiction score subtracted from trust
pub const CONTRADICTION_PENALTY_RATE: f64 = 0.5;

const TREND_THRESHOLD: f64 = 0.1;

/// Per-source contributions to one trust computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrustFactors {
    /// Analyst factor, if an analysis was available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyst: Option<f64>,

    /// Relational factor, if a relational record was available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relational: Option<f64>,

    /// Situational factor, if metrics were available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situational: Option<f64>,

    /// Contradiction penalty, reported as a non-positive number
    pub contradiction_penalty: f64,
}

/// Direction of the last trust change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustTrend {
    /// Rose by more than 0.1
    Increasing,
    /// Fell by more than 0.1
    Decreasing,
    /// Changed by at most 0.1, or fewer than two entries
    Stable,
}

/// Result of one trust computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustAssessment {
    /// Trust score in [0, 1]
    pub trust_score: f64,

    /// Factor breakdown
    pub factors: TrustFactors,

    /// Trend over the last two history entries
    pub trend: TrustTrend,
}

/// One appended history record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustHistoryEntry {
    /// Trust score
    pub score: f64,

    /// Factor breakdown at the time
    pub factors: TrustFactors,

    /// Unix seconds
    pub timestamp: u64,
}

/// Aggregates trust from producer outputs and module signals
#[derive(Debug, Clone)]
pub struct TrustAggregator {
    trust_score: f64,
    history: Vec<TrustHistoryEntry>,
}

impl Default for TrustAggregator {
    fn default() -> Self {
        Self {
            trust_score: NEUTRAL_FACTOR,
            history: Vec::new(),
        }
    }
}

impl TrustAggregator {
    /// Create an aggregator with a neutral prior and empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute trust, append it to the history and report the trend
    pub fn calculate_trust(
        &mut self,
        analyst: Option<&AgentOutput<AnalysisResult>>,
        relational: Option<&AgentOutput<RelationalResult>>,
        metrics: Option<&SituationalMetrics>,
        contradiction_score: f64,
    ) -> TrustAssessment {
        info!("Calculating trust score");

        let penalty = clamp_unit(contradiction_score) * CONTRADICTION_PENALTY_RATE;
        let factors = TrustFactors {
            analyst: analyst.map(analyst_factor),
            relational: relational.map(relational_factor),
            situational: metrics.map(situational_factor),
            contradiction_penalty: -penalty,
        };

        let weighted = ANALYST_WEIGHT * factors.analyst.unwrap_or(NEUTRAL_FACTOR)
            + RELATIONAL_WEIGHT * factors.relational.unwrap_or(NEUTRAL_FACTOR)
            + SITUATIONAL_WEIGHT * factors.situational.unwrap_or(NEUTRAL_FACTOR);

        self.trust_score = clamp_unit(weighted - penalty);
        self.history.push(TrustHistoryEntry {
            score: self.trust_score,
            factors,
            timestamp: unix_timestamp(),
        });

        let trend = self.trend();
        debug!("Trust factors: {:?}", factors);
        info!("Trust score: {:.2} ({:?})", self.trust_score, trend);

        TrustAssessment {
            trust_score: self.trust_score,
            factors,
            trend,
        }
    }

    /// Last computed trust (0.5 before the first call)
    pub fn trust_score(&self) -> f64 {
        self.trust_score
    }

    /// Copy of the full history, oldest first
    pub fn history(&self) -> Vec<TrustHistoryEntry> {
        self.history.clone()
    }

    fn trend(&self) -> TrustTrend {
        match self.history.as_slice() {
            [.., previous, latest] => {
                let change = latest.score - previous.score;
                if change > TREND_THRESHOLD {
                    TrustTrend::Increasing
                } else if change < -TREND_THRESHOLD {
                    TrustTrend::Decreasing
                } else {
                    TrustTrend::Stable
                }
            }
            _ => TrustTrend::Stable,
        }
    }
}

fn analyst_factor(output: &AgentOutput<AnalysisResult>) -> f64 {
    let analysis = &output.result;
    let mut factor = (output.confidence + analysis.strength.score) / 2.0;
    factor -= (analysis.fallacies.len() as f64 * 0.1).min(0.3);
    if analysis.structure.validity == Validity::Valid {
        factor += 0.1;
    }
    clamp_unit(factor)
}

fn relational_factor(output: &AgentOutput<RelationalResult>) -> f64 {
    let graph = &output.result.graph_metrics;
    let mut factor = output.confidence;
    if graph.node_count >= 3 {
        factor += 0.1;
    }
    if graph.edge_count >= 2 {
        factor += 0.1;
    }
    if (0.2..=0.7).contains(&graph.density) {
        factor += 0.1;
    }
    clamp_unit(factor)
}

fn situational_factor(metrics: &SituationalMetrics) -> f64 {
    let mut factor = 0.6 - 0.3 * metrics.tension - 0.4 * metrics.uncertainty;
    // Emotion at either extreme reads as unreliable
    if metrics.emotional_intensity > 0.7 || metrics.emotional_intensity < 0.1 {
        factor -= 0.15;
    }
    clamp_unit(factor)
}
