//! Regulation mode state machine
//!
//! The mode is recomputed from scratch on every call; only the transition
//! history depends on the previous mode.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vctt_domain::{RegulationMode, SituationalMetrics};

/// A recorded mode change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulationTransition {
    /// Mode before the change
    pub from: RegulationMode,

    /// Mode after the change
    pub to: RegulationMode,

    /// Comma-separated triggering conditions
    pub reason: String,
}

/// Result of one regulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulationDecision {
    /// Newly computed mode
    pub mode: RegulationMode,

    /// Mode held before this call
    pub previous_mode: RegulationMode,

    /// Whether the mode changed
    pub mode_changed: bool,

    /// Fixed explanation for the current mode
    pub rationale: String,
}

/// Chooses the operating mode and records mode changes
#[derive(Debug, Clone, Default)]
pub struct RegulationEngine {
    mode: RegulationMode,
    history: Vec<RegulationTransition>,
}

impl RegulationEngine {
    /// Create an engine in normal mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the mode for the given signals, recording a transition on change
    pub fn regulate(
        &mut self,
        metrics: &SituationalMetrics,
        contradiction: f64,
        trust: f64,
    ) -> RegulationDecision {
        info!("Regulating mode");

        let previous_mode = self.mode;
        let mode = determine_mode(metrics, contradiction, trust);
        let mode_changed = mode != previous_mode;

        if mode_changed {
            let reason = transition_reason(metrics, contradiction, trust);
            info!("Mode transition: {} -> {} ({})", previous_mode, mode, reason);
            self.history.push(RegulationTransition {
                from: previous_mode,
                to: mode,
                reason,
            });
            self.mode = mode;
        } else {
            debug!("Mode unchanged: {}", mode);
        }

        RegulationDecision {
            mode,
            previous_mode,
            mode_changed,
            rationale: rationale(mode).to_string(),
        }
    }

    /// Current mode
    pub fn mode(&self) -> RegulationMode {
        self.mode
    }

    /// Copy of the transition history, oldest first
    pub fn history(&self) -> Vec<RegulationTransition> {
        self.history.clone()
    }
}

/// Pick the mode for a set of signals
///
/// Slow-down conditions are checked before clarify conditions.
pub fn determine_mode(metrics: &SituationalMetrics, contradiction: f64, trust: f64) -> RegulationMode {
    if metrics.uncertainty > 0.7
        || contradiction > 0.6
        || metrics.emotional_intensity > 0.8
        || trust < 0.3
    {
        RegulationMode::SlowDown
    } else if metrics.uncertainty > 0.5
        || contradiction > 0.4
        || trust < 0.5
        || metrics.tension > 0.6
    {
        RegulationMode::Clarify
    } else {
        RegulationMode::Normal
    }
}

fn transition_reason(metrics: &SituationalMetrics, contradiction: f64, trust: f64) -> String {
    let conditions = [
        (metrics.uncertainty > 0.6, "high uncertainty"),
        (contradiction > 0.5, "contradictions detected"),
        (trust < 0.4, "low trust"),
        (metrics.tension > 0.7, "high tension"),
        (metrics.emotional_intensity > 0.7, "high emotional intensity"),
    ];

    let reasons: Vec<&str> = conditions
        .iter()
        .filter(|(active, _)| *active)
        .map(|(_, reason)| *reason)
        .collect();

    if reasons.is_empty() {
        "metrics stabilized".to_string()
    } else {
        reasons.join(", ")
    }
}

fn rationale(mode: RegulationMode) -> &'static str {
    match mode {
        RegulationMode::SlowDown => {
            "Processing complexity requires careful consideration. Taking additional time to analyze."
        }
        RegulationMode::Clarify => {
            "Ambiguity or inconsistencies detected. Seeking clarification to improve understanding."
        }
        RegulationMode::Normal => "Conditions are stable. Proceeding with normal processing.",
    }
}
