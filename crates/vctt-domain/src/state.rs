//! Per-run internal state snapshot

use crate::{RegulationMode, SituationalMetrics};
use serde::{Deserialize, Serialize};

/// Neutral trust prior used before any trust has been computed
pub const NEUTRAL_TRUST: f64 = 0.5;

/// Regulation part of the internal state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulationState {
    /// Current mode
    pub mode: RegulationMode,
}

/// Snapshot of the module outputs for one pipeline run
///
/// Owned by the orchestrator and replaced wholesale; the synthesiser receives
/// a copy as read-only context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InternalState {
    /// Situational metrics
    pub sim: SituationalMetrics,

    /// Contradiction score
    pub contradiction: f64,

    /// Regulation mode
    pub regulation: RegulationState,

    /// Trust score
    pub trust: f64,
}

impl Default for InternalState {
    /// Zero metrics, zero contradiction, normal mode, neutral trust
    fn default() -> Self {
        Self {
            sim: SituationalMetrics::default(),
            contradiction: 0.0,
            regulation: RegulationState::default(),
            trust: NEUTRAL_TRUST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = InternalState::default();
        assert_eq!(state.sim, SituationalMetrics::default());
        assert_eq!(state.contradiction, 0.0);
        assert_eq!(state.regulation.mode, RegulationMode::Normal);
        assert_eq!(state.trust, 0.5);
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(InternalState::default()).unwrap();
        assert_eq!(json["regulation"]["mode"], "normal");
        assert_eq!(json["trust"], 0.5);
        assert_eq!(json["sim"]["tension"], 0.0);
    }
}
