//! Situational metrics (tension, uncertainty, emotional intensity)

use crate::score::clamp_unit;
use serde::{Deserialize, Serialize};

/// The three situational scores, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SituationalMetrics {
    /// Level of conflict or stress
    pub tension: f64,

    /// Degree of ambiguity
    pub uncertainty: f64,

    /// Strength of emotional content
    pub emotional_intensity: f64,
}

impl SituationalMetrics {
    /// Create metrics, clamping each score to [0, 1]
    pub fn new(tension: f64, uncertainty: f64, emotional_intensity: f64) -> Self {
        Self {
            tension: clamp_unit(tension),
            uncertainty: clamp_unit(uncertainty),
            emotional_intensity: clamp_unit(emotional_intensity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let metrics = SituationalMetrics::default();
        assert_eq!(metrics.tension, 0.0);
        assert_eq!(metrics.uncertainty, 0.0);
        assert_eq!(metrics.emotional_intensity, 0.0);
    }

    #[test]
    fn test_new_clamps() {
        let metrics = SituationalMetrics::new(1.5, -0.5, 0.3);
        assert_eq!(metrics, SituationalMetrics::new(1.0, 0.0, 0.3));
    }
}
