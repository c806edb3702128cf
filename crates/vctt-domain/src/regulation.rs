//! Regulation modes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating mode chosen by the regulation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulationMode {
    /// Stable conditions
    #[default]
    Normal,

    /// Ambiguity or inconsistency: ask for clarification
    Clarify,

    /// High complexity: take additional care
    SlowDown,
}

impl RegulationMode {
    /// Wire name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            RegulationMode::Normal => "normal",
            RegulationMode::Clarify => "clarify",
            RegulationMode::SlowDown => "slow_down",
        }
    }
}

impl fmt::Display for RegulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&RegulationMode::SlowDown).unwrap(),
            "\"slow_down\""
        );
        assert_eq!(RegulationMode::Clarify.to_string(), "clarify");
        assert_eq!(RegulationMode::default(), RegulationMode::Normal);
    }
}
