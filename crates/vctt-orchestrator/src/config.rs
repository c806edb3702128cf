//! Configuration for the Orchestrator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Model name reported in agent metadata and the response
    pub model_name: String,

    /// Maximum input length in characters
    pub max_text_length: usize,

    /// Time limit for each agent call (seconds)
    pub producer_timeout_secs: u64,
}

impl OrchestratorConfig {
    /// Get the agent timeout as a Duration
    pub fn producer_timeout(&self) -> Duration {
        Duration::from_secs(self.producer_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model_name.trim().is_empty() {
            return Err("model_name must not be empty".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.producer_timeout_secs == 0 {
            return Err("producer_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for OrchestratorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            model_name: "llama3".to_string(),
            max_text_length: 50_000,
            producer_timeout_secs: 120,
        }
    }
}

impl OrchestratorConfig {
    /// Interactive preset: short inputs, quick failure
    pub fn interactive() -> Self {
        Self {
            max_text_length: 10_000,
            producer_timeout_secs: 30,
            ..Self::default()
        }
    }

    /// Batch preset: long documents, patient timeouts
    pub fn batch() -> Self {
        Self {
            max_text_length: 200_000,
            producer_timeout_secs: 600,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(OrchestratorConfig::default().validate().is_ok());
        assert!(OrchestratorConfig::interactive().validate().is_ok());
        assert!(OrchestratorConfig::batch().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = OrchestratorConfig {
            producer_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_model_rejected() {
        let config = OrchestratorConfig {
            model_name: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = OrchestratorConfig::from_toml("max_text_length = 100").unwrap();
        assert_eq!(config.max_text_length, 100);
        assert_eq!(config.producer_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = OrchestratorConfig::batch();
        let parsed = OrchestratorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
