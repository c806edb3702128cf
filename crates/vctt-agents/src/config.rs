//! Configuration for the agents

use serde::{Deserialize, Serialize};

/// Limits shared by the three agents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Maximum characters of input text embedded in a prompt
    pub max_prompt_chars: usize,

    /// Maximum concepts produced by the heuristic fallback
    pub max_concepts: usize,

    /// Maximum `related_to` links chained between fallback concepts
    pub max_chain_relationships: usize,

    /// Maximum implicit relationship candidates
    pub max_implicit: usize,
}

impl AgentConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_prompt_chars == 0 {
            return Err("max_prompt_chars must be greater than 0".to_string());
        }
        if self.max_concepts == 0 {
            return Err("max_concepts must be greater than 0".to_string());
        }
        // A chain over n concepts has n - 1 links
        if self.max_chain_relationships >= self.max_concepts {
            return Err("max_chain_relationships must be less than max_concepts".to_string());
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_prompt_chars: 4_000,
            max_concepts: 10,
            max_chain_relationships: 5,
            max_implicit: 3,
        }
    }
}

impl AgentConfig {
    /// Compact preset: short prompts and small graphs for quick local models
    pub fn compact() -> Self {
        Self {
            max_prompt_chars: 1_500,
            max_concepts: 6,
            max_chain_relationships: 3,
            max_implicit: 2,
        }
    }

    /// Thorough preset: long prompts and larger fallback graphs
    pub fn thorough() -> Self {
        Self {
            max_prompt_chars: 12_000,
            max_concepts: 20,
            max_chain_relationships: 10,
            max_implicit: 6,
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
