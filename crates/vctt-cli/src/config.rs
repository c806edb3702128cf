//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vctt_agents::AgentConfig;
use vctt_llm::ollama::DEFAULT_ENDPOINT;
use vctt_orchestrator::OrchestratorConfig;

/// Log levels accepted in the config file.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// LLM backend
    #[serde(default)]
    pub provider: ProviderKind,

    /// Ollama endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Fallback log level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pipeline settings, including the model name
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    /// Agent settings
    #[serde(default)]
    pub agents: AgentConfig,
}

/// LLM backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Scripted offline provider
    Mock,
    /// Local Ollama server
    #[default]
    Ollama,
}

impl Config {
    /// Load configuration from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let contents = fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(CliError::Config(format!(
                "Unknown log level '{}' (expected one of: {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        if self.provider == ProviderKind::Ollama && self.endpoint.trim().is_empty() {
            return Err(CliError::Config("endpoint must not be empty".to_string()));
        }
        self.orchestrator.validate().map_err(CliError::Config)?;
        self.agents.validate().map_err(CliError::Config)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            endpoint: default_endpoint(),
            log_level: default_log_level(),
            orchestrator: OrchestratorConfig::default(),
            agents: AgentConfig::default(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
