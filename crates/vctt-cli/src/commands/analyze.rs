//! Analyze command implementation.

use crate::cli::{AnalyzeArgs, Preset};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::provider::Provider;
use std::fs;
use std::sync::Arc;
use tracing::info;
use vctt_agents::AgentConfig;
use vctt_orchestrator::{Orchestrator, OrchestratorConfig, PipelineResponse};

/// Execute the analyze command.
///
/// Prints the response and returns whether the pipeline succeeded.
pub async fn execute_analyze(args: AnalyzeArgs, mut config: Config) -> Result<bool> {
    apply_overrides(&mut config, &args);
    config.validate()?;

    let text = read_input(&args)?;
    info!(
        "Analyzing {} chars with {:?} provider",
        text.chars().count(),
        config.provider
    );

    let provider = Provider::from_config(&config);
    let mut orchestrator = Orchestrator::with_provider(
        Arc::new(provider),
        config.agents.clone(),
        config.orchestrator.clone(),
    );

    let response = orchestrator.process(&text, args.user, args.session).await;
    println!("{}", render(&response, args.compact)?);

    Ok(response.is_success())
}

/// Command-line flags take precedence over the config file.
///
/// A preset replaces the limits but keeps the configured model.
fn apply_overrides(config: &mut Config, args: &AnalyzeArgs) {
    if let Some(preset) = args.preset {
        let (orchestrator, agents) = match preset {
            Preset::Interactive => (OrchestratorConfig::interactive(), AgentConfig::compact()),
            Preset::Batch => (OrchestratorConfig::batch(), AgentConfig::thorough()),
        };
        config.orchestrator = OrchestratorConfig {
            model_name: config.orchestrator.model_name.clone(),
            ..orchestrator
        };
        config.agents = agents;
    }
    if let Some(provider) = args.provider {
        config.provider = provider.into();
    }
    if let Some(model) = &args.model {
        config.orchestrator.model_name = model.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
}

/// The text argument, or the contents of `--file`.
fn read_input(args: &AnalyzeArgs) -> Result<String> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => return Err(CliError::InvalidInput("No text provided".to_string())),
    };

    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("Input text is empty".to_string()));
    }
    Ok(text)
}

fn render(response: &PipelineResponse, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(response)?
    } else {
        serde_json::to_string_pretty(response)?
    };
    Ok(json)
}
