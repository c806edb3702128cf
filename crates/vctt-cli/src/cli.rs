//! CLI command definitions and argument parsing.

use crate::config::ProviderKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// VCTT CLI - Score a text for tension, contradiction and trust.
#[derive(Debug, Parser)]
#[command(name = "vctt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VCTT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline on a text and print the JSON response
    Analyze(AnalyzeArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// LLM backend options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProviderArg {
    /// Offline mock (fixed replies)
    Mock,
    /// Local Ollama server
    Ollama,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Mock => ProviderKind::Mock,
            ProviderArg::Ollama => ProviderKind::Ollama,
        }
    }
}

/// Tuning presets for the pipeline and agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Short inputs, small prompts, quick timeouts
    Interactive,
    /// Long documents, large prompts, patient timeouts
    Batch,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Text to analyze
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// LLM backend
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// Replace the orchestrator and agent limits with a preset
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Ollama endpoint
    #[arg(long, env = "VCTT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Session identifier echoed in the response
    #[arg(short, long)]
    pub session: Option<String>,

    /// User identifier passed to the agents
    #[arg(short, long)]
    pub user: Option<String>,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,
}
