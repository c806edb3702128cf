//! VCTT Orchestrator
//!
//! Runs one text through the three agents and the five signal modules and
//! aggregates everything into a single [`PipelineResponse`].
//!
//! # Architecture
//!
//! ```text
//! Text → Analyst → SIM, CAM → CTM → SRE → Relational → RIL → Synthesiser → Response
//! ```
//!
//! Agents are synchronous and run on tokio's blocking pool under the
//! configured timeout. Modules run inline. Each run works on a copy of the
//! modules and the internal state; the copy replaces the originals only
//! when every stage succeeds.
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use vctt_agents::AgentConfig;
//! use vctt_llm::OllamaProvider;
//! use vctt_orchestrator::{Orchestrator, OrchestratorConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(OllamaProvider::default_endpoint("llama3"));
//! let mut orchestrator =
//!     Orchestrator::with_provider(llm, AgentConfig::default(), OrchestratorConfig::default());
//!
//! let response = orchestrator
//!     .process("Everyone agrees, so it must be true.", None, None)
//!     .await;
//! println!("{}", serde_json::to_string_pretty(&response)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod pipeline;
mod response;

pub use config::OrchestratorConfig;
pub use error::OrchestratorError;
pub use pipeline::{LlmOrchestrator, Orchestrator};
pub use response::{
    AnalysisBundle, ErrorInfo, ModuleDetails, PipelineData, PipelineMetadata, PipelineResponse,
    AGENTS_USED, MODULES_EXECUTED,
};
