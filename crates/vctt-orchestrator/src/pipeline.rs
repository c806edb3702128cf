//! Core Orchestrator implementation

use crate::config::OrchestratorConfig;
use crate::error::OrchestratorError;
use crate::response::{
    AnalysisBundle, ModuleDetails, PipelineData, PipelineMetadata, PipelineResponse,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, error, info};
use vctt_agents::{AgentConfig, AnalystAgent, RelationalAgent, SynthesiserAgent};
use vctt_domain::traits::{Agent, LlmProvider};
use vctt_domain::{
    AgentContext, AgentInput, AgentOutput, AnalysisResult, InternalState, RegulationState,
    RelationalResult, SynthesisResult,
};
use vctt_modules::{
    ContradictionScorer, InferenceEngine, RegulationEngine, RegulationTransition,
    SituationScorer, TrustAggregator, TrustHistoryEntry,
};

/// The five modules, cloned as a unit for each run
#[derive(Debug, Clone, Default)]
struct Modules {
    sim: SituationScorer,
    cam: ContradictionScorer,
    ctm: TrustAggregator,
    sre: RegulationEngine,
    ril: InferenceEngine,
}

/// An orchestrator whose three agents share one LLM provider
pub type LlmOrchestrator<L> =
    Orchestrator<AnalystAgent<L>, RelationalAgent<L>, SynthesiserAgent<L>>;

/// Sequences the three agents and five modules into one pipeline run
///
/// A run takes `&mut self`; concurrent runs need separate orchestrators.
pub struct Orchestrator<A, R, S> {
    analyst: Arc<A>,
    relational: Arc<R>,
    synthesiser: Arc<S>,
    modules: Modules,
    state: InternalState,
    config: OrchestratorConfig,
}

impl<L> Orchestrator<AnalystAgent<L>, RelationalAgent<L>, SynthesiserAgent<L>>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create an orchestrator with the LLM-backed agents
    pub fn with_provider(
        llm: Arc<L>,
        agent_config: AgentConfig,
        config: OrchestratorConfig,
    ) -> Self {
        let model = config.model_name.clone();
        Self::new(
            AnalystAgent::new(Arc::clone(&llm), agent_config.clone()).with_model_name(&model),
            RelationalAgent::new(Arc::clone(&llm), agent_config.clone()).with_model_name(&model),
            SynthesiserAgent::new(llm, agent_config).with_model_name(model),
            config,
        )
    }
}

impl<A, R, S> Orchestrator<A, R, S>
where
    A: Agent<Output = AnalysisResult> + Send + Sync + 'static,
    R: Agent<Output = RelationalResult> + Send + Sync + 'static,
    S: Agent<Output = SynthesisResult> + Send + Sync + 'static,
    A::Error: std::fmt::Display,
    R::Error: std::fmt::Display,
    S::Error: std::fmt::Display,
{
    /// Create an orchestrator from three agents
    pub fn new(analyst: A, relational: R, synthesiser: S, config: OrchestratorConfig) -> Self {
        info!("VCTT orchestrator initialized (model: {})", config.model_name);
        Self {
            analyst: Arc::new(analyst),
            relational: Arc::new(relational),
            synthesiser: Arc::new(synthesiser),
            modules: Modules::default(),
            state: InternalState::default(),
            config,
        }
    }

    /// Run the full pipeline on `text`
    ///
    /// Never fails: an error in any stage becomes an error response and the
    /// module histories and internal state are left as they were.
    pub async fn process(
        &mut self,
        text: &str,
        user_id: Option<String>,
        session_id: Option<String>,
    ) -> PipelineResponse {
        let start = Instant::now();
        info!("Starting VCTT pipeline for session {:?}", session_id);

        let mut modules = self.modules.clone();
        let mut state = self.state;

        match self
            .run(text, user_id, session_id, &mut modules, &mut state)
            .await
        {
            Ok((analysis, module_details, session_id)) => {
                self.modules = modules;
                self.state = state;

                let elapsed = start.elapsed().as_millis() as u64;
                info!("VCTT pipeline completed in {}ms", elapsed);

                PipelineResponse::from(PipelineData {
                    session_id,
                    analysis,
                    internal_state: state,
                    module_details,
                    metadata: PipelineMetadata::new(elapsed, self.config.model_name.clone()),
                })
            }
            Err(e) => {
                error!("Pipeline error: {}", e);
                PipelineResponse::from(&e)
            }
        }
    }

    async fn run(
        &self,
        text: &str,
        user_id: Option<String>,
        session_id: Option<String>,
        modules: &mut Modules,
        state: &mut InternalState,
    ) -> Result<(AnalysisBundle, ModuleDetails, Option<String>), OrchestratorError> {
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(OrchestratorError::TextTooLong(length, self.config.max_text_length));
        }

        let limit = self.config.producer_timeout();
        let input = |context: AgentContext| {
            AgentInput::new(text)
                .with_session(session_id.clone())
                .with_context(context)
        };

        info!("Stage 1: Running analyst agent");
        let analyst_output = run_agent(
            &self.analyst,
            input(AgentContext {
                user_id: user_id.clone(),
                ..Default::default()
            }),
            limit,
        )
        .await?;
        let analysis = &analyst_output.result;

        info!("Stage 2: Executing modules");
        let sim = modules.sim.analyze(text, Some(analysis));
        state.sim = sim;

        let cam = modules.cam.analyze(text, Some(analysis), None);
        state.contradiction = cam.contradiction_score;

        let ctm = modules
            .ctm
            .calculate_trust(Some(&analyst_output), None, Some(&sim), cam.contradiction_score);
        state.trust = ctm.trust_score;

        let sre = modules.sre.regulate(&sim, cam.contradiction_score, ctm.trust_score);
        state.regulation = RegulationState { mode: sre.mode };
        debug!("Internal state after modules: {:?}", state);

        info!("Stage 3: Running relational agent");
        let relational_output = run_agent(
            &self.relational,
            input(AgentContext {
                user_id: user_id.clone(),
                analyst_output: Some(analyst_output.clone()),
                ..Default::default()
            }),
            limit,
        )
        .await?;

        let ril = modules.ril.infer(
            &relational_output.result.concepts,
            &relational_output.result.relationships,
            Some(&analyst_output.result),
        );

        info!("Stage 4: Running synthesiser agent");
        let synthesis = run_agent(
            &self.synthesiser,
            input(AgentContext {
                user_id,
                analyst_output: Some(analyst_output.clone()),
                relational_output: Some(relational_output.clone()),
                module_state: Some(*state),
            }),
            limit,
        )
        .await?;

        Ok((
            AnalysisBundle {
                analyst_output,
                relational_output,
                synthesis,
            },
            ModuleDetails {
                sim,
                cam,
                sre,
                ctm,
                ril,
            },
            session_id,
        ))
    }

    /// Internal state after the last successful run
    pub fn internal_state(&self) -> InternalState {
        self.state
    }

    /// Reset the internal state to its initial values
    ///
    /// Module histories are kept.
    pub fn reset_state(&mut self) {
        self.state = InternalState::default();
        info!("Internal state reset");
    }

    /// Copy of the trust history across committed runs
    pub fn trust_history(&self) -> Vec<TrustHistoryEntry> {
        self.modules.ctm.history()
    }

    /// Copy of the regulation transitions across committed runs
    pub fn regulation_history(&self) -> Vec<RegulationTransition> {
        self.modules.sre.history()
    }

    /// Active configuration
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }
}

/// Run one synchronous agent on the blocking pool under a time limit
async fn run_agent<P>(
    agent: &Arc<P>,
    input: AgentInput,
    limit: Duration,
) -> Result<AgentOutput<P::Output>, OrchestratorError>
where
    P: Agent + Send + Sync + 'static,
    P::Output: Send + 'static,
    P::Error: std::fmt::Display,
{
    let agent = Arc::clone(agent);
    let kind = agent.kind();

    // Agents call a blocking LLM provider
    let task = tokio::task::spawn_blocking(move || {
        agent
            .process(&input)
            .map_err(|e| OrchestratorError::Agent {
                kind,
                message: e.to_string(),
            })
    });

    let output = timeout(limit, task)
        .await
        .map_err(|_| OrchestratorError::Timeout(kind))?
        .map_err(|e| OrchestratorError::Join(e.to_string()))??;

    debug!("{} agent confidence {:.2}", kind, output.confidence);
    Ok(output)
}
