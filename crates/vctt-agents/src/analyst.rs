//! Analyst agent: argument structure, fallacies, premises and strength

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::parser::{parse_analyst_reply, AnalystReply};
use crate::prompt::{PromptBuilder, ANALYST_SCHEMA};
use crate::call_llm;
use std::sync::Arc;
use tracing::{debug, info, warn};
use vctt_domain::traits::{Agent, LlmProvider};
use vctt_domain::{
    AgentInput, AgentKind, AgentOutput, AnalysisResult, ArgumentStrength, ArgumentType,
    TextStats, Validity,
};

const MAX_PREMISES: usize = 5;
const MAX_CONCLUSIONS: usize = 3;

const BASE_STRENGTH: f64 = 0.5;
const VALID_BONUS: f64 = 0.2;
const FALLACY_PENALTY: f64 = 0.1;

const BASE_CONFIDENCE: f64 = 0.7;
const DEGRADED_PENALTY: f64 = 0.2;

/// Analyzes argument structure using one structured LLM call
pub struct AnalystAgent<L: LlmProvider> {
    llm: Arc<L>,
    config: AgentConfig,
    model_name: String,
}

impl<L> AnalystAgent<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a new analyst agent
    pub fn new(llm: Arc<L>, config: AgentConfig) -> Self {
        Self {
            llm,
            config,
            model_name: "llm".to_string(),
        }
    }

    /// Set the model name reported in output metadata
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    fn request_reply(&self, text: &str) -> Result<AnalystReply, AgentError> {
        let prompt = PromptBuilder::analyst(text, self.config.max_prompt_chars).build();
        debug!("Analyst prompt length: {} chars", prompt.len());

        let response = call_llm(self.llm.as_ref(), &prompt, Some(ANALYST_SCHEMA))?;
        parse_analyst_reply(&response)
    }
}

impl<L> Agent for AnalystAgent<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    type Output = AnalysisResult;
    type Error = AgentError;

    fn kind(&self) -> AgentKind {
        AgentKind::Analyst
    }

    fn process(&self, input: &AgentInput) -> Result<AgentOutput<AnalysisResult>, AgentError> {
        info!("Analyst processing {} chars", input.text.len());

        let (reply, degraded) = match self.request_reply(&input.text) {
            Ok(reply) => (reply, false),
            Err(e) => {
                warn!("Analyst falling back to defaults: {}", e);
                (AnalystReply::default(), true)
            }
        };

        let analysis = build_analysis(reply, &input.text);
        let confidence = confidence(&analysis, degraded);

        info!(
            "Analyst complete: {} fallacies, strength {:.2}, confidence {:.2}",
            analysis.fallacies.len(),
            analysis.strength.score,
            confidence
        );

        let fallacies_detected = analysis.fallacies.len();
        Ok(AgentOutput::new(AgentKind::Analyst, analysis, confidence)
            .with_metadata("model", self.model_name.clone())
            .with_metadata("fallacies_detected", fallacies_detected)
            .with_metadata("degraded", degraded))
    }
}

fn build_analysis(reply: AnalystReply, text: &str) -> AnalysisResult {
    let AnalystReply {
        structure,
        fallacies,
        mut premises,
        mut conclusions,
    } = reply;
    premises.truncate(MAX_PREMISES);
    conclusions.truncate(MAX_CONCLUSIONS);

    let mut score = BASE_STRENGTH - fallacies.len() as f64 * FALLACY_PENALTY;
    if structure.validity == Validity::Valid {
        score += VALID_BONUS;
    }

    AnalysisResult {
        structure,
        fallacies,
        premises,
        conclusions,
        strength: ArgumentStrength::from_score(score),
        text_analysis: TextStats::from_text(text),
    }
}

fn confidence(analysis: &AnalysisResult, degraded: bool) -> f64 {
    let mut confidence = BASE_CONFIDENCE;
    if analysis.structure.kind != ArgumentType::Unknown {
        confidence += 0.1;
    }
    if !analysis.premises.is_empty() || !analysis.conclusions.is_empty() {
        confidence += 0.1;
    }
    if degraded {
        confidence -= DEGRADED_PENALTY;
    }
    confidence
}
