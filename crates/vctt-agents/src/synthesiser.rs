//! Synthesiser agent: combines the earlier outputs and the module state
//!
//! Two free-text LLM calls (synthesis, then narrative); everything else is
//! derived locally from the context.

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::prompt::PromptBuilder;
use crate::call_llm;
use std::sync::Arc;
use tracing::{debug, info, warn};
use vctt_domain::state::NEUTRAL_TRUST;
use vctt_domain::traits::{Agent, LlmProvider};
use vctt_domain::{
    AgentContext, AgentInput, AgentKind, AgentOutput, ContradictionResolution, Insight,
    InternalState, RegulationMode, StrengthRating, Synthesis, SynthesisResult,
};

/// Synthesis text used when the LLM call fails
pub const SYNTHESIS_FALLBACK: &str = "Synthesis unavailable due to processing error.";

/// Narrative used when the LLM call fails
pub const NARRATIVE_FALLBACK: &str = "Narrative generation unavailable.";

const SYNTHESIS_SOURCES: [&str; 3] = ["analyst", "relational", "original_text"];

const TENSION_INSIGHT_THRESHOLD: f64 = 0.6;
const CONTRADICTION_RESOLUTION_THRESHOLD: f64 = 0.5;
const LOW_TRUST_THRESHOLD: f64 = 0.5;

const MIN_KEY_POINT_CHARS: usize = 20;
const MAX_KEY_POINTS: usize = 5;
const SUMMARY_EXCERPT_CHARS: usize = 150;

/// Synthesises multi-source findings into insights and a narrative
pub struct SynthesiserAgent<L: LlmProvider> {
    llm: Arc<L>,
    config: AgentConfig,
    model_name: String,
}

impl<L> SynthesiserAgent<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a new synthesiser agent
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

    fn synthesize(&self, text: &str, context: &AgentContext) -> Synthesis {
        let prompt = PromptBuilder::synthesis(
            text,
            context.analyst_output.as_ref().map(|o| &o.result),
            context.relational_output.as_ref().map(|o| &o.result),
            self.config.max_prompt_chars,
        )
        .build();
        debug!("Synthesis prompt length: {} chars", prompt.len());

        match call_llm(self.llm.as_ref(), &prompt, None) {
            Ok(text) => Synthesis {
                key_points: key_points(&text),
                sources: SYNTHESIS_SOURCES.iter().map(|s| s.to_string()).collect(),
                text,
            },
            Err(e) => {
                warn!("Synthesis failed: {}", e);
                Synthesis {
                    text: SYNTHESIS_FALLBACK.to_string(),
                    ..Default::default()
                }
            }
        }
    }

    fn narrate(&self, synthesis: &Synthesis, insights: &[Insight]) -> String {
        let prompt = PromptBuilder::narrative(&synthesis.text, insights).build();

        call_llm(self.llm.as_ref(), &prompt, None).unwrap_or_else(|e: AgentError| {
            warn!("Narrative failed: {}", e);
            NARRATIVE_FALLBACK.to_string()
        })
    }
}

impl<L> Agent for SynthesiserAgent<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    type Output = SynthesisResult;
    type Error = AgentError;

    fn kind(&self) -> AgentKind {
        AgentKind::Synthesiser
    }

    fn process(&self, input: &AgentInput) -> Result<AgentOutput<SynthesisResult>, AgentError> {
        info!("Synthesiser processing");

        let context = &input.context;
        let state = context.module_state;

        let synthesis = self.synthesize(&input.text, context);
        let insights = insights(context);
        let narrative = self.narrate(&synthesis, &insights);

        let result = SynthesisResult {
            summary: summary(&synthesis, &insights),
            recommendations: state.as_ref().map(recommendations).unwrap_or_default(),
            contradiction_resolution: state
                .as_ref()
                .map(contradiction_resolution)
                .unwrap_or_default(),
            synthesis,
            insights,
            narrative,
        };

        let trust = state.map(|s| s.trust).unwrap_or(NEUTRAL_TRUST);
        let confidence = confidence(&result, trust);

        info!(
            "Synthesiser complete: {} insights, confidence {:.2}",
            result.insights.len(),
            confidence
        );

        let insight_count = result.insights.len();
        let has_narrative = !result.narrative.is_empty();
        Ok(AgentOutput::new(AgentKind::Synthesiser, result, confidence)
            .with_metadata("model", self.model_name.clone())
            .with_metadata("insight_count", insight_count)
            .with_metadata("has_narrative", has_narrative))
    }
}

fn insights(context: &AgentContext) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Some(analyst) = &context.analyst_output {
        let strength = &analyst.result.strength;
        insights.push(Insight {
            kind: "argument_quality".to_string(),
            insight: format!(
                "The argument is {} with a strength score of {:.2}",
                rating_label(strength.rating),
                strength.score
            ),
            confidence: 0.8,
        });
    }

    if let Some(relational) = &context.relational_output {
        let concept_count = relational.result.concepts.len();
        if concept_count > 0 {
            insights.push(Insight {
                kind: "conceptual_complexity".to_string(),
                insight: format!(
                    "The text involves {} key concepts with interconnected relationships",
                    concept_count
                ),
                confidence: 0.75,
            });
        }
    }

    if let Some(state) = &context.module_state {
        if state.sim.tension > TENSION_INSIGHT_THRESHOLD {
            insights.push(Insight {
                kind: "tension_detection".to_string(),
                insight: "High tension detected in the situational interpretation".to_string(),
                confidence: 0.85,
            });
        }
    }

    insights
}

fn rating_label(rating: StrengthRating) -> &'static str {
    match rating {
        StrengthRating::Strong => "strong",
        StrengthRating::Weak => "weak",
        // Unrated reads as the neutral middle
        StrengthRating::Moderate | StrengthRating::Unrated => "moderate",
    }
}

fn contradiction_resolution(state: &InternalState) -> Vec<ContradictionResolution> {
    if state.contradiction <= CONTRADICTION_RESOLUTION_THRESHOLD {
        return Vec::new();
    }

    vec![ContradictionResolution {
        kind: "logical_contradiction".to_string(),
        description: "Contradictions detected in argument structure".to_string(),
        severity: state.contradiction,
        resolution: "Further clarification needed to resolve logical inconsistencies".to_string(),
    }]
}

fn recommendations(state: &InternalState) -> Vec<String> {
    let mut recommendations = Vec::new();

    match state.regulation.mode {
        RegulationMode::Clarify => recommendations
            .push("Consider providing additional clarification to reduce uncertainty".to_string()),
        RegulationMode::SlowDown => {
            recommendations.push("Take time to process complex information carefully".to_string())
        }
        RegulationMode::Normal => {}
    }

    if state.trust < LOW_TRUST_THRESHOLD {
        recommendations.push("Build trust through transparent reasoning and evidence".to_string());
    }

    recommendations
}

/// Sentences longer than 20 characters, at most five
fn key_points(text: &str) -> Vec<String> {
    text.split(". ")
        .map(|s| s.trim().trim_end_matches('.'))
        .filter(|s| s.chars().count() > MIN_KEY_POINT_CHARS)
        .take(MAX_KEY_POINTS)
        .map(|s| format!("{}.", s))
        .collect()
}

fn summary(synthesis: &Synthesis, insights: &[Insight]) -> String {
    let excerpt: String = synthesis.text.chars().take(SUMMARY_EXCERPT_CHARS).collect();
    format!(
        "Analysis complete with {} key insights. {}...",
        insights.len(),
        excerpt
    )
}

fn confidence(result: &SynthesisResult, trust: f64) -> f64 {
    let mut confidence = 0.7;
    if !result.insights.is_empty() {
        confidence += 0.1;
    }
    if !result.narrative.is_empty() {
        confidence += 0.1;
    }
    (confidence + trust) / 2.0
}
