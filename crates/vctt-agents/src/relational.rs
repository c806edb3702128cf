//! Relational agent: concepts, relationships and a knowledge-graph summary
//!
//! When the LLM fails or returns no concepts, a word-based heuristic supplies
//! concepts and chains neighbouring ones with `related_to` links, so the
//! inference engine always has a graph to work on.

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::parser::{parse_relational_reply, RelationalReply};
use crate::prompt::{PromptBuilder, RELATIONAL_SCHEMA};
use crate::call_llm;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use vctt_domain::traits::{Agent, LlmProvider};
use vctt_domain::{
    AgentInput, AgentKind, AgentOutput, Concept, GraphMetrics, ImplicitRelationship,
    RelationalResult, Relationship,
};

/// Words at or below this many characters are not concepts
const MIN_CONCEPT_CHARS: usize = 4;

/// Word length that maps to full importance
const IMPORTANCE_LENGTH: f64 = 15.0;

const IMPLICIT_CONFIDENCE: f64 = 0.4;

/// Maps concepts and relationships using one structured LLM call
pub struct RelationalAgent<L: LlmProvider> {
    llm: Arc<L>,
    config: AgentConfig,
    model_name: String,
}

impl<L> RelationalAgent<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a new relational agent
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

    fn request_reply(&self, input: &AgentInput) -> Result<RelationalReply, AgentError> {
        let analysis = input.context.analyst_output.as_ref().map(|o| &o.result);
        let prompt =
            PromptBuilder::relational(&input.text, analysis, self.config.max_prompt_chars).build();
        debug!("Relational prompt length: {} chars", prompt.len());

        let response = call_llm(self.llm.as_ref(), &prompt, Some(RELATIONAL_SCHEMA))?;
        parse_relational_reply(&response)
    }

    /// Concepts from the text's long words, in first-occurrence order
    fn heuristic_concepts(&self, text: &str) -> Vec<Concept> {
        let mut seen = HashSet::new();

        text.split_whitespace()
            .map(|word| {
                word.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|word| word.chars().count() > MIN_CONCEPT_CHARS)
            .filter(|word| seen.insert(word.clone()))
            .take(self.config.max_concepts)
            .enumerate()
            .map(|(idx, word)| {
                let importance = word.chars().count() as f64 / IMPORTANCE_LENGTH;
                Concept::new(format!("c_{}", idx), word, importance)
            })
            .collect()
    }

    /// `related_to` links between consecutive concepts
    fn chain_relationships(&self, concepts: &[Concept]) -> Vec<Relationship> {
        concepts
            .windows(2)
            .take(self.config.max_chain_relationships)
            .map(|pair| {
                Relationship::new(pair[0].id.clone(), pair[1].id.clone(), "related_to")
                    .with_description(format!("{} relates to {}", pair[0].name, pair[1].name))
            })
            .collect()
    }

    /// Concept pairs `(i, j)` with `i < j` and no explicit `i -> j` edge
    fn implicit_relationships(
        &self,
        concepts: &[Concept],
        relationships: &[Relationship],
    ) -> Vec<ImplicitRelationship> {
        let explicit: HashSet<(&str, &str)> = relationships
            .iter()
            .map(|r| (r.source.as_str(), r.target.as_str()))
            .collect();

        concepts
            .iter()
            .enumerate()
            .flat_map(move |(i, first)| concepts[i + 1..].iter().map(move |second| (first, second)))
            .filter(|(first, second)| !explicit.contains(&(first.id.as_str(), second.id.as_str())))
            .take(self.config.max_implicit)
            .map(|(first, second)| ImplicitRelationship {
                source: first.id.clone(),
                target: second.id.clone(),
                kind: "implicit".to_string(),
                confidence: IMPLICIT_CONFIDENCE,
                description: format!(
                    "Implicit connection between {} and {}",
                    first.name, second.name
                ),
            })
            .collect()
    }
}

impl<L> Agent for RelationalAgent<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    type Output = RelationalResult;
    type Error = AgentError;

    fn kind(&self) -> AgentKind {
        AgentKind::Relational
    }

    fn process(&self, input: &AgentInput) -> Result<AgentOutput<RelationalResult>, AgentError> {
        info!("Relational agent processing {} chars", input.text.len());

        let reply = match self.request_reply(input) {
            Ok(reply) if !reply.concepts.is_empty() => Some(reply),
            Ok(_) => {
                warn!("LLM returned no concepts, using heuristic extraction");
                None
            }
            Err(e) => {
                warn!("Relational agent falling back to heuristics: {}", e);
                None
            }
        };

        let heuristic = reply.is_none();
        let (concepts, relationships) = match reply {
            Some(reply) => (reply.concepts, reply.relationships),
            None => {
                let concepts = self.heuristic_concepts(&input.text);
                let relationships = self.chain_relationships(&concepts);
                (concepts, relationships)
            }
        };

        let known: HashSet<&str> = concepts.iter().map(|c| c.id.as_str()).collect();
        let total = relationships.len();
        let relationships: Vec<Relationship> = relationships
            .into_iter()
            .filter(|r| known.contains(r.source.as_str()) && known.contains(r.target.as_str()))
            .collect();
        if relationships.len() < total {
            warn!(
                "Dropped {} relationships with unknown endpoints",
                total - relationships.len()
            );
        }

        let implicit_relationships = self.implicit_relationships(&concepts, &relationships);
        let result = RelationalResult {
            graph_metrics: GraphMetrics::from_counts(concepts.len(), relationships.len()),
            concepts,
            relationships,
            implicit_relationships,
        };
        let confidence = confidence(&result);

        info!(
            "Relational agent complete: {} concepts, {} relationships, confidence {:.2}",
            result.graph_metrics.node_count, result.graph_metrics.edge_count, confidence
        );

        let concept_count = result.graph_metrics.node_count;
        let relationship_count = result.graph_metrics.edge_count;
        Ok(AgentOutput::new(AgentKind::Relational, result, confidence)
            .with_metadata("model", self.model_name.clone())
            .with_metadata("concept_count", concept_count)
            .with_metadata("relationship_count", relationship_count)
            .with_metadata("heuristic", heuristic))
    }
}

fn confidence(result: &RelationalResult) -> f64 {
    let mut confidence = 0.6;
    if !result.concepts.is_empty() {
        confidence += 0.15;
    }
    if !result.relationships.is_empty() {
        confidence += 0.15;
    }
    if !result.implicit_relationships.is_empty() {
        confidence += 0.1;
    }
    confidence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::RELATIONAL_MARKER;
    use vctt_domain::AgentContext;
    use vctt_llm::MockProvider;

    fn agent(llm: MockProvider) -> RelationalAgent<MockProvider> {
        RelationalAgent::new(Arc::new(llm), AgentConfig::default())
    }

    #[test]
    fn test_llm_concepts() {
        let llm = MockProvider::default().with_response(
            RELATIONAL_MARKER,
            r#"{
                "concepts": [
                    {"id": "a", "name": "trust"},
                    {"id": "b", "name": "evidence"},
                    {"id": "c", "name": "reasoning"}
                ],
                "relationships": [
                    {"source": "b", "target": "a", "type": "supports"},
                    {"source": "c", "target": "a", "type": "builds"},
                    {"source": "a", "target": "zz", "type": "dangling"}
                ]
            }"#,
        );

        let output = agent(llm).process(&AgentInput::new("text")).unwrap();
        let result = &output.result;

        assert_eq!(result.concepts.len(), 3);
        assert_eq!(result.relationships.len(), 2);
        assert_eq!(result.graph_metrics.density, 2.0 / 3.0);
        assert_eq!(result.implicit_relationships.len(), 3);
        assert_eq!(output.metadata["heuristic"], false);
        assert!((output.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_heuristic_fallback() {
        let llm = MockProvider::default().with_error(RELATIONAL_MARKER);
        let text = "Climate policy shapes energy markets. Energy markets shape climate policy!";

        let output = agent(llm).process(&AgentInput::new(text)).unwrap();
        let names: Vec<_> = output.result.concepts.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["climate", "policy", "shapes", "energy", "markets", "shape"]
        );
        assert_eq!(output.result.concepts[0].id, "c_0");
        assert!((output.result.concepts[0].importance - 7.0 / 15.0).abs() < 1e-9);

        let rels = &output.result.relationships;
        assert_eq!(rels.len(), 5);
        assert_eq!(rels[0].source, "c_0");
        assert_eq!(rels[0].target, "c_1");
        assert_eq!(rels[0].kind, "related_to");
        assert_eq!(rels[0].description, "climate relates to policy");
        assert_eq!(output.metadata["heuristic"], true);
    }

    #[test]
    fn test_empty_concepts_use_heuristic() {
        let llm = MockProvider::new(r#"{"concepts": [], "relationships": []}"#);
        let output = agent(llm)
            .process(&AgentInput::new("Distributed systems"))
            .unwrap();
        assert_eq!(output.result.concepts.len(), 2);
        assert_eq!(output.result.relationships.len(), 1);
    }

    #[test]
    fn test_heuristic_caps() {
        let words: Vec<String> = (0..30).map(|i| format!("concept{:02}", i)).collect();
        let relational = agent(MockProvider::default());

        let concepts = relational.heuristic_concepts(&words.join(" "));
        assert_eq!(concepts.len(), 10);
        assert_eq!(concepts[9].id, "c_9");
        assert_eq!(relational.chain_relationships(&concepts).len(), 5);
    }

    #[test]
    fn test_short_text_yields_empty_graph() {
        let output = agent(MockProvider::new("not json"))
            .process(&AgentInput::new("a big cat"))
            .unwrap();

        assert!(output.result.concepts.is_empty());
        assert_eq!(output.result.graph_metrics, GraphMetrics::default());
        assert!((output.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_implicit_skips_explicit_pairs() {
        let relational = agent(MockProvider::default());
        let concepts = vec![
            Concept::new("a", "alpha", 0.5),
            Concept::new("b", "beta", 0.5),
            Concept::new("c", "gamma", 0.5),
        ];
        let relationships = vec![Relationship::new("a", "b", "causes")];

        let implicit = relational.implicit_relationships(&concepts, &relationships);
        let pairs: Vec<_> = implicit
            .iter()
            .map(|r| (r.source.as_str(), r.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "c"), ("b", "c")]);
        assert_eq!(implicit[0].confidence, IMPLICIT_CONFIDENCE);
    }

    #[test]
    fn test_prompt_uses_analyst_context() {
        let llm = Arc::new(MockProvider::new("{}"));
        let relational = RelationalAgent::new(Arc::clone(&llm), AgentConfig::default());

        let mut analysis = vctt_domain::AnalysisResult::default();
        analysis.premises = vec!["Premises matter".to_string()];
        let input = AgentInput::new("text").with_context(AgentContext {
            analyst_output: Some(AgentOutput::new(AgentKind::Analyst, analysis, 0.8)),
            ..Default::default()
        });

        relational.process(&input).unwrap();
        assert!(llm.prompts()[0].contains("Premise: Premises matter"));
    }
}
