//! LLM prompt engineering for the three agents
//!
//! Every prompt opens with a task marker line. Providers ignore it; test
//! doubles key their scripted replies on it.

use vctt_domain::{AnalysisResult, Insight, RelationalResult};

/// First line of the analyst prompt
pub const ANALYST_MARKER: &str = "Task: argument analysis";

/// First line of the relational prompt
pub const RELATIONAL_MARKER: &str = "Task: concept mapping";

/// First line of the synthesis prompt
pub const SYNTHESIS_MARKER: &str = "Task: synthesis";

/// First line of the narrative prompt
pub const NARRATIVE_MARKER: &str = "Task: narrative";

/// Builds a prompt from a task marker, instructions, context lines and a body
pub struct PromptBuilder {
    marker: &'static str,
    instructions: &'static str,
    context: Vec<String>,
    body_label: &'static str,
    body: String,
    output_format: Option<&'static str>,
}

impl PromptBuilder {
    fn new(marker: &'static str, instructions: &'static str, body_label: &'static str, body: String) -> Self {
        Self {
            marker,
            instructions,
            context: Vec::new(),
            body_label,
            body,
            output_format: None,
        }
    }

    /// Prompt asking for argument structure, fallacies, premises and conclusions
    pub fn analyst(text: &str, max_chars: usize) -> Self {
        let mut builder = Self::new(
            ANALYST_MARKER,
            ANALYST_INSTRUCTIONS,
            "Text to analyze",
            excerpt(text, max_chars),
        );
        builder.output_format = Some(ANALYST_OUTPUT_FORMAT);
        builder
    }

    /// Prompt asking for concepts and relationships, with the analysis as context
    pub fn relational(text: &str, analysis: Option<&AnalysisResult>, max_chars: usize) -> Self {
        let mut builder = Self::new(
            RELATIONAL_MARKER,
            RELATIONAL_INSTRUCTIONS,
            "Text to analyze",
            excerpt(text, max_chars),
        );
        if let Some(analysis) = analysis {
            builder = builder
                .with_context_line(format!(
                    "Argument type: {}",
                    serde_label(&analysis.structure.kind)
                ))
                .with_context_lines(analysis.premises.iter().map(|p| format!("Premise: {}", p)))
                .with_context_lines(
                    analysis
                        .conclusions
                        .iter()
                        .map(|c| format!("Conclusion: {}", c)),
                );
        }
        builder.output_format = Some(RELATIONAL_OUTPUT_FORMAT);
        builder
    }

    /// Prompt asking for a synthesis of the text and the earlier findings
    pub fn synthesis(
        text: &str,
        analysis: Option<&AnalysisResult>,
        relational: Option<&RelationalResult>,
        max_chars: usize,
    ) -> Self {
        let mut builder = Self::new(
            SYNTHESIS_MARKER,
            SYNTHESIS_INSTRUCTIONS,
            "Original text",
            excerpt(text, max_chars),
        );

        if let Some(analysis) = analysis {
            builder = builder
                .with_context_line(format!(
                    "Argument type: {}",
                    serde_label(&analysis.structure.kind)
                ))
                .with_context_line(format!(
                    "Strength: {}",
                    serde_label(&analysis.strength.rating)
                ))
                .with_context_line(format!("Fallacies: {}", analysis.fallacies.len()));
        }
        if let Some(relational) = relational {
            builder = builder
                .with_context_line(format!(
                    "Concepts: {}",
                    relational.graph_metrics.node_count
                ))
                .with_context_line(format!(
                    "Relationships: {}",
                    relational.graph_metrics.edge_count
                ));
        }

        builder
    }

    /// Prompt asking for a plain-language narrative of the synthesis and insights
    pub fn narrative(synthesis_text: &str, insights: &[Insight]) -> Self {
        Self::new(
            NARRATIVE_MARKER,
            NARRATIVE_INSTRUCTIONS,
            "Synthesis",
            synthesis_text.to_string(),
        )
        .with_context_lines(insights.iter().map(|i| format!("Insight: {}", i.insight)))
    }

    /// Add one context line
    pub fn with_context_line(mut self, line: impl Into<String>) -> Self {
        self.context.push(line.into());
        self
    }

    /// Add several context lines
    pub fn with_context_lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.context.extend(lines);
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(self.marker);
        prompt.push('\n');
        prompt.push_str(self.instructions);
        prompt.push_str("\n\n");

        if !self.context.is_empty() {
            prompt.push_str("Context:\n");
            for line in &self.context {
                prompt.push_str("- ");
                prompt.push_str(line);
                prompt.push('\n');
            }
            prompt.push('\n');
        }

        prompt.push_str(self.body_label);
        prompt.push_str(":\n---\n");
        prompt.push_str(&self.body);
        prompt.push_str("\n---\n");

        if let Some(format) = self.output_format {
            prompt.push('\n');
            prompt.push_str(format);
        }

        prompt
    }
}

/// At most `max_chars` characters of `text`, marked when cut
fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Wire name of a unit enum variant
fn serde_label<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

/// JSON schema hint for the analyst reply
pub(crate) const ANALYST_SCHEMA: &str = r#"{"structure": {"type": "string", "validity": "string", "soundness": "string"}, "fallacies": [{"type": "string", "description": "string"}], "premises": ["string"], "conclusions": ["string"]}"#;

/// JSON schema hint for the relational reply
pub(crate) const RELATIONAL_SCHEMA: &str = r#"{"concepts": [{"id": "string", "name": "string", "type": "string", "importance": "number"}], "relationships": [{"source": "string", "target": "string", "type": "string", "description": "string"}]}"#;

const ANALYST_INSTRUCTIONS: &str = r#"You are an expert in argument analysis and logical fallacies.
Analyze the logical structure of the text below.

Rules:
- type is one of: deductive, inductive, abductive, unknown
- validity is one of: valid, invalid, uncertain
- soundness is one of: sound, unsound, uncertain
- List every logical fallacy you find (e.g. ad hominem, strawman, false dilemma,
  slippery slope, circular reasoning, hasty generalization, appeal to authority)
- Quote premises and conclusions as short sentences"#;

const ANALYST_OUTPUT_FORMAT: &str = r#"Output format (JSON object only, no additional text):
{
  "structure": {"type": "deductive", "validity": "valid", "soundness": "uncertain"},
  "fallacies": [{"type": "strawman", "description": "why it applies"}],
  "premises": ["..."],
  "conclusions": ["..."]
}"#;

const RELATIONAL_INSTRUCTIONS: &str = r#"Extract the key concepts in the text below and the relationships between them.

Rules:
- Give each concept a short unique id (e.g. "c_0") and a lowercase name
- Importance is a number between 0.0 and 1.0
- Relationships are directed and reference concept ids
- Use a short snake_case relationship type (e.g. "causes", "supports", "part_of")"#;

const RELATIONAL_OUTPUT_FORMAT: &str = r#"Output format (JSON object only, no additional text):
{
  "concepts": [{"id": "c_0", "name": "...", "type": "concept", "importance": 0.8}],
  "relationships": [{"source": "c_0", "target": "c_1", "type": "supports", "description": "..."}]
}"#;

const SYNTHESIS_INSTRUCTIONS: &str =
    "You are an expert synthesizer. Create a comprehensive synthesis of the text and the findings below.";

const NARRATIVE_INSTRUCTIONS: &str =
    "Create a coherent narrative that explains the analysis results in clear, accessible language.";

#[cfg(test)]
mod tests {
    use super::*;
    use vctt_domain::{ArgumentType, Fallacy, GraphMetrics};

    #[test]
    fn test_prompt_starts_with_marker() {
        let prompt = PromptBuilder::analyst("Some text", 100).build();
        assert!(prompt.starts_with(ANALYST_MARKER));
        assert!(prompt.contains("Some text"));
        assert!(prompt.contains("Output format"));
    }

    #[test]
    fn test_excerpt_cuts_on_char_boundary() {
        assert_eq!(excerpt("héllo wörld", 5), "héllo...");
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("exact", 5), "exact");
    }

    #[test]
    fn test_relational_prompt_includes_analysis() {
        let mut analysis = AnalysisResult::default();
        analysis.structure.kind = ArgumentType::Inductive;
        analysis.premises = vec!["Swans seen so far are white".to_string()];

        let prompt = PromptBuilder::relational("text", Some(&analysis), 100).build();
        assert!(prompt.starts_with(RELATIONAL_MARKER));
        assert!(prompt.contains("Argument type: inductive"));
        assert!(prompt.contains("Premise: Swans seen so far are white"));
    }

    #[test]
    fn test_relational_prompt_without_context() {
        let prompt = PromptBuilder::relational("text", None, 100).build();
        assert!(!prompt.contains("Context:"));
    }

    #[test]
    fn test_synthesis_prompt_summarises_findings() {
        let analysis = AnalysisResult {
            fallacies: vec![Fallacy::new("strawman")],
            ..Default::default()
        };
        let relational = RelationalResult {
            graph_metrics: GraphMetrics::from_counts(4, 2),
            ..Default::default()
        };

        let prompt =
            PromptBuilder::synthesis("text", Some(&analysis), Some(&relational), 100).build();
        assert!(prompt.contains("Fallacies: 1"));
        assert!(prompt.contains("Strength: unrated"));
        assert!(prompt.contains("Concepts: 4"));
        assert!(prompt.contains("Relationships: 2"));
        assert!(!prompt.contains("Output format"));
    }

    #[test]
    fn test_narrative_prompt_lists_insights() {
        let insights = vec![Insight {
            kind: "argument_quality".to_string(),
            insight: "The argument is weak".to_string(),
            confidence: 0.8,
        }];

        let prompt = PromptBuilder::narrative("A synthesis.", &insights).build();
        assert!(prompt.starts_with(NARRATIVE_MARKER));
        assert!(prompt.contains("Insight: The argument is weak"));
        assert!(prompt.contains("A synthesis."));
    }

    #[test]
    fn test_markers_are_distinct() {
        let markers = [ANALYST_MARKER, RELATIONAL_MARKER, SYNTHESIS_MARKER, NARRATIVE_MARKER];
        for (i, a) in markers.iter().enumerate() {
            for b in markers.iter().skip(i + 1) {
                assert!(!a.contains(b) && !b.contains(a));
            }
        }
    }
}
