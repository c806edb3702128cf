//! Integration tests across the three agents

#[cfg(test)]
mod tests {
    use crate::{
        AgentConfig, AnalystAgent, RelationalAgent, SynthesiserAgent, ANALYST_MARKER,
        NARRATIVE_MARKER, RELATIONAL_MARKER, SYNTHESIS_MARKER,
    };
    use std::sync::Arc;
    use vctt_domain::traits::Agent;
    use vctt_domain::{AgentContext, AgentInput, InternalState, RegulationMode, RegulationState};
    use vctt_llm::MockProvider;

    fn scripted_provider() -> Arc<MockProvider> {
        Arc::new(
            MockProvider::default()
                .with_response(
                    ANALYST_MARKER,
                    r#"{
                        "structure": {"type": "inductive", "validity": "uncertain"},
                        "fallacies": ["hasty generalization"],
                        "premises": ["Every swan I have seen is white"],
                        "conclusions": ["All swans are white"]
                    }"#,
                )
                .with_response(
                    RELATIONAL_MARKER,
                    r#"```json
                    {
                        "concepts": [
                            {"id": "c_0", "name": "swan", "importance": 0.9},
                            {"id": "c_1", "name": "colour", "importance": 0.6}
                        ],
                        "relationships": [
                            {"source": "c_0", "target": "c_1", "type": "has_property"}
                        ]
                    }
                    ```"#,
                )
                .with_response(
                    SYNTHESIS_MARKER,
                    "The claim generalises from limited observation. More evidence is needed before accepting it.",
                )
                .with_response(NARRATIVE_MARKER, "The text leaps from a few swans to all swans."),
        )
    }

    #[test]
    fn test_full_agent_flow() {
        let llm = scripted_provider();
        let config = AgentConfig::default();
        let text = "Every swan I have seen is white, so all swans are white.";

        let analyst = AnalystAgent::new(Arc::clone(&llm), config.clone());
        let relational = RelationalAgent::new(Arc::clone(&llm), config.clone());
        let synthesiser = SynthesiserAgent::new(Arc::clone(&llm), config);

        let analysis = analyst.process(&AgentInput::new(text)).unwrap();
        assert_eq!(analysis.result.fallacies.len(), 1);
        assert_eq!(analysis.result.premises.len(), 1);

        let relational_input = AgentInput::new(text).with_context(AgentContext {
            analyst_output: Some(analysis.clone()),
            ..Default::default()
        });
        let relations = relational.process(&relational_input).unwrap();
        assert_eq!(relations.result.concepts.len(), 2);
        assert_eq!(relations.metadata["heuristic"], false);

        let state = InternalState {
            regulation: RegulationState {
                mode: RegulationMode::Clarify,
            },
            ..Default::default()
        };
        let synthesis_input = AgentInput::new(text).with_context(AgentContext {
            user_id: Some("user-1".to_string()),
            analyst_output: Some(analysis),
            relational_output: Some(relations),
            module_state: Some(state),
        });
        let synthesis = synthesiser.process(&synthesis_input).unwrap();

        assert_eq!(synthesis.result.insights.len(), 2);
        assert_eq!(synthesis.result.synthesis.key_points.len(), 2);
        assert_eq!(
            synthesis.result.narrative,
            "The text leaps from a few swans to all swans."
        );
        assert_eq!(synthesis.result.recommendations.len(), 1);

        // One call per agent for analyst and relational, two for the synthesiser
        assert_eq!(llm.call_count(), 4);
    }

    #[test]
    fn test_unreachable_llm_still_produces_outputs() {
        let llm = Arc::new(
            MockProvider::default()
                .with_error(ANALYST_MARKER)
                .with_error(RELATIONAL_MARKER)
                .with_error(SYNTHESIS_MARKER)
                .with_error(NARRATIVE_MARKER),
        );
        let config = AgentConfig::compact();
        let text = "Renewable energy lowers long term household costs.";

        let analysis = AnalystAgent::new(Arc::clone(&llm), config.clone())
            .process(&AgentInput::new(text))
            .unwrap();
        let relations = RelationalAgent::new(Arc::clone(&llm), config.clone())
            .process(&AgentInput::new(text))
            .unwrap();
        let synthesis = SynthesiserAgent::new(Arc::clone(&llm), config)
            .process(&AgentInput::new(text))
            .unwrap();

        assert_eq!(analysis.metadata["degraded"], true);
        assert_eq!(relations.metadata["heuristic"], true);
        assert!(!relations.result.concepts.is_empty());
        assert_eq!(synthesis.result.synthesis.text, crate::SYNTHESIS_FALLBACK);
        assert_eq!(synthesis.result.narrative, crate::NARRATIVE_FALLBACK);
    }

    #[test]
    fn test_config_limits_prompt_size() {
        let llm = Arc::new(MockProvider::new("{}"));
        let config = AgentConfig {
            max_prompt_chars: 10,
            ..Default::default()
        };
        let text = "x".repeat(500);

        AnalystAgent::new(Arc::clone(&llm), config)
            .process(&AgentInput::new(text))
            .unwrap();

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains(&format!("{}...", "x".repeat(10))));
        assert!(!prompt.contains(&"x".repeat(11)));
    }
}
