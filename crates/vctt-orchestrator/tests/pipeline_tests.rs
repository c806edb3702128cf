//! End-to-end pipeline tests against scripted agents

use std::sync::Arc;
use std::time::Duration;
use vctt_agents::{
    AgentConfig, AnalystAgent, SynthesiserAgent, ANALYST_MARKER, NARRATIVE_MARKER,
    RELATIONAL_MARKER, SYNTHESIS_MARKER,
};
use vctt_domain::traits::Agent;
use vctt_domain::{
    AgentInput, AgentKind, AgentOutput, InternalState, RegulationMode, RelationalResult,
};
use vctt_llm::MockProvider;
use vctt_orchestrator::{Orchestrator, OrchestratorConfig, PipelineResponse};

const CIRCULAR_TEXT: &str = "The plan is good because the plan is good.";

fn scripted_provider() -> MockProvider {
    MockProvider::default()
        .with_response(
            ANALYST_MARKER,
            r#"{
                "structure": {"type": "deductive", "validity": "invalid", "soundness": "unsound"},
                "fallacies": [{"type": "circular reasoning", "description": "restates the claim"}],
                "premises": ["The plan is good"],
                "conclusions": ["The plan is good"]
            }"#,
        )
        .with_response(
            RELATIONAL_MARKER,
            r#"{
                "concepts": [
                    {"id": "a", "name": "plan"},
                    {"id": "b", "name": "goodness"},
                    {"id": "c", "name": "approval"}
                ],
                "relationships": [
                    {"source": "a", "target": "b", "type": "has_property"},
                    {"source": "b", "target": "c", "type": "leads_to"}
                ]
            }"#,
        )
        .with_response(
            SYNTHESIS_MARKER,
            "The argument assumes what it sets out to prove. No independent support is offered.",
        )
        .with_response(NARRATIVE_MARKER, "The text goes round in a circle.")
}

/// Relational stand-in that always fails
struct FailingRelational;

impl Agent for FailingRelational {
    type Output = RelationalResult;
    type Error = String;

    fn kind(&self) -> AgentKind {
        AgentKind::Relational
    }

    fn process(&self, _input: &AgentInput) -> Result<AgentOutput<RelationalResult>, String> {
        Err("graph backend unavailable".to_string())
    }
}

/// Relational stand-in that outlives any one-second timeout
struct SlowRelational;

impl Agent for SlowRelational {
    type Output = RelationalResult;
    type Error = String;

    fn kind(&self) -> AgentKind {
        AgentKind::Relational
    }

    fn process(&self, _input: &AgentInput) -> Result<AgentOutput<RelationalResult>, String> {
        std::thread::sleep(Duration::from_millis(1500));
        Ok(AgentOutput::new(
            AgentKind::Relational,
            RelationalResult::default(),
            0.6,
        ))
    }
}

#[tokio::test]
async fn test_full_pipeline() {
    let llm = Arc::new(scripted_provider());
    let mut orchestrator = Orchestrator::with_provider(
        Arc::clone(&llm),
        AgentConfig::default(),
        OrchestratorConfig::default(),
    );

    let response = orchestrator
        .process(CIRCULAR_TEXT, Some("user-7".to_string()), Some("session-1".to_string()))
        .await;

    let data = match &response {
        PipelineResponse::Success { data } => data,
        PipelineResponse::Error { error } => panic!("Pipeline failed: {}", error.message),
    };

    // Invalid, unsound and circular: (0.7 + 0.6 + 0.65) / 3 * 1.2
    let cam = &data.module_details.cam;
    assert_eq!(cam.contradictions.len(), 3);
    assert!((cam.contradiction_score - 0.78).abs() < 1e-9);
    assert_eq!(data.internal_state.regulation.mode, RegulationMode::SlowDown);
    assert!(data.module_details.sre.mode_changed);

    let ril = &data.module_details.ril;
    assert_eq!(ril.inferred_relationships.len(), 1);
    assert_eq!(ril.inferred_relationships[0].source, "a");
    assert_eq!(ril.inferred_relationships[0].target, "c");
    assert_eq!(ril.key_concepts[0].id, "b");
    assert_eq!(ril.graph_structure.inferred_edges, 1);

    let synthesis = &data.analysis.synthesis.result;
    assert_eq!(synthesis.narrative, "The text goes round in a circle.");
    assert_eq!(synthesis.contradiction_resolution.len(), 1);
    assert!(!synthesis.recommendations.is_empty());

    assert_eq!(data.session_id.as_deref(), Some("session-1"));
    assert_eq!(data.metadata.agents_used.len(), 3);
    assert_eq!(data.metadata.modules_executed.len(), 5);
    assert_eq!(llm.call_count(), 4);
}

#[tokio::test]
async fn test_response_wire_shape() {
    let mut orchestrator = Orchestrator::with_provider(
        Arc::new(scripted_provider()),
        AgentConfig::default(),
        OrchestratorConfig::default(),
    );

    let response = orchestrator.process(CIRCULAR_TEXT, None, None).await;
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["status"], "success");
    let data = &json["data"];
    assert!(data["session_id"].is_null());
    assert_eq!(data["analysis"]["analyst_output"]["agent_type"], "analyst");
    assert_eq!(data["analysis"]["relational_output"]["agent_type"], "relational");
    assert_eq!(data["analysis"]["synthesis"]["agent_type"], "synthesiser");
    assert_eq!(data["internal_state"]["regulation"]["mode"], "slow_down");
    assert_eq!(data["module_details"]["cam"]["contradictions"][0]["type"], "logical");
    assert_eq!(data["metadata"]["modules_executed"][4], "ril");
}

#[tokio::test]
async fn test_failing_agent_commits_nothing() {
    let llm = Arc::new(scripted_provider());
    let mut orchestrator = Orchestrator::new(
        AnalystAgent::new(Arc::clone(&llm), AgentConfig::default()),
        FailingRelational,
        SynthesiserAgent::new(Arc::clone(&llm), AgentConfig::default()),
        OrchestratorConfig::default(),
    );

    let response = orchestrator.process(CIRCULAR_TEXT, None, None).await;
    let error = response.error().unwrap();

    assert_eq!(error.kind, "AgentError");
    assert!(error.message.contains("graph backend unavailable"));

    // Modules ran on the working copy only
    assert_eq!(orchestrator.internal_state(), InternalState::default());
    assert!(orchestrator.trust_history().is_empty());
    assert!(orchestrator.regulation_history().is_empty());
}

#[tokio::test]
async fn test_slow_agent_times_out() {
    let llm = Arc::new(scripted_provider());
    let config = OrchestratorConfig {
        producer_timeout_secs: 1,
        ..Default::default()
    };
    let mut orchestrator = Orchestrator::new(
        AnalystAgent::new(Arc::clone(&llm), AgentConfig::default()),
        SlowRelational,
        SynthesiserAgent::new(Arc::clone(&llm), AgentConfig::default()),
        config,
    );

    let response = orchestrator.process(CIRCULAR_TEXT, None, None).await;
    let error = response.error().unwrap();

    assert_eq!(error.kind, "Timeout");
    assert_eq!(error.message, "relational agent timed out");
    assert_eq!(orchestrator.internal_state(), InternalState::default());
}

#[tokio::test]
async fn test_text_too_long() {
    let llm = Arc::new(scripted_provider());
    let config = OrchestratorConfig {
        max_text_length: 10,
        ..Default::default()
    };
    let mut orchestrator =
        Orchestrator::with_provider(Arc::clone(&llm), AgentConfig::default(), config);

    let response = orchestrator.process(CIRCULAR_TEXT, None, None).await;
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["type"], "TextTooLong");
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_histories_accumulate_across_runs() {
    let mut orchestrator = Orchestrator::with_provider(
        Arc::new(scripted_provider()),
        AgentConfig::default(),
        OrchestratorConfig::default(),
    );

    orchestrator.process(CIRCULAR_TEXT, None, None).await;
    let second = orchestrator.process(CIRCULAR_TEXT, None, None).await;

    assert_eq!(orchestrator.trust_history().len(), 2);
    // Same signals twice: one transition into slow_down, none after
    assert_eq!(orchestrator.regulation_history().len(), 1);
    assert!(!second.data().unwrap().module_details.sre.mode_changed);
}

#[tokio::test]
async fn test_reset_state() {
    let mut orchestrator = Orchestrator::with_provider(
        Arc::new(scripted_provider()),
        AgentConfig::default(),
        OrchestratorConfig::default(),
    );

    orchestrator.process(CIRCULAR_TEXT, None, None).await;
    assert_eq!(orchestrator.internal_state().regulation.mode, RegulationMode::SlowDown);

    orchestrator.reset_state();
    let state = orchestrator.internal_state();
    assert_eq!(state, InternalState::default());
    assert_eq!(state.trust, 0.5);
    assert_eq!(state.contradiction, 0.0);
}
