// system-tests/tests/suites/boundaries.rs
// ============================================================================
// Module: Governance Boundaries
// Description: The defined-not-erroring edge cases every component commits
//              to: no matching rule, a decision with no class, advisory
//              mode, and an empty trace tail.
// Purpose: Lock in behavior that is easy to regress silently because it
//          never raises an error — it just has to degrade the right way.
// Dependencies: george-runtime, george-gate, george-consistency, helpers
// ============================================================================

use george_consistency::ValidationMode;
use george_core::AgentRegistry;
use george_core::AuthorityMatrix;
use george_core::HealthState;
use george_gate::REASON_MISSING_DECISION_CLASS;
use george_gate::evaluate;
use george_core::GateVerdict;
use george_runtime::OrchestrateOutcome;
use george_runtime::Orchestrator;
use george_runtime::SimulatedExecutor;
use george_store::FsArtifactStore;
use serde_json::json;
use std::fs;

use crate::helpers::fixtures;

/// No rule matches the event, so the Orchestrator falls back to
/// `(agent=event.agent, action=event.event, confidence=0.5)` rather than
/// erroring.
#[test]
fn an_unmatched_event_falls_back_to_half_confidence() {
    let (_dir, paths) = fixtures::workspace();
    let store = FsArtifactStore::new();
    let executor = SimulatedExecutor;
    let orchestrator = Orchestrator::new(&store, &executor);

    let rules = Vec::new();
    let agents = AgentRegistry::new();
    let authority = AuthorityMatrix::default();

    let outcome = orchestrator
        .orchestrate(
            &fixtures::event("unregistered", "unknown_event", None),
            &rules,
            &agents,
            &authority,
            &paths,
            HealthState::default(),
            fixtures::ts(),
        )
        .expect("orchestrate");

    let OrchestrateOutcome::Processed { decision, .. } = outcome else {
        panic!("event should not hit the emergency lock");
    };
    assert_eq!(decision.agent.as_str(), "unregistered");
    assert_eq!(decision.action, "unknown_event");
    assert!((decision.confidence - 0.5).abs() < 1e-9);
}

/// A decision with no `decision_class` at all is blocked with the exact
/// reason text other tools may match on, never treated as an error.
#[test]
fn a_decision_missing_its_class_blocks_with_the_documented_reason() {
    let policy_yaml = "
enforcement:
  mode: enforcing
  default_action: BLOCK
  allow_human_override: true
thresholds:
  min_health_score: 0.5
";
    let policy: george_policy::GatePolicy = serde_yaml::from_str(policy_yaml).expect("parse policy");

    let decision = json!({
        "id": "11111111-1111-1111-1111-111111111111",
        "signals": {"system_health_score": 0.9},
    });

    let result = evaluate(&decision, &policy);
    assert_eq!(result.verdict, GateVerdict::Block);
    assert_eq!(result.verdict.exit_code(), 20);
    assert_eq!(result.decision_class, "unknown");
    assert!(result.reasons.iter().any(|reason| reason == REASON_MISSING_DECISION_CLASS));
}

/// Under `advisory` mode, a class failure that would otherwise `BLOCK` is
/// downgraded to `ESCALATE`: advisory mode never hard-blocks anything.
#[test]
fn advisory_mode_never_returns_block() {
    let policy_yaml = "
enforcement:
  mode: advisory
  default_action: BLOCK
  allow_human_override: true
thresholds:
  min_health_score: 0.8
";
    let policy: george_policy::GatePolicy = serde_yaml::from_str(policy_yaml).expect("parse policy");

    let decision = json!({
        "id": "11111111-1111-1111-1111-111111111111",
        "decision_class": "operational",
        "signals": {"system_health_score": 0.1},
    });

    let result = evaluate(&decision, &policy);
    assert_eq!(result.verdict, GateVerdict::Escalate);
    assert_eq!(result.verdict.exit_code(), 10);
    assert!(result.reasons.iter().any(|reason| reason.contains("downgraded from BLOCK to ESCALATE")));
}

/// An empty decision trace tail window (no trace file at all) fails
/// `CNS-TRACE-002` rather than being treated as a tool error.
#[test]
fn an_empty_trace_tail_fails_consistency_with_the_trace_code() {
    let (dir, paths) = fixtures::workspace();
    let store = FsArtifactStore::new();
    fs::write(&paths.gate_result, r#"{"verdict":"ALLOW"}"#).expect("seed gate result");
    fs::write(&paths.latest_decision, r#"{"id":"d1"}"#).expect("seed latest");
    fs::write(
        &paths.system_status,
        format!(
            r#"{{"generated_at":"2026-07-29T00:00:00Z","environment":"local","system":{{"state":"running","mode":"enforcing"}},"health":{{"signal":"healthy","overall_score":0.9}},"agents":{{}},"links":{{"decision_trace":"{}","gate_result":"{}","latest":"{}"}}}}"#,
            paths.decision_trace.display(),
            paths.gate_result.display(),
            paths.latest_decision.display(),
        ),
    )
    .expect("seed status");

    let rules_yaml = "
tail_window: 20
health_signals: [healthy, degraded, critical, unknown]
gate_verdicts: [ALLOW, ESCALATE, BLOCK]
agent_states: [active, planned, paused, inactive]
";
    let rules_path = fixtures::write_consistency_rules(dir.path(), rules_yaml);
    let report_path = dir.path().join("consistency_report.json");

    let report = george_consistency::run(&store, &paths, &rules_path, &report_path, ValidationMode::Local, fixtures::ts())
        .expect("consistency run");

    assert_eq!(report.exit_code(), 2);
    assert!(
        report
            .findings
            .iter()
            .any(|finding| finding.code == george_consistency::codes::TRACE_EMPTY_TAIL
                && finding.level == george_consistency::FindingLevel::Fail)
    );
}
