// system-tests/tests/suites/scenarios.rs
// ============================================================================
// Module: Governance Scenarios
// Description: The six end-to-end scenarios every George deployment must
//              satisfy: happy path, Guardian block, human authority,
//              low health, a self-healed regression, and a consistency
//              failure.
// Purpose: Drive the real Orchestrator/Gate/Validator/Self-Healing crates
//          against fixture trees, not mocks, so a scenario failing here
//          means the actual pipeline is wrong.
// Dependencies: george-runtime, george-gate, george-consistency,
//               george-selfheal, george-store, helpers
// ============================================================================

use george_consistency::ValidationMode;
use george_core::AgentRegistry;
use george_core::AuthorityMatrix;
use george_core::HealthState;
use george_core::authority::Approver;
use george_core::authority::ClassAuthority;
use george_core::decision::AuthoritySource;
use george_core::decision::DecisionStatus;
use george_core::interfaces::NoopChangeSetSink;
use george_core::rule::RuleThen;
use george_core::rule::RuleWhen;
use george_core::Rule;
use george_core::RuleId;
use george_core::GateVerdict;
use george_runtime::OrchestrateOutcome;
use george_runtime::Orchestrator;
use george_runtime::SimulatedExecutor;
use george_store::FsArtifactStore;
use std::fs;

use crate::helpers::fixtures;

/// Scenario 1: a matching operational rule with `min_autonomy: 0` and an
/// authority matrix that lets the agent act on its own authority produces a
/// successful decision, a Gate `ALLOW`, and a six-entry trace.
#[test]
fn happy_path_allows_and_traces_every_phase() {
    let (_dir, paths) = fixtures::workspace();
    let store = FsArtifactStore::new();
    let executor = SimulatedExecutor;
    let orchestrator = Orchestrator::new(&store, &executor);

    let rules = vec![Rule {
        id: RuleId::new("heartbeat"),
        when: RuleWhen { agent: Some("monitoring".to_string()), event: Some("heartbeat".to_string()), ..RuleWhen::default() },
        then: RuleThen { decision_class: Some("operational".to_string()), min_autonomy: Some(0.0), ..RuleThen::default() },
        preconditions: None,
    }];
    let mut agents = AgentRegistry::new();
    agents.insert("monitoring".to_string(), fixtures::active_profile("monitoring agent", 0.8));
    let mut authority = AuthorityMatrix::default();
    authority.classes.insert("operational".to_string(), ClassAuthority { require: Approver::Agent });

    let outcome = orchestrator
        .orchestrate(
            &fixtures::event("monitoring", "heartbeat", None),
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
    assert_eq!(decision.status, DecisionStatus::Success);
    assert_eq!(decision.decision_trace.len(), 6);

    let gate_policy_yaml = "
enforcement:
  mode: enforcing
  default_action: BLOCK
  allow_human_override: true
thresholds:
  min_health_score: 0.0
";
    let policy_path = fixtures::write_gate_policy(paths.gate_result.parent().expect("parent"), gate_policy_yaml);
    let decision_path = paths.latest_decision.clone();
    let gate_result = george_gate::run(&store, &decision_path, &policy_path, &paths.gate_result).expect("gate run");
    assert_eq!(gate_result.verdict, GateVerdict::Allow);
    assert_eq!(gate_result.verdict.exit_code(), 0);
}

/// Scenario 2: the same event but the monitoring agent is paused. The
/// Guardian precheck blocks before Authority ever runs; a gate policy that
/// requires `guardian_ok` escalates rather than allowing.
#[test]
fn guardian_block_escalates_when_the_policy_requires_guardian_ok() {
    let (_dir, paths) = fixtures::workspace();
    let store = FsArtifactStore::new();
    let executor = SimulatedExecutor;
    let orchestrator = Orchestrator::new(&store, &executor);

    let rules = vec![Rule {
        id: RuleId::new("heartbeat"),
        when: RuleWhen { agent: Some("monitoring".to_string()), event: Some("heartbeat".to_string()), ..RuleWhen::default() },
        then: RuleThen { decision_class: Some("operational".to_string()), ..RuleThen::default() },
        preconditions: None,
    }];
    let mut agents = AgentRegistry::new();
    agents.insert("monitoring".to_string(), fixtures::paused_profile("monitoring agent", 0.8));
    let authority = AuthorityMatrix::default();

    let outcome = orchestrator
        .orchestrate(
            &fixtures::event("monitoring", "heartbeat", None),
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
    assert_eq!(decision.status, DecisionStatus::Blocked);
    assert_eq!(decision.guardian_flag.as_deref(), Some("agent_inactive"));
    assert_eq!(decision.authority_source, AuthoritySource::Guardian);
    assert_eq!(decision.signals.decision_trace_present, Some(true));

    let gate_policy_yaml = "
enforcement:
  mode: enforcing
  default_action: BLOCK
  allow_human_override: true
thresholds:
  min_health_score: 0.0
decision_classes:
  operational:
    require_guardian_ok: true
    on_fail: ESCALATE
";
    let policy_path = fixtures::write_gate_policy(paths.gate_result.parent().expect("parent"), gate_policy_yaml);
    let gate_result =
        george_gate::run(&store, &paths.latest_decision, &policy_path, &paths.gate_result).expect("gate run");
    assert_eq!(gate_result.verdict, GateVerdict::Escalate);
    assert_eq!(gate_result.verdict.exit_code(), 10);
}

/// Scenario 3: a rule routes to `safety_critical`, which the authority
/// matrix requires a human to approve. The decision blocks before
/// execution with `authority_source = human`.
#[test]
fn safety_critical_decisions_block_pending_human_authority() {
    let (_dir, paths) = fixtures::workspace();
    let store = FsArtifactStore::new();
    let executor = SimulatedExecutor;
    let orchestrator = Orchestrator::new(&store, &executor);

    let rules = vec![Rule {
        id: RuleId::new("deploy-rollback"),
        when: RuleWhen { agent: Some("deploy".to_string()), intent: Some("rollback".to_string()), ..RuleWhen::default() },
        then: RuleThen { decision_class: Some("safety_critical".to_string()), ..RuleThen::default() },
        preconditions: None,
    }];
    let mut agents = AgentRegistry::new();
    agents.insert("deploy".to_string(), fixtures::active_profile("deploy agent", 0.9));
    let mut authority = AuthorityMatrix::default();
    authority.classes.insert("safety_critical".to_string(), ClassAuthority { require: Approver::Human });

    let outcome = orchestrator
        .orchestrate(
            &fixtures::event("deploy", "rollback", Some("rollback")),
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
    assert_eq!(decision.status, DecisionStatus::Blocked);
    assert_eq!(decision.authority_source, AuthoritySource::Human);
    assert_eq!(decision.guardian_flag, None);
}

/// Scenario 4: an executor that fails every other call drags system
/// stability down to exactly `0.4` over four events. A gate policy
/// requiring `min_health_score: 0.6` with `on_fail: ESCALATE` escalates
/// rather than allowing.
#[test]
fn low_health_escalates_against_a_minimum_health_policy() {
    let (_dir, paths) = fixtures::workspace();
    let store = FsArtifactStore::new();
    let executor = fixtures::FailsEveryOtherCall::new();
    let orchestrator = Orchestrator::new(&store, &executor);

    let rules = vec![Rule {
        id: RuleId::new("heartbeat"),
        when: RuleWhen { agent: Some("monitoring".to_string()), event: Some("heartbeat".to_string()), ..RuleWhen::default() },
        then: RuleThen { decision_class: Some("operational".to_string()), ..RuleThen::default() },
        preconditions: None,
    }];
    let mut agents = AgentRegistry::new();
    agents.insert("monitoring".to_string(), fixtures::active_profile("monitoring agent", 0.8));
    let mut authority = AuthorityMatrix::default();
    authority.classes.insert("operational".to_string(), ClassAuthority { require: Approver::Agent });

    let mut health = HealthState::default();
    for _ in 0..4 {
        let outcome = orchestrator
            .orchestrate(
                &fixtures::event("monitoring", "heartbeat", None),
                &rules,
                &agents,
                &authority,
                &paths,
                health,
                fixtures::ts(),
            )
            .expect("orchestrate");
        let OrchestrateOutcome::Processed { health: updated, .. } = outcome else {
            panic!("event should not hit the emergency lock");
        };
        health = updated;
    }
    assert!((health.system_stability_score() - 0.4).abs() < 1e-9);

    let gate_policy_yaml = "
enforcement:
  mode: enforcing
  default_action: BLOCK
  allow_human_override: true
thresholds:
  min_health_score: 0.6
decision_classes:
  operational:
    on_fail: ESCALATE
";
    let policy_path = fixtures::write_gate_policy(paths.gate_result.parent().expect("parent"), gate_policy_yaml);
    let gate_result =
        george_gate::run(&store, &paths.latest_decision, &policy_path, &paths.gate_result).expect("gate run");
    assert_eq!(gate_result.verdict, GateVerdict::Escalate);
    assert_eq!(gate_result.verdict.exit_code(), 10);
    assert!(gate_result.reasons.iter().any(|reason| reason.contains("below minimum")));
}

/// Scenario 5: deleting `gate_result.json` is detected by `R3`, the
/// restore-gate-result playbook proposes a placeholder with
/// `verdict: "UNKNOWN"`, a `SELF_HEALING` trace entry is appended, and the
/// missing artifact is never recreated by the runtime itself.
#[test]
fn a_missing_gate_result_is_detected_proposed_and_never_applied() {
    let (_dir, paths) = fixtures::workspace();
    let store = FsArtifactStore::new();
    fs::write(&paths.gate_result, r#"{"verdict":"ALLOW"}"#).expect("seed gate result");
    fs::write(
        &paths.system_status,
        r#"{"generated_at":"2026-07-29T00:00:00Z","environment":"local","system":{"state":"running","mode":"enforcing"},"health":{"signal":"healthy","overall_score":0.9},"agents":{},"links":{"decision_trace":"x","gate_result":"y","latest":"z"}}"#,
    )
    .expect("seed status");
    fs::write(&paths.latest_decision, r#"{"id":"d1"}"#).expect("seed latest");
    fs::write(&paths.capability_graph, r#"{"agents":{}}"#).expect("seed capability graph");

    fs::remove_file(&paths.gate_result).expect("delete gate_result.json");

    let sink = NoopChangeSetSink;
    let outcome = george_selfheal::run(&store, &sink, &paths, fixtures::ts()).expect("self-heal run");

    assert!(outcome.regression);
    assert_eq!(outcome.detector, Some("R3"));
    assert_eq!(outcome.playbook, Some(george_selfheal::playbooks::PLAYBOOK_RESTORE_GATE_RESULT));
    assert!(outcome.branch.expect("branch name").starts_with("self-heal/"));
    assert!(!paths.gate_result.exists(), "self-healing never writes the artifact directly");

    let trace_lines = store.read_tail(&paths.decision_trace, 10).expect("read trace tail");
    assert_eq!(trace_lines.len(), 1);
    assert!(trace_lines[0].contains("ESCALATED_TO_HUMAN"));
    assert!(trace_lines[0].contains("self_healing"));
}

/// Scenario 6: rewriting `system_status.links.gate_result` to a path that
/// does not match the canonical layout is caught by `I1` as
/// `CNS-SSOT-005`, and the validator exits `2`.
#[test]
fn a_rewritten_gate_link_fails_consistency_with_the_ssot_code() {
    let (dir, paths) = fixtures::workspace();
    let store = FsArtifactStore::new();
    fs::write(&paths.gate_result, r#"{"verdict":"ALLOW"}"#).expect("seed gate result");
    fs::write(&paths.latest_decision, r#"{"id":"d1"}"#).expect("seed latest");
    fs::write(
        &paths.system_status,
        format!(
            r#"{{"generated_at":"2026-07-29T00:00:00Z","environment":"local","system":{{"state":"running","mode":"enforcing"}},"health":{{"signal":"healthy","overall_score":0.9}},"agents":{{}},"links":{{"decision_trace":"{}","gate_result":"ops/decisions/WRONG_PATH.json","latest":"{}"}}}}"#,
            paths.decision_trace.display(),
            paths.latest_decision.display(),
        ),
    )
    .expect("seed status with a wrong gate_result link");

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
            .any(|finding| finding.code == george_consistency::codes::SSOT_GATE_LINK
                && finding.level == george_consistency::FindingLevel::Fail)
    );
}
