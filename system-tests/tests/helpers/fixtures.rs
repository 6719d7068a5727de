// system-tests/tests/helpers/fixtures.rs
// ============================================================================
// Module: System Test Fixtures
// Description: Builds a minimal-but-valid `ops/` tree and the policy
//              documents every scenario starts from.
// Purpose: Every scenario describes only the deviation it cares about; the
//          rest of the tree is already internally consistent.
// Dependencies: george-core, george-policy, tempfile
// ============================================================================

use std::fs;
use std::path::Path;

use george_core::AgentId;
use george_core::Event;
use george_core::Timestamp;
use george_core::agent::AgentProfile;
use george_core::agent::AgentStatus;
use george_core::agent::FailureThresholds;
use george_core::interfaces::ExecutionOutcome;
use george_core::interfaces::ExecutionRequest;
use george_core::interfaces::Executor;
use george_core::interfaces::ExecutorError;
use george_core::paths::PathConfig;
use serde_json::Value;

/// A fixed timestamp every scenario reasons about, so fixtures never depend
/// on wall-clock time.
pub fn ts() -> Timestamp {
    Timestamp::parse("2026-07-29T00:00:00Z").expect("fixed timestamp parses")
}

/// Builds a `PathConfig` rooted at a fresh temp directory, with every
/// directory the Artifact Store needs already created.
pub fn workspace() -> (tempfile::TempDir, PathConfig) {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = PathConfig::rooted_at(dir.path());
    fs::create_dir_all(&paths.history_dir).expect("history dir");
    fs::create_dir_all(&paths.snapshots_dir).expect("snapshots dir");
    fs::create_dir_all(paths.decision_trace.parent().expect("reports parent")).expect("reports dir");
    fs::create_dir_all(paths.rules.parent().expect("rules parent")).expect("rules dir");
    (dir, paths)
}

/// Writes a rule table YAML document at `paths.rules`.
pub fn write_rules(paths: &PathConfig, yaml: &str) {
    fs::write(&paths.rules, yaml).expect("write rules");
}

/// Writes an agent registry JSON document at `paths.autonomy`.
pub fn write_agents(paths: &PathConfig, json: &str) {
    fs::write(&paths.autonomy, json).expect("write agent registry");
}

/// Writes an authority matrix YAML document at `paths.authority_matrix`.
pub fn write_authority(paths: &PathConfig, yaml: &str) {
    fs::write(&paths.authority_matrix, yaml).expect("write authority matrix");
}

/// Writes a Runtime Gate policy YAML document at an arbitrary path and
/// returns that path.
pub fn write_gate_policy(dir: &Path, yaml: &str) -> std::path::PathBuf {
    let path = dir.join("gate_policy.yaml");
    fs::write(&path, yaml).expect("write gate policy");
    path
}

/// Writes a Consistency Validator rule file at an arbitrary path and
/// returns that path.
pub fn write_consistency_rules(dir: &Path, yaml: &str) -> std::path::PathBuf {
    let path = dir.join("consistency_rules.yaml");
    fs::write(&path, yaml).expect("write consistency rules");
    path
}

/// A monitoring-style event with an optional intent.
pub fn event(agent: &str, event_name: &str, intent: Option<&str>) -> Event {
    Event {
        id: None,
        timestamp: ts(),
        agent: AgentId::new(agent),
        event: event_name.to_string(),
        intent: intent.map(str::to_string),
        payload: Value::Null,
        source_event_id: None,
    }
}

/// An active agent profile with the given autonomy level.
pub fn active_profile(role: &str, autonomy: f64) -> AgentProfile {
    AgentProfile {
        status: AgentStatus::Active,
        autonomy,
        role: role.to_string(),
        actions: Vec::new(),
        failure_thresholds: FailureThresholds::default(),
    }
}

/// A paused agent profile, used to exercise the Guardian precheck's
/// `agent_inactive` rejection.
pub fn paused_profile(role: &str, autonomy: f64) -> AgentProfile {
    AgentProfile { status: AgentStatus::Paused, ..active_profile(role, autonomy) }
}

/// An [`Executor`] that always fails, for scenarios driving health down.
pub struct AlwaysFails;

impl Executor for AlwaysFails {
    fn execute(&self, _request: &ExecutionRequest<'_>) -> Result<ExecutionOutcome, ExecutorError> {
        Err(ExecutorError::Failed("simulated failure".to_string()))
    }
}

/// An [`Executor`] that fails every other call, starting with the first.
/// Driving it through an even number of calls lands on an exact, predictable
/// `system_stability_score` rather than one that depends on call count.
pub struct FailsEveryOtherCall {
    calls: std::cell::Cell<u32>,
}

impl FailsEveryOtherCall {
    pub fn new() -> Self {
        Self { calls: std::cell::Cell::new(0) }
    }
}

impl Executor for FailsEveryOtherCall {
    fn execute(&self, _request: &ExecutionRequest<'_>) -> Result<ExecutionOutcome, ExecutorError> {
        let n = self.calls.get();
        self.calls.set(n + 1);
        if n % 2 == 0 {
            Err(ExecutorError::Failed("simulated failure".to_string()))
        } else {
            Ok(ExecutionOutcome { success: true, summary: "ok".to_string() })
        }
    }
}
