#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only assertions are permitted to panic."
    )
)]
// crates/george-consistency/src/lib.rs
// ============================================================================
// Crate: george-consistency
// Description: Cross-artifact integrity checker with a stable finding
//              taxonomy.
// Purpose: Verify invariants I1-I6 across the artifacts the Orchestrator and
//          Runtime Gate produce, failing closed on any FAIL-level finding
//          (§4.8).
// Dependencies: george-core, george-policy, serde_json, thiserror
// ============================================================================

//! # george-consistency
//!
//! The Consistency Validator never trusts that an artifact conforms to its
//! canonical schema: every input is read as JSON first and checked field by
//! field, so a malformed or tampered artifact produces a specific
//! [`Finding`] rather than a crash. [`run`] is the disk-facing entry point;
//! [`checks::run_checks`] is the pure core, exercised directly in tests.

#![forbid(unsafe_code)]

pub mod checks;
pub mod codes;

use std::path::Path;

use george_core::Timestamp;
use george_core::interfaces::ArtifactStore;
use george_core::paths::PathConfig;
use george_policy::ConsistencyRules;
use george_policy::PolicyError;
use george_policy::load_agent_registry;
use george_policy::load_consistency_rules;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use checks::ArtifactLoad;
pub use checks::ValidationInputs;
pub use checks::run_checks;

/// Default tail window size, used when `ops/consistency_rules.yaml` omits
/// `tail_window` (§4.8).
pub const DEFAULT_TAIL_WINDOW: usize = 200;

/// The severity of one [`Finding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingLevel {
    /// The check was satisfied.
    Pass,
    /// The check raised a concern that does not fail the run.
    Warn,
    /// The check failed; the overall report fails closed.
    Fail,
}

/// One Consistency Validator finding: a stable code, its severity, and a
/// human-readable detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// The stable code from [`codes`] this finding reports on.
    pub code: &'static str,
    /// The finding's severity.
    pub level: FindingLevel,
    /// A human-readable detail explaining the finding.
    pub message: String,
}

impl Finding {
    /// Builds a `PASS`-level finding.
    #[must_use]
    pub fn pass(code: &'static str, message: impl Into<String>) -> Self {
        Self { code, level: FindingLevel::Pass, message: message.into() }
    }

    /// Builds a `WARN`-level finding.
    #[must_use]
    pub fn warn(code: &'static str, message: impl Into<String>) -> Self {
        Self { code, level: FindingLevel::Warn, message: message.into() }
    }

    /// Builds a `FAIL`-level finding.
    #[must_use]
    pub fn fail(code: &'static str, message: impl Into<String>) -> Self {
        Self { code, level: FindingLevel::Fail, message: message.into() }
    }
}

/// The run mode passed on the CLI (`--mode {local,ci}`); carried on the
/// report for audit purposes only — it does not change check behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Run from a developer's machine.
    Local,
    /// Run inside continuous integration.
    Ci,
}

/// The full report produced by one Consistency Validator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// When this report was generated.
    pub generated_at: Timestamp,
    /// The mode this run was invoked under.
    pub mode: ValidationMode,
    /// Every finding produced, in check order.
    pub findings: Vec<Finding>,
}

impl ConsistencyReport {
    /// Returns true if any finding is `FAIL`-level.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.findings.iter().any(|f| f.level == FindingLevel::Fail)
    }

    /// The process exit code for this report: `2` if any finding is `FAIL`,
    /// else `0` (§4.8, §6).
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() { 2 } else { 0 }
    }
}

/// An error loading an input the validator needs before it can run at all.
#[derive(Debug, Error)]
pub enum ConsistencyError {
    /// The consistency rule file failed to load.
    #[error(transparent)]
    Rules(#[from] PolicyError),
    /// The report could not be written to `output_path`.
    #[error("failed to write consistency report to {path}: {source}")]
    WriteReport {
        /// The path that could not be written.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

fn load_json_artifact(path: &Path) -> ArtifactLoad {
    let text = std::fs::read_to_string(path).map_err(|err| err.to_string())?;
    serde_json::from_str::<Value>(&text).map_err(|err| err.to_string())
}

/// Reads every artifact named in `paths`, validates it against
/// `rules_path`, and writes the JSON report to `output_path`.
///
/// Unlike [`george_gate::run`], a missing or malformed *artifact under
/// test* (`system_status.json`, `gate_result.json`, the trace log) is never
/// an error here — it becomes a `FAIL` finding, because detecting exactly
/// that is the validator's job. Only the validator's own rule file and
/// output path can fail the run outright.
///
/// # Errors
///
/// Returns [`ConsistencyError`] if `rules_path` fails to load/schema-validate,
/// or if `output_path` cannot be written.
pub fn run(
    store: &impl ArtifactStore,
    paths: &PathConfig,
    rules_path: &Path,
    output_path: &Path,
    mode: ValidationMode,
    now: Timestamp,
) -> Result<ConsistencyReport, ConsistencyError> {
    let rules = match load_consistency_rules(rules_path) {
        Ok(rules) => rules,
        Err(err) => {
            let report = ConsistencyReport {
                generated_at: now,
                mode,
                findings: vec![Finding::fail(
                    codes::TOOL_ERR,
                    format!("consistency rule file could not be loaded: {err}"),
                )],
            };
            persist(store, output_path, &report)?;
            return Ok(report);
        }
    };
    let registry = load_agent_registry(&paths.autonomy).ok();

    let tail_window = rules.tail_window.map_or(DEFAULT_TAIL_WINDOW, |n| n as usize);
    let trace_tail = store
        .read_tail(&paths.decision_trace, tail_window)
        .unwrap_or_default();

    let inputs = ValidationInputs {
        system_status: load_json_artifact(&paths.system_status),
        gate_result: load_json_artifact(&paths.gate_result),
        latest_decision: load_json_artifact(&paths.latest_decision),
        trace_tail,
        registry: registry.as_ref(),
        gate_verdicts: &rules.gate_verdicts,
        agent_states: &rules.agent_states,
        health_signals: &rules.health_signals,
        paths,
        now,
    };
    let findings = run_checks(&inputs);
    let report = ConsistencyReport { generated_at: now, mode, findings };
    persist(store, output_path, &report)?;
    Ok(report)
}

fn persist(
    store: &impl ArtifactStore,
    output_path: &Path,
    report: &ConsistencyReport,
) -> Result<(), ConsistencyError> {
    let value = serde_json::to_value(report).unwrap_or(Value::Null);
    store
        .write_canonical(output_path, &value)
        .map_err(|err| ConsistencyError::WriteReport {
            path: output_path.display().to_string(),
            source: std::io::Error::other(err.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use george_store::FsArtifactStore;
    use std::fs;

    fn ts() -> Timestamp {
        Timestamp::parse("2026-07-28T00:00:00Z").expect("parse")
    }

    fn write_rules(path: &Path) {
        fs::write(
            path,
            "tail_window: 20\nhealth_signals: [healthy, degraded, critical, unknown]\ngate_verdicts: [ALLOW, ESCALATE, BLOCK]\nagent_states: [active, planned, paused, inactive]\n",
        )
        .expect("write rules");
    }

    #[test]
    fn run_reports_fail_when_system_status_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = PathConfig::rooted_at(dir.path());
        let rules_path = dir.path().join("consistency_rules.yaml");
        let output_path = dir.path().join("report.json");
        write_rules(&rules_path);

        let store = FsArtifactStore::new();
        let report = run(&store, &paths, &rules_path, &output_path, ValidationMode::Local, ts()).expect("run");
        assert_eq!(report.exit_code(), 2);
        assert!(report.findings.iter().any(|f| f.code == codes::SSOT_UNREADABLE && f.level == FindingLevel::Fail));
    }

    #[test]
    fn run_surfaces_a_tool_err_finding_when_rules_fail_to_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = PathConfig::rooted_at(dir.path());
        let rules_path = dir.path().join("missing_rules.yaml");
        let output_path = dir.path().join("report.json");

        let store = FsArtifactStore::new();
        let report = run(&store, &paths, &rules_path, &output_path, ValidationMode::Ci, ts()).expect("run");
        assert_eq!(report.exit_code(), 2);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].code, codes::TOOL_ERR);
    }
}
