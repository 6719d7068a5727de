// crates/george-selfheal/src/playbooks.rs
// ============================================================================
// Module: George Self-Healing Playbooks
// Description: Template repairs for each detector, turned into proposed
//              change sets.
// Purpose: Translate a detected regression into the minimal valid artifact
//          that would clear it, without ever inferring what the artifact's
//          real content should have been (§4.9).
// Dependencies: george-core::interfaces, george-core::paths, george-core::time,
//               crate::detectors
// ============================================================================

//! ## Overview
//! Every playbook writes a placeholder, never a guess: a missing gate result
//! is replaced with an explicit `"UNKNOWN"` verdict, not a recomputed one,
//! and a missing capability graph is replaced with an empty one. The repair
//! is always proposed through a [`george_core::interfaces::ChangeSetSink`]
//! for human review; nothing here touches the live `ops/` tree directly.

use george_core::Timestamp;
use george_core::interfaces::ChangeSet;
use george_core::interfaces::ProposedFile;
use george_core::paths::PathConfig;

use crate::detectors::Detector;
use crate::detectors::Regression;

/// Playbook template name for a missing or invalid `gate_result.json`.
pub const PLAYBOOK_RESTORE_GATE_RESULT: &str = "restore_gate_result_placeholder";
/// Playbook template name for a missing or invalid `system_status.json`.
pub const PLAYBOOK_RESTORE_SYSTEM_STATUS: &str = "restore_system_status_placeholder";
/// Playbook template name for a missing or invalid `latest.json`.
pub const PLAYBOOK_RESTORE_LATEST_DECISION: &str = "restore_latest_decision_placeholder";
/// Playbook template name for a missing or invalid `capability_graph.json`.
pub const PLAYBOOK_RESET_CAPABILITY_GRAPH: &str = "reset_capability_graph";

fn branch_timestamp(now: Timestamp) -> String {
    now.to_rfc3339().replace([':', '.'], "-").trim_end_matches('Z').trim_end_matches('-').to_string()
}

/// Picks the playbook template for `regression`, based on what it is
/// (rather than solely on which detector reported it — `R3` alone covers
/// three distinct artifacts, each with its own placeholder).
#[must_use]
pub fn playbook_for(regression: &Regression) -> &'static str {
    match regression.detector {
        Detector::R3MissingArtifact if regression.id.contains("gate_result") => {
            PLAYBOOK_RESTORE_GATE_RESULT
        }
        Detector::R3MissingArtifact if regression.id.contains("system_status") => {
            PLAYBOOK_RESTORE_SYSTEM_STATUS
        }
        Detector::R3MissingArtifact => PLAYBOOK_RESTORE_LATEST_DECISION,
        Detector::R2StatusInvalid => PLAYBOOK_RESTORE_SYSTEM_STATUS,
        Detector::R1CapabilityGraphInvalid => PLAYBOOK_RESET_CAPABILITY_GRAPH,
    }
}

fn placeholder_gate_result() -> String {
    r#"{
  "decision_id": null,
  "verdict": "UNKNOWN",
  "reasons": ["self-healing placeholder: original gate_result.json was missing"],
  "applied_policy": null
}
"#
    .to_string()
}

fn placeholder_system_status(paths: &PathConfig, now: Timestamp) -> String {
    format!(
        r#"{{
  "generated_at": "{generated_at}",
  "environment": "unknown",
  "system": {{ "state": "unknown", "mode": "unknown" }},
  "health": {{ "signal": "unknown", "overall_score": 0.0 }},
  "agents": {{}},
  "links": {{
    "decision_trace": "{trace}",
    "gate_result": "{gate}",
    "latest": "{latest}"
  }}
}}
"#,
        generated_at = now.to_rfc3339(),
        trace = paths.decision_trace.display(),
        gate = paths.gate_result.display(),
        latest = paths.latest_decision.display(),
    )
}

fn placeholder_latest_decision(now: Timestamp) -> String {
    format!(
        r#"{{
  "id": "00000000-0000-0000-0000-000000000000",
  "timestamp": "{ts}",
  "source_event_id": "00000000-0000-0000-0000-000000000000",
  "agent": "self-healing",
  "action": "none",
  "intent": "self-healing placeholder: original latest.json was missing",
  "confidence": 0.5,
  "status": "blocked",
  "guardian_flag": true,
  "decision_class": "unknown",
  "authority_source": "guardian"
}}
"#,
        ts = now.to_rfc3339(),
    )
}

fn placeholder_capability_graph() -> String {
    "{\n  \"agents\": {}\n}\n".to_string()
}

/// Builds the deterministic branch name for a repair of `regression` made
/// at `now`, following the `self-heal/<run-timestamp>-<regression-id>`
/// convention.
#[must_use]
pub fn branch_name(regression: &Regression, now: Timestamp) -> String {
    format!("self-heal/{}-{}", branch_timestamp(now), regression.id)
}

/// Builds the proposed [`ChangeSet`] that would clear `regression`.
#[must_use]
pub fn build_change_set(regression: &Regression, paths: &PathConfig, now: Timestamp) -> ChangeSet {
    let playbook = playbook_for(regression);
    let (path, contents) = match playbook {
        PLAYBOOK_RESTORE_GATE_RESULT => {
            (paths.gate_result.display().to_string(), placeholder_gate_result())
        }
        PLAYBOOK_RESTORE_SYSTEM_STATUS => (
            paths.system_status.display().to_string(),
            placeholder_system_status(paths, now),
        ),
        PLAYBOOK_RESTORE_LATEST_DECISION => (
            paths.latest_decision.display().to_string(),
            placeholder_latest_decision(now),
        ),
        _ => (paths.capability_graph.display().to_string(), placeholder_capability_graph()),
    };
    ChangeSet {
        branch: branch_name(regression, now),
        files: vec![ProposedFile { path, contents }],
        summary: format!(
            "Self-healing detected {} ({}): {}. Playbook {playbook} proposes a minimal valid placeholder for human review.",
            regression.id,
            regression.detector.code(),
            regression.detail,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::Detector;
    use std::path::Path;

    fn ts() -> Timestamp {
        Timestamp::parse("2026-07-28T12:30:45Z").expect("parse")
    }

    #[test]
    fn branch_names_are_deterministic_and_colon_free() {
        let regression = Regression {
            id: "r3-missing-gate_result".to_string(),
            detector: Detector::R3MissingArtifact,
            detail: "missing".to_string(),
        };
        let branch = branch_name(&regression, ts());
        assert!(branch.starts_with("self-heal/"));
        assert!(branch.ends_with("r3-missing-gate_result"));
        assert!(!branch.contains(':'));
    }

    #[test]
    fn a_missing_gate_result_proposes_an_unknown_placeholder() {
        let paths = PathConfig::rooted_at(Path::new("/srv/george"));
        let regression = Regression {
            id: "r3-missing-gate_result".to_string(),
            detector: Detector::R3MissingArtifact,
            detail: "missing".to_string(),
        };
        let change_set = build_change_set(&regression, &paths, ts());
        assert_eq!(change_set.files.len(), 1);
        assert!(change_set.files[0].contents.contains("\"UNKNOWN\""));
    }

    #[test]
    fn a_capability_graph_regression_proposes_an_empty_graph() {
        let paths = PathConfig::rooted_at(Path::new("/srv/george"));
        let regression = Regression {
            id: "r1-capability-graph-missing".to_string(),
            detector: Detector::R1CapabilityGraphInvalid,
            detail: "missing".to_string(),
        };
        let change_set = build_change_set(&regression, &paths, ts());
        assert_eq!(change_set.files[0].path, paths.capability_graph.display().to_string());
        assert!(change_set.files[0].contents.contains("\"agents\": {}"));
    }
}
