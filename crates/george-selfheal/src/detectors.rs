// crates/george-selfheal/src/detectors.rs
// ============================================================================
// Module: George Self-Healing Detectors
// Description: Deterministic regression detectors, checked in fixed order.
// Purpose: Decide whether the current `ops/` tree has drifted from a valid
//          state, and which single regression (if any) a repair cycle
//          should address (§4.9).
// Dependencies: george-core::paths, george-policy
// ============================================================================

//! ## Overview
//! Exactly one regression is reported per invocation, chosen by always
//! checking `R3` first, then `R2`, then `R1` — never more than one detector
//! fires, even if several conditions hold simultaneously. This mirrors the
//! "single-regression-per-invocation" discipline: the runtime repairs one
//! thing, escalates it, and lets the next invocation re-check from scratch.

use std::path::Path;

use george_core::paths::PathConfig;
use george_policy::load_capability_graph;

/// Which detector found a regression, in the fixed check order `R3` → `R2`
/// → `R1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detector {
    /// A mandatory output artifact is missing from disk.
    R3MissingArtifact,
    /// `system_status.json` exists but is not a well-formed status document.
    R2StatusInvalid,
    /// `capability_graph.json` is missing or fails to load.
    R1CapabilityGraphInvalid,
}

impl Detector {
    /// The short code used in the regression identifier and trace detail.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::R3MissingArtifact => "R3",
            Self::R2StatusInvalid => "R2",
            Self::R1CapabilityGraphInvalid => "R1",
        }
    }
}

/// One detected regression: which detector found it, a stable identifier
/// derived from what was wrong, and a human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regression {
    /// Stable identifier, e.g. `"r3-missing-gate_result"`.
    pub id: String,
    /// Which detector reported this regression.
    pub detector: Detector,
    /// A human-readable explanation of what was found.
    pub detail: String,
}

/// The mandatory output artifacts `R3` checks for, in the fixed order they
/// are checked. `ops/capability_graph.json` is deliberately excluded: it is
/// not named in the file layout table and is instead owned entirely by the
/// `R1` detector below.
const MANDATORY_ARTIFACTS: &[(&str, fn(&PathConfig) -> &Path)] = &[
    ("gate_result", |p| p.gate_result.as_path()),
    ("system_status", |p| p.system_status.as_path()),
    ("latest_decision", |p| p.latest_decision.as_path()),
];

const REQUIRED_STATUS_KEYS: &[&str] =
    &["generated_at", "environment", "system", "health", "agents", "links"];

fn detect_r3(paths: &PathConfig) -> Option<Regression> {
    for (name, resolve) in MANDATORY_ARTIFACTS {
        let path = resolve(paths);
        if !path.exists() {
            return Some(Regression {
                id: format!("r3-missing-{name}"),
                detector: Detector::R3MissingArtifact,
                detail: format!("mandatory artifact {name} is missing at {}", path.display()),
            });
        }
    }
    None
}

fn detect_r2(paths: &PathConfig) -> Option<Regression> {
    let text = std::fs::read_to_string(&paths.system_status).ok()?;
    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            return Some(Regression {
                id: "r2-status-unparsable".to_string(),
                detector: Detector::R2StatusInvalid,
                detail: format!("system_status.json is not valid JSON: {err}"),
            });
        }
    };
    let Some(object) = value.as_object() else {
        return Some(Regression {
            id: "r2-status-not-an-object".to_string(),
            detector: Detector::R2StatusInvalid,
            detail: "system_status.json is not a JSON object".to_string(),
        });
    };
    for key in REQUIRED_STATUS_KEYS {
        if !object.contains_key(*key) {
            return Some(Regression {
                id: format!("r2-status-missing-{key}"),
                detector: Detector::R2StatusInvalid,
                detail: format!("system_status.json is missing required key \"{key}\""),
            });
        }
    }
    None
}

fn detect_r1(paths: &PathConfig) -> Option<Regression> {
    if !paths.capability_graph.exists() {
        return Some(Regression {
            id: "r1-capability-graph-missing".to_string(),
            detector: Detector::R1CapabilityGraphInvalid,
            detail: format!(
                "capability graph is missing at {}",
                paths.capability_graph.display()
            ),
        });
    }
    if let Err(err) = load_capability_graph(&paths.capability_graph) {
        return Some(Regression {
            id: "r1-capability-graph-invalid".to_string(),
            detector: Detector::R1CapabilityGraphInvalid,
            detail: format!("capability graph failed to load: {err}"),
        });
    }
    None
}

/// Runs the `R3` → `R2` → `R1` detector chain and returns the first
/// regression found, or `None` if the tree is consistent.
#[must_use]
pub fn detect_regression(paths: &PathConfig) -> Option<Regression> {
    detect_r3(paths).or_else(|| detect_r2(paths)).or_else(|| detect_r1(paths))
}
