// crates/george-policy/src/consistency_rules.rs
// ============================================================================
// Module: George Consistency Rules
// Description: The Consistency Validator's declarative rule file.
// Purpose: Canonical shape for `ops/consistency_rules.yaml`, tuning the
//          closed-vocabulary and windowing behavior of the Consistency
//          Validator's I1-I6 checks without recompiling it (§4.8).
// Dependencies: crate::loader, crate::schemas
// ============================================================================

//! ## Overview
//! Every field is optional; a missing field means "use the Consistency
//! Validator's built-in default" rather than "skip this check" — the
//! validator still fails closed even against an empty document.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::loader::PolicyError;
use crate::loader::load_yaml;
use crate::schemas::consistency_rules_schema;

/// Declarative tuning knobs for the Consistency Validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyRules {
    /// How many trailing trace lines the tail-dedup check (I2) inspects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_window: Option<u32>,
    /// Per-artifact required top-level keys, keyed by artifact name
    /// (`decision`, `trace`, `gate_result`, `status`, `snapshot`).
    #[serde(default)]
    pub required_keys: BTreeMap<String, Vec<String>>,
    /// Keys that `ops/status/latest.json` must contain (I3).
    #[serde(default)]
    pub required_outputs_in_latest: Vec<String>,
    /// The closed vocabulary for `HealthSignal` (I5).
    #[serde(default)]
    pub health_signals: Vec<String>,
    /// The closed vocabulary for `GateVerdict` (I5).
    #[serde(default)]
    pub gate_verdicts: Vec<String>,
    /// The closed vocabulary for agent autonomy modes (I5).
    #[serde(default)]
    pub autonomy_modes: Vec<String>,
    /// The closed vocabulary for `AgentStatus` (I5).
    #[serde(default)]
    pub agent_states: Vec<String>,
}

/// Loads the Consistency Validator's rule file from `path`.
///
/// # Errors
///
/// Returns [`PolicyError`] when the file cannot be read, parsed, schema
/// validated, or deserialized.
pub fn load_consistency_rules(path: &Path) -> Result<ConsistencyRules, PolicyError> {
    load_yaml(path, &consistency_rules_schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn loads_a_minimal_rule_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            r#"
tail_window: 20
health_signals: [healthy, degraded, critical, unknown]
gate_verdicts: [ALLOW, ESCALATE, BLOCK]
"#
        )
        .expect("write");
        let rules = load_consistency_rules(file.path()).expect("load");
        assert_eq!(rules.tail_window, Some(20));
        assert_eq!(rules.health_signals.len(), 4);
    }

    #[test]
    fn empty_document_still_loads() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "{{}}").expect("write");
        let rules = load_consistency_rules(file.path()).expect("load");
        assert!(rules.tail_window.is_none());
        assert!(rules.required_outputs_in_latest.is_empty());
    }
}
