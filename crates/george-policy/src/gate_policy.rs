// crates/george-policy/src/gate_policy.rs
// ============================================================================
// Module: George Gate Policy
// Description: The Runtime Gate's own policy document.
// Purpose: Canonical shape for the Runtime Gate's policy YAML (§4.7).
// Dependencies: crate::loader, crate::schemas, george-core
// ============================================================================

//! ## Overview
//! `GatePolicy` is deliberately separate from [`george_core::GateResult`]:
//! the result is what one evaluation *produced*; the policy is what governs
//! *every* evaluation. Class-level fields are all optional, falling back to
//! the global `thresholds`/`enforcement` settings exactly as described in
//! §4.7.

use std::collections::BTreeMap;
use std::path::Path;

use george_core::GateVerdict;
use serde::Deserialize;
use serde::Serialize;

use crate::loader::PolicyError;
use crate::loader::load_yaml;
use crate::schemas::gate_policy_schema;

/// The Runtime Gate's enforcement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementMode {
    /// `BLOCK` verdicts are downgraded to `ESCALATE`; nothing is ever hard
    /// blocked.
    Advisory,
    /// Verdicts are applied as computed.
    Enforcing,
}

/// The `enforcement` block of a [`GatePolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementConfig {
    /// The enforcement mode in effect.
    pub mode: EnforcementMode,
    /// The verdict applied when a class has no explicit `on_fail`.
    pub default_action: GateVerdict,
    /// Whether a human may override an `ESCALATE` verdict. When `false`,
    /// an `ESCALATE` outcome is itself downgraded to `BLOCK` (§4.7).
    pub allow_human_override: bool,
}

/// Per-class Runtime Gate requirements. Every field is optional and falls
/// back to the global threshold / `enforcement.default_action` when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassPolicy {
    /// Minimum `signals.system_health_score` required for this class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_health_score: Option<f64>,
    /// Whether `signals.guardian_ok` must be `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_guardian_ok: Option<bool>,
    /// Whether `signals.decision_trace_present` must be `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_trace: Option<bool>,
    /// Whether `signals.status_endpoint_ok` must be `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_status_endpoint: Option<bool>,
    /// The verdict applied when this class's rules fail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_fail: Option<GateVerdict>,
}

/// Global Runtime Gate thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// The global minimum health score, used when a class omits its own.
    pub min_health_score: f64,
}

/// The Runtime Gate's full policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatePolicy {
    /// Enforcement behavior.
    pub enforcement: EnforcementConfig,
    /// Per-class requirement overrides, keyed by canonical class name.
    #[serde(default)]
    pub decision_classes: BTreeMap<String, ClassPolicy>,
    /// Global thresholds.
    pub thresholds: Thresholds,
}

/// Loads a Runtime Gate policy document from `path`.
///
/// # Errors
///
/// Returns [`PolicyError`] when the file cannot be read, parsed, schema
/// validated, or deserialized.
pub fn load_gate_policy(path: &Path) -> Result<GatePolicy, PolicyError> {
    load_yaml(path, &gate_policy_schema())
}
