// crates/george-core/src/gate.rs
// ============================================================================
// Module: George Gate Result
// Description: The Runtime Gate's independent re-evaluation verdict.
// Purpose: Canonical shape for `ops/decisions/gate_result.json`.
// Dependencies: crate::identifiers, serde
// ============================================================================

//! ## Overview
//! A `GateResult` is the sole output of the Runtime Gate: a verdict, the
//! reasons behind it, and the resolved policy that produced it, so a
//! downstream consumer can audit the decision without re-running the gate.

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::DecisionId;

/// The Runtime Gate's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateVerdict {
    /// The decision may proceed.
    Allow,
    /// The decision requires human review before proceeding.
    Escalate,
    /// The decision must not proceed.
    Block,
}

impl GateVerdict {
    /// The exit code downstream pipelines should use for this verdict
    /// (ALLOW=0, ESCALATE=10, BLOCK=20, per the CLI contract in §6).
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Allow => 0,
            Self::Escalate => 10,
            Self::Block => 20,
        }
    }
}

/// The class-resolved policy actually applied by the Runtime Gate, echoed
/// back on the [`GateResult`] for audit purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedPolicy {
    /// The enforcement mode in effect (`advisory` or `enforcing`).
    pub mode: String,
    /// The decision class this policy was resolved for.
    pub decision_class: String,
    /// The minimum health score required, after class/global fallback.
    pub min_health_score: f64,
    /// Whether `signals.guardian_ok` was required to be `true`.
    pub require_guardian_ok: bool,
    /// Whether `signals.status_endpoint_ok` was required to be `true`.
    pub require_status_endpoint: bool,
    /// Whether `signals.decision_trace_present` was required to be `true`.
    pub require_trace: bool,
    /// The verdict applied when any class rule fails.
    pub on_fail: GateVerdict,
    /// The policy's configured `enforcement.default_action`.
    pub default_action: GateVerdict,
    /// Whether human override of an `ESCALATE` verdict is permitted.
    pub allow_human_override: bool,
}

/// The outcome of one Runtime Gate evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResult {
    /// The decision this result was computed for.
    pub decision_id: DecisionId,
    /// The decision class evaluated.
    pub decision_class: String,
    /// The gate's final verdict.
    pub verdict: GateVerdict,
    /// Ordered list of reasons contributing to the verdict. Empty only
    /// when `verdict = Allow`.
    pub reasons: Vec<String>,
    /// The resolved policy that produced this verdict.
    pub applied_policy: AppliedPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_match_the_cli_contract() {
        assert_eq!(GateVerdict::Allow.exit_code(), 0);
        assert_eq!(GateVerdict::Escalate.exit_code(), 10);
        assert_eq!(GateVerdict::Block.exit_code(), 20);
    }

    #[test]
    fn verdict_serializes_screaming_snake_case() {
        let value = serde_json::to_value(GateVerdict::Escalate).expect("serialize");
        assert_eq!(value, serde_json::json!("ESCALATE"));
    }
}
