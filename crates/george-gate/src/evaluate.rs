// crates/george-gate/src/evaluate.rs
// ============================================================================
// Module: George Runtime Gate Evaluator
// Description: Pure, side-effect-free re-evaluation of a decision against a
//              Runtime Gate policy.
// Purpose: Implements the algorithm in §4.7 exactly: resolve the decision
//          class, read signals, apply class rules, and fold the result
//          through the enforcement mode's advisory downgrade.
// Dependencies: george-core, george-policy, serde_json
// ============================================================================

//! ## Overview
//! [`evaluate`] takes the decision as a raw [`serde_json::Value`] rather than
//! the strongly typed [`george_core::Decision`]: the Runtime Gate is an
//! independent re-evaluator and must reject malformed or legacy input on its
//! own terms (a missing `decision_class`, a `NaN` health score, the legacy
//! list-shaped `latest.json`) rather than trusting that whatever wrote the
//! file conformed to the current schema. Evaluation never has side effects;
//! writing `gate_result.json` is the caller's job (see [`crate::run`]).

use george_core::GateResult;
use george_core::GateVerdict;
use george_core::authority::DecisionClass;
use george_core::gate::AppliedPolicy;
use george_core::identifiers::DecisionId;
use george_core::tristate::TriState;
use george_policy::ClassPolicy;
use george_policy::GatePolicy;
use george_policy::gate_policy::EnforcementMode;
use serde_json::Value;
use uuid::Uuid;

/// Reason text emitted when `decision_class` is absent, matching §8's
/// boundary behavior verbatim so downstream consumers can match on it.
pub const REASON_MISSING_DECISION_CLASS: &str = "Missing decision_class";

/// Reads a decision's signals, treating a missing or non-finite
/// `system_health_score` as absent rather than coercing it to `0.0`.
struct DecisionSignals {
    health_score: Option<f64>,
    guardian_ok: TriState,
    status_endpoint_ok: TriState,
    decision_trace_present: TriState,
}

fn tristate_field(signals: &Value, key: &str) -> TriState {
    match signals.get(key).and_then(Value::as_bool) {
        Some(value) => TriState::from(value),
        None => TriState::Unknown,
    }
}

fn read_signals(decision: &Value) -> DecisionSignals {
    let signals = decision.get("signals").cloned().unwrap_or(Value::Null);
    let health_score = signals
        .get("system_health_score")
        .and_then(Value::as_f64)
        .filter(|score| score.is_finite());
    DecisionSignals {
        health_score,
        guardian_ok: tristate_field(&signals, "guardian_ok"),
        status_endpoint_ok: tristate_field(&signals, "status_endpoint_ok"),
        decision_trace_present: tristate_field(&signals, "decision_trace_present"),
    }
}

/// Resolves the effective [`ClassPolicy`] fields for `class`, falling back to
/// global `thresholds`/`enforcement` settings when the class has no (or a
/// partial) entry, per §4.7.
struct ResolvedClassPolicy {
    min_health_score: f64,
    require_guardian_ok: bool,
    require_trace: bool,
    require_status_endpoint: bool,
    on_fail: GateVerdict,
}

fn resolve_class_policy(policy: &GatePolicy, class: &str) -> ResolvedClassPolicy {
    let class_policy = policy.decision_classes.get(class).cloned().unwrap_or_default();
    ResolvedClassPolicy {
        min_health_score: class_policy.min_health_score.unwrap_or(policy.thresholds.min_health_score),
        require_guardian_ok: class_policy.require_guardian_ok.unwrap_or(false),
        require_trace: class_policy.require_trace.unwrap_or(false),
        require_status_endpoint: class_policy.require_status_endpoint.unwrap_or(false),
        on_fail: class_policy.on_fail.unwrap_or(policy.enforcement.default_action),
    }
}

fn applied_policy(policy: &GatePolicy, class: &str, resolved: &ResolvedClassPolicy) -> AppliedPolicy {
    AppliedPolicy {
        mode: match policy.enforcement.mode {
            EnforcementMode::Advisory => "advisory".to_string(),
            EnforcementMode::Enforcing => "enforcing".to_string(),
        },
        decision_class: class.to_string(),
        min_health_score: resolved.min_health_score,
        require_guardian_ok: resolved.require_guardian_ok,
        require_status_endpoint: resolved.require_status_endpoint,
        require_trace: resolved.require_trace,
        on_fail: resolved.on_fail,
        default_action: policy.enforcement.default_action,
        allow_human_override: policy.enforcement.allow_human_override,
    }
}

fn decision_id_of(decision: &Value) -> DecisionId {
    decision
        .get("id")
        .and_then(Value::as_str)
        .and_then(|text| Uuid::parse_str(text).ok())
        .map_or_else(|| DecisionId::from_uuid(Uuid::nil()), DecisionId::from_uuid)
}

fn placeholder_applied_policy(policy: &GatePolicy, class: &str) -> AppliedPolicy {
    let resolved = resolve_class_policy(policy, class);
    applied_policy(policy, class, &resolved)
}

/// Evaluates `decision` (the decoded contents of `latest.json`) against
/// `policy`, returning the Runtime Gate's independent verdict.
///
/// Never panics and has no side effects; malformed input degrades to a
/// `BLOCK` verdict with a descriptive reason rather than an error, because
/// the Gate's own contract (§7) is "unknown never equals allowed".
#[must_use]
pub fn evaluate(decision: &Value, policy: &GatePolicy) -> GateResult {
    if decision.is_array() {
        return GateResult {
            decision_id: DecisionId::from_uuid(Uuid::nil()),
            decision_class: "unknown".to_string(),
            verdict: GateVerdict::Block,
            reasons: vec![
                "legacy list-shaped decision input is not supported; latest.json must be a single object".to_string(),
            ],
            applied_policy: placeholder_applied_policy(policy, "unknown"),
        };
    }

    let decision_id = decision_id_of(decision);
    let Some(raw_class) = decision.get("decision_class").and_then(Value::as_str) else {
        return GateResult {
            decision_id,
            decision_class: "unknown".to_string(),
            verdict: GateVerdict::Block,
            reasons: vec![REASON_MISSING_DECISION_CLASS.to_string()],
            applied_policy: placeholder_applied_policy(policy, "unknown"),
        };
    };

    if DecisionClass::normalize(raw_class).is_none() {
        return GateResult {
            decision_id,
            decision_class: raw_class.to_string(),
            verdict: GateVerdict::Block,
            reasons: vec![format!("unknown decision class '{raw_class}'")],
            applied_policy: placeholder_applied_policy(policy, raw_class),
        };
    }

    let resolved = resolve_class_policy(policy, raw_class);
    let signals = read_signals(decision);
    let mut reasons = Vec::new();

    match signals.health_score {
        None => reasons.push("missing or invalid system_health_score".to_string()),
        Some(score) if score < resolved.min_health_score => {
            reasons.push(format!(
                "system_health_score {score} below minimum {}",
                resolved.min_health_score
            ));
        }
        Some(_) => {}
    }
    if resolved.require_guardian_ok && !signals.guardian_ok.is_true() {
        reasons.push("guardian_ok is not true".to_string());
    }
    if resolved.require_trace && !signals.decision_trace_present.is_true() {
        reasons.push("decision_trace_present is not true".to_string());
    }
    if resolved.require_status_endpoint && !signals.status_endpoint_ok.is_true() {
        reasons.push("status_endpoint_ok is not true".to_string());
    }

    let mut verdict = if reasons.is_empty() {
        GateVerdict::Allow
    } else {
        resolved.on_fail
    };

    if verdict == GateVerdict::Escalate && !policy.enforcement.allow_human_override {
        reasons.push("escalation requires human override, which is disabled".to_string());
        verdict = GateVerdict::Block;
    }

    if policy.enforcement.mode == EnforcementMode::Advisory && verdict == GateVerdict::Block {
        reasons.push("downgraded from BLOCK to ESCALATE under advisory mode".to_string());
        verdict = GateVerdict::Escalate;
    }

    GateResult {
        decision_id,
        decision_class: raw_class.to_string(),
        verdict,
        reasons,
        applied_policy: applied_policy(policy, raw_class, &resolved),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use george_policy::gate_policy::EnforcementConfig;
    use george_policy::gate_policy::Thresholds;
    use std::collections::BTreeMap;

    fn enforcing_policy(default_action: GateVerdict, min_health_score: f64) -> GatePolicy {
        GatePolicy {
            enforcement: EnforcementConfig {
                mode: EnforcementMode::Enforcing,
                default_action,
                allow_human_override: true,
            },
            decision_classes: BTreeMap::new(),
            thresholds: Thresholds { min_health_score },
        }
    }

    fn decision(class: &str, health_score: f64) -> Value {
        serde_json::json!({
            "id": "11111111-1111-1111-1111-111111111111",
            "decision_class": class,
            "signals": {"system_health_score": health_score},
        })
    }

    #[test]
    fn allows_when_class_and_health_satisfy_the_policy() {
        let policy = enforcing_policy(GateVerdict::Block, 0.5);
        let result = evaluate(&decision("operational", 0.9), &policy);
        assert_eq!(result.verdict, GateVerdict::Allow);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn missing_decision_class_blocks_with_the_spec_reason_text() {
        let policy = enforcing_policy(GateVerdict::Block, 0.5);
        let result = evaluate(&serde_json::json!({"id": "x"}), &policy);
        assert_eq!(result.verdict, GateVerdict::Block);
        assert_eq!(result.reasons, vec![REASON_MISSING_DECISION_CLASS.to_string()]);
    }

    #[test]
    fn legacy_list_input_is_rejected() {
        let policy = enforcing_policy(GateVerdict::Block, 0.5);
        let result = evaluate(&serde_json::json!([1, 2, 3]), &policy);
        assert_eq!(result.verdict, GateVerdict::Block);
        assert!(result.reasons[0].contains("legacy list-shaped"));
    }

    #[test]
    fn unknown_decision_class_is_always_blocked() {
        let policy = enforcing_policy(GateVerdict::Allow, 0.0);
        let result = evaluate(&decision("not_a_real_class", 1.0), &policy);
        assert_eq!(result.verdict, GateVerdict::Block);
        assert!(result.reasons[0].contains("unknown decision class"));
    }

    #[test]
    fn advisory_mode_never_blocks() {
        let mut policy = enforcing_policy(GateVerdict::Block, 0.9);
        policy.enforcement.mode = EnforcementMode::Advisory;
        let result = evaluate(&decision("operational", 0.1), &policy);
        assert_eq!(result.verdict, GateVerdict::Escalate);
        assert!(result.reasons.iter().any(|r| r.contains("downgraded")));
    }

    #[test]
    fn escalate_without_human_override_becomes_block() {
        let mut policy = enforcing_policy(GateVerdict::Escalate, 0.9);
        policy.enforcement.allow_human_override = false;
        let result = evaluate(&decision("operational", 0.1), &policy);
        assert_eq!(result.verdict, GateVerdict::Block);
    }

    #[test]
    fn low_health_score_produces_a_threshold_reason() {
        let policy = enforcing_policy(GateVerdict::Escalate, 0.6);
        let result = evaluate(&decision("operational", 0.4), &policy);
        assert_eq!(result.verdict, GateVerdict::Escalate);
        assert!(result.reasons.iter().any(|r| r.contains("below minimum")));
    }

    #[test]
    fn nan_health_score_is_treated_as_missing() {
        let policy = enforcing_policy(GateVerdict::Block, 0.5);
        let mut value = decision("operational", 0.0);
        value["signals"]["system_health_score"] = serde_json::json!(f64::NAN);
        let result = evaluate(&value, &policy);
        assert!(result.reasons.iter().any(|r| r.contains("missing or invalid")));
    }

    #[test]
    fn required_guardian_ok_blocks_when_absent() {
        let mut policy = enforcing_policy(GateVerdict::Block, 0.0);
        policy.decision_classes.insert(
            "operational".to_string(),
            ClassPolicy {
                require_guardian_ok: Some(true),
                ..ClassPolicy::default()
            },
        );
        let result = evaluate(&decision("operational", 1.0), &policy);
        assert_eq!(result.verdict, GateVerdict::Block);
        assert!(result.reasons.iter().any(|r| r.contains("guardian_ok")));
    }
}
