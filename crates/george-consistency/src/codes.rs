// crates/george-consistency/src/codes.rs
// ============================================================================
// Module: George Consistency Finding Codes
// Description: The stable code taxonomy for every Consistency Validator check.
// Purpose: One table, so the mapping from code to invariant is auditable in
//          a single place rather than scattered across check functions.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Every code below is checked by exactly one function in [`crate::checks`]
//! and always produces exactly one [`crate::Finding`] at PASS, WARN, or FAIL
//! level — the code never changes meaning depending on the outcome.

/// `ops/reports/system_status.json` could not be read or parsed as JSON.
pub const SSOT_UNREADABLE: &str = "CNS-SSOT-001";
/// `system_status.links.latest` does not equal the canonical decision path (I1).
pub const SSOT_LATEST_LINK: &str = "CNS-SSOT-002";
/// `system_status.links.decision_trace` does not equal the canonical trace path (I1).
pub const SSOT_TRACE_LINK: &str = "CNS-SSOT-003";
/// `system_status.links.gate_result` does not equal the canonical gate result path (I1).
pub const SSOT_GATE_LINK: &str = "CNS-SSOT-005";

/// A line in the decision-trace tail window is not valid JSON.
pub const TRACE_MALFORMED_LINE: &str = "CNS-TRACE-001";
/// The decision-trace tail window is empty.
pub const TRACE_EMPTY_TAIL: &str = "CNS-TRACE-002";
/// `gate_result.decision_id` does not appear in the trace tail window (I2).
pub const TRACE_DECISION_ID_MISSING: &str = "CNS-TRACE-010";
/// A `trace_id` repeats within the tail window (I4).
pub const TRACE_DUPLICATE_ID: &str = "CNS-TRACE-011";
/// A trace entry is missing a syntactically valid timestamp (I3).
pub const TRACE_INVALID_TIMESTAMP: &str = "CNS-TRACE-020";
/// A trace entry's `trace_version` is not `"v1"` (I3).
pub const TRACE_VERSION_MISMATCH: &str = "CNS-TRACE-030";

/// `ops/decisions/gate_result.json` could not be read or parsed as JSON.
pub const GATE_UNREADABLE: &str = "CNS-GATE-001";
/// `gate_result.verdict` is not drawn from the closed verdict vocabulary (I5).
pub const GATE_VERDICT_VOCAB: &str = "CNS-GATE-002";
/// `gate_result.verdict = ALLOW` but the decision's health score falls below
/// the applied policy's minimum (§8 testable property).
pub const GATE_ALLOW_BELOW_THRESHOLD: &str = "CNS-GATE-003";

/// The agent registry (`ops/autonomy.json`) could not be loaded.
pub const REG_UNREADABLE: &str = "CNS-REG-001";
/// An agent named in `system_status.agents` is absent from the registry (I6).
pub const REG_AGENT_NOT_REGISTERED: &str = "CNS-REG-002";
/// An agent's status in `system_status.agents` is not drawn from the closed
/// agent-state vocabulary (I5).
pub const REG_AGENT_STATE_VOCAB: &str = "CNS-REG-003";

/// `system_status.health.signal` is not drawn from the closed health-signal
/// vocabulary (I5).
pub const HEALTH_SIGNAL_VOCAB: &str = "CNS-HEALTH-001";

/// `system_status.generated_at` is not a syntactically valid RFC 3339
/// timestamp.
pub const TIME_INVALID: &str = "CNS-TIME-001";
/// `system_status.generated_at` is ahead of the validator's own clock,
/// suggesting clock skew between writers.
pub const TIME_SKEW: &str = "CNS-TIME-002";

/// An internal error prevented the validator from completing one or more
/// checks (e.g. the rule file itself failed to load). Always FAIL: a
/// validator that cannot confirm its own inputs must not report PASS.
pub const TOOL_ERR: &str = "CNS-TOOL-ERR";
