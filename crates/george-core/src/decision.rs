// crates/george-core/src/decision.rs
// ============================================================================
// Module: George Decision
// Description: The outcome of routing one event through the Rule Engine,
//              Guardian, and Authority.
// Purpose: Canonical record appended to the trace and read back by the
//          Runtime Gate and Consistency Validator.
// Dependencies: crate::identifiers, crate::time, crate::authority,
//               crate::health, crate::trace, serde
// ============================================================================

//! ## Overview
//! A `Decision` is produced once per event and carries everything the
//! downstream readers (Runtime Gate, Consistency Validator) need without
//! re-deriving it: the resolved decision class, the chosen agent/action,
//! the authority source, a health snapshot, an embedded phase-level trace
//! summary, and the signal snapshot the Gate will read. The full append-only
//! audit record lives in `ops/reports/decision_trace.jsonl`
//! (see [`crate::TraceEntry`]); `decision_trace` on this type is a smaller,
//! embedded mirror scoped to this one decision, so a reader holding only
//! `latest.json` never needs to tail the JSONL file to see what happened.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::health::HealthState;
use crate::identifiers::AgentId;
use crate::identifiers::DecisionId;
use crate::identifiers::EventId;
use crate::time::Timestamp;
use crate::trace::TraceResult;

/// The terminal status of a [`Decision`] after the Orchestrator pipeline
/// finishes processing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    /// Still moving through the pipeline (never persisted in this state).
    Pending,
    /// Executed and postchecked successfully.
    Success,
    /// Execution or postcheck failed.
    Error,
    /// Blocked before execution by the Guardian, Authority, or an
    /// emergency lock.
    Blocked,
}

/// Who supplied the authority behind a [`Decision`]'s outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthoritySource {
    /// The Orchestrator itself, acting on `agent`- or `guardian`-level
    /// authority resolved by the Authority component.
    George,
    /// The Guardian precheck rejected the decision before Authority ran.
    Guardian,
    /// The decision requires (or was blocked pending) human sign-off.
    Human,
}

/// One phase-level entry embedded on a [`Decision`], mirroring the
/// corresponding line appended to `ops/reports/decision_trace.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    /// The pipeline phase this entry reports on.
    pub phase: String,
    /// The outcome of that phase.
    pub result: TraceResult,
    /// Free-form supplementary detail.
    #[serde(default)]
    pub detail: Value,
}

impl PhaseRecord {
    /// Builds a phase record with no supplementary detail.
    #[must_use]
    pub fn new(phase: impl Into<String>, result: TraceResult) -> Self {
        Self {
            phase: phase.into(),
            result,
            detail: Value::Null,
        }
    }
}

/// Execution-time context captured by the Executor, embedded on the
/// [`Decision`] so readers can see what running the action actually did
/// without a separate lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Whether this execution was simulated (always `true` in this core;
    /// the extension point for a real executor sets this to `false`).
    #[serde(default)]
    pub simulated: bool,
    /// Human-readable summary of what was executed, when execution ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Whether the Executor was cancelled before completing.
    #[serde(default)]
    pub cancelled: bool,
}

/// The signal snapshot a [`Decision`] carries for Runtime Gate evaluation.
///
/// # Invariants
/// - Each field is `None` when the underlying source was unavailable at
///   decision time, never a sentinel like `0.0` or `false`; the Gate reads
///   absence as [`crate::tristate::TriState::Unknown`], not as failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    /// System health score at the time this decision was made, in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_health_score: Option<f64>,
    /// Whether the Guardian precheck passed for this decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_ok: Option<bool>,
    /// Whether the status endpoint was reachable and well-formed when this
    /// decision was evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_endpoint_ok: Option<bool>,
    /// Whether a trace entry was successfully appended for this decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_trace_present: Option<bool>,
}

/// The outcome of routing one [`crate::Event`] through the pipeline.
///
/// # Invariants
/// - For every decision with `status = blocked`,
///   `signals.decision_trace_present = Some(true)` and
///   `authority_source ∈ {Guardian, Human}` (§8).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Unique identifier of this decision.
    pub id: DecisionId,
    /// When the decision was produced.
    pub timestamp: Timestamp,
    /// The event this decision was made in response to, if supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_event_id: Option<EventId>,
    /// The agent selected to carry out the decision.
    pub agent: AgentId,
    /// The action selected to carry out.
    pub action: String,
    /// The event's intent, carried through for diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    /// The matching rule's confidence, or the fallback confidence of `0.5`
    /// when no rule matched.
    pub confidence: f64,
    /// Terminal status of this decision.
    pub status: DecisionStatus,
    /// Human-readable error detail when `status = error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Stable reason code set by the Guardian (precheck rejection, or a
    /// postcheck failure flag).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_flag: Option<String>,
    /// Free-form suggested follow-up, e.g. surfaced by Self-Healing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
    /// Human-readable summary of the execution result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_summary: Option<String>,
    /// The normalized decision class used for Authority resolution.
    pub decision_class: String,
    /// Who supplied the authority behind this decision's outcome.
    pub authority_source: AuthoritySource,
    /// Health state snapshot taken immediately after Guardian postcheck.
    pub health_context: HealthState,
    /// Embedded mirror of this decision's phase-level trace entries.
    #[serde(default)]
    pub decision_trace: Vec<PhaseRecord>,
    /// Execution-time context captured by the Executor.
    #[serde(default)]
    pub execution_context: ExecutionContext,
    /// Signal snapshot read by the Runtime Gate.
    #[serde(default)]
    pub signals: Signals,
}

impl Decision {
    /// The confidence assigned to a decision when no rule matched.
    pub const FALLBACK_CONFIDENCE: f64 = 0.5;

    /// Returns true if this decision's invariants for a blocked terminal
    /// state are satisfied (§8): trace presence recorded, and authority
    /// sourced from Guardian or a human escalation.
    #[must_use]
    pub fn blocked_invariants_hold(&self) -> bool {
        if self.status != DecisionStatus::Blocked {
            return true;
        }
        self.signals.decision_trace_present == Some(true)
            && matches!(self.authority_source, AuthoritySource::Guardian | AuthoritySource::Human)
    }
}
