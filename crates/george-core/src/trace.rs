// crates/george-core/src/trace.rs
// ============================================================================
// Module: George Trace Entry
// Description: One append-only audit record of a pipeline phase transition.
// Purpose: Canonical shape for lines appended to the JSONL trace log; read
//          back by the Consistency Validator and the Runtime Gate's
//          `decision_trace_present` signal.
// Dependencies: crate::identifiers, crate::time, serde, serde_json
// ============================================================================

//! ## Overview
//! Every phase transition in the Orchestrator's state machine emits one
//! `TraceEntry`, appended to the trace log and never rewritten. The trace
//! is the sole source of truth for "did this actually happen" questions;
//! nothing downstream reconstructs history from any other artifact.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::identifiers::DecisionId;
use crate::identifiers::TraceId;
use crate::time::Timestamp;

/// The trace schema version written by this crate. A Consistency Validator
/// finding is raised (`CNS-TRACE-*`) if a line carries a different value.
pub const TRACE_VERSION: &str = "v1";

/// The component that authored a [`TraceEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    /// The Orchestrator itself.
    George,
    /// The Guardian pre/postcheck component.
    Guardian,
    /// The Authority resolution component.
    Authority,
    /// The Executor.
    Executor,
    /// A Self-Healing detector or remediation step.
    SelfHealing,
}

/// The outcome recorded for a traced phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceResult {
    /// The phase completed successfully.
    Ok,
    /// The phase completed but raised a blocking condition.
    Blocked,
    /// The phase failed.
    Error,
}

/// One append-only audit record.
///
/// # Invariants
/// - `trace_version` is always [`TRACE_VERSION`] for entries produced by
///   this crate.
/// - Never mutated or removed once appended; corrections are new entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Unique identifier of this trace entry.
    pub id: TraceId,
    /// Schema version, always [`TRACE_VERSION`] when produced here.
    pub trace_version: String,
    /// When this entry was recorded.
    pub ts: Timestamp,
    /// The decision this entry pertains to.
    pub decision_id: DecisionId,
    /// Which component authored this entry.
    pub actor: Actor,
    /// The pipeline phase this entry reports on (e.g. `"pre_check"`,
    /// `"execute"`, `"post_check"`).
    pub phase: String,
    /// The outcome of that phase.
    pub result: TraceResult,
    /// Free-form supplementary detail.
    #[serde(default)]
    pub detail: Value,
}

impl TraceEntry {
    /// Builds a new trace entry stamped with the current [`TRACE_VERSION`].
    #[must_use]
    pub fn new(
        id: TraceId,
        ts: Timestamp,
        decision_id: DecisionId,
        actor: Actor,
        phase: impl Into<String>,
        result: TraceResult,
    ) -> Self {
        Self {
            id,
            trace_version: TRACE_VERSION.to_string(),
            ts,
            decision_id,
            actor,
            phase: phase.into(),
            result,
            detail: Value::Null,
        }
    }
}
