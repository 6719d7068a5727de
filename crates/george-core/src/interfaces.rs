// crates/george-core/src/interfaces.rs
// ============================================================================
// Module: George Interfaces
// Description: Backend-agnostic capability interfaces for storage, execution,
//              and change-set proposal.
// Purpose: Define the contract surfaces the runtime depends on, so concrete
//          implementations (filesystem store, simulated executor, no-op
//          change-set sink) are swappable without touching callers.
// Dependencies: crate::decision, crate::trace, crate::time, crate::identifiers,
//               serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every component that talks to the outside world (the filesystem, a VCS,
//! a real action dispatcher) does so through a trait defined here, following
//! the "subprocess-based triggering becomes an explicit collaborator
//! interface" design note: the governance core depends on these traits, not
//! on any concrete backend, and every trait ships a deterministic in-core
//! implementation (`george-store::FsArtifactStore`, the runtime's simulated
//! Executor, [`NoopChangeSetSink`]).

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::decision::Decision;
use crate::identifiers::AgentId;
use crate::identifiers::EventId;
use crate::snapshot::SnapshotUpdate;
use crate::time::Timestamp;
use crate::trace::TraceEntry;

// ============================================================================
// SECTION: Artifact Store
// ============================================================================

/// Errors raised by an [`ArtifactStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying filesystem (or other backend) returned an I/O error.
    #[error("artifact store io error at {path}: {source}")]
    Io {
        /// The path being read or written when the error occurred.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A value could not be encoded to its wire representation.
    #[error("artifact store encode error: {0}")]
    Encode(String),
    /// A value could not be decoded from its wire representation.
    #[error("artifact store decode error at {path}: {detail}")]
    Decode {
        /// The path being decoded.
        path: String,
        /// Decode failure detail.
        detail: String,
    },
    /// A snapshot file was corrupt and has been re-initialized; the caller
    /// should surface this as a warning, not fail the write.
    #[error("corrupt snapshot at {path} re-initialized: {detail}")]
    CorruptSnapshot {
        /// The path of the corrupt snapshot.
        path: String,
        /// What was wrong with it.
        detail: String,
    },
}

/// Append-only JSONL traces, atomic JSON writes, tail reads, and per-day
/// snapshot aggregation. The sole writer contract named in §4.1 — one
/// `ArtifactStore` per process, used by every component that persists
/// state.
pub trait ArtifactStore {
    /// Appends one trace entry as a single JSON line, terminated by `\n`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the append fails.
    fn append_trace(&self, path: &Path, entry: &TraceEntry) -> Result<(), StoreError>;

    /// Atomically writes `value` to `path` (temp-sibling-plus-rename).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    fn write_canonical(&self, path: &Path, value: &Value) -> Result<(), StoreError>;

    /// Reads the last `n` lines of the JSONL file at `path`, oldest first.
    /// Returns an empty vector if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the file exists but cannot be read.
    fn read_tail(&self, path: &Path, n: usize) -> Result<Vec<String>, StoreError>;

    /// Appends one arbitrary JSON value to `path` as a single compact line
    /// terminated by `\n` (e.g. `ops/reports/health_log.jsonl`). Shares the
    /// line-atomic append discipline of [`ArtifactStore::append_trace`]
    /// without requiring the payload to be a [`TraceEntry`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the append fails.
    fn append_jsonl(&self, path: &Path, value: &Value) -> Result<(), StoreError>;

    /// Loads (or initializes) the snapshot at `path`, folds `decision` into
    /// it, writes it back atomically, and returns the updated snapshot.
    ///
    /// A corrupt existing snapshot is re-initialized rather than
    /// propagated as an error (§4.1, §7): the returned
    /// [`SnapshotUpdate::recovered_corruption`] carries the one warning the
    /// caller should surface; no future write is lost.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the read or write fails for a reason
    /// other than snapshot corruption (e.g. a permissions error).
    fn update_snapshot(
        &self,
        path: &Path,
        date: &str,
        decision: &Decision,
        at: Timestamp,
    ) -> Result<SnapshotUpdate, StoreError>;
}

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Errors raised by an [`Executor`] implementation.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The action failed during execution.
    #[error("execution failed: {0}")]
    Failed(String),
    /// The action was cancelled before completing.
    #[error("execution cancelled")]
    Cancelled,
    /// The action timed out.
    #[error("execution timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

/// The request passed to an [`Executor`].
#[derive(Debug, Clone)]
pub struct ExecutionRequest<'a> {
    /// The target agent.
    pub agent: &'a AgentId,
    /// The action to invoke.
    pub action: &'a str,
    /// The originating event's identifier, for correlation.
    pub event_id: EventId,
    /// The agent's configured role, used to build the result summary.
    pub role: &'a str,
}

/// The outcome of invoking an [`Executor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Whether the action succeeded.
    pub success: bool,
    /// A human-readable summary of what happened.
    pub summary: String,
}

/// Invokes the action selected by the Rule Engine and Authority. The sole
/// production implementation in this core always simulates success; a real
/// dispatcher is a drop-in trait implementation, not a rewrite (§4.5, §9).
pub trait Executor {
    /// Executes `request` synchronously from the Orchestrator's
    /// perspective.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError`] when the action fails, is cancelled, or
    /// times out.
    fn execute(&self, request: &ExecutionRequest<'_>) -> Result<ExecutionOutcome, ExecutorError>;
}

// ============================================================================
// SECTION: Change-Set Sink
// ============================================================================

/// Errors raised by a [`ChangeSetSink`] implementation.
#[derive(Debug, Error)]
pub enum ChangeSetError {
    /// The sink failed to record or publish the proposed change set.
    #[error("change set sink error: {0}")]
    Failed(String),
}

/// One file proposed as part of a Self-Healing repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedFile {
    /// Repository-relative path of the proposed file.
    pub path: String,
    /// The full proposed file contents.
    pub contents: String,
}

/// A Self-Healing repair, proposed but never applied by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    /// The deterministic branch name this change set would land on.
    pub branch: String,
    /// The files this change set proposes to write.
    pub files: Vec<ProposedFile>,
    /// A human-readable summary of the regression and repair.
    pub summary: String,
}

/// Receives a Self-Healing [`ChangeSet`] for review. Never commits or
/// deploys on its own; this is the "subprocess-based triggering becomes an
/// explicit collaborator interface" extension point from §9.
pub trait ChangeSetSink {
    /// Records or publishes `change_set` for human review.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeSetError`] when the sink cannot record the proposal.
    fn propose(&self, change_set: &ChangeSet) -> Result<(), ChangeSetError>;
}

/// A [`ChangeSetSink`] that discards every proposal, for contexts that only
/// care about the trace entry and in-memory `ChangeSet` value.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopChangeSetSink;

impl ChangeSetSink for NoopChangeSetSink {
    fn propose(&self, _change_set: &ChangeSet) -> Result<(), ChangeSetError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_always_succeeds() {
        let sink = NoopChangeSetSink;
        let change_set = ChangeSet {
            branch: "self-heal/test".to_string(),
            files: Vec::new(),
            summary: "test".to_string(),
        };
        assert!(sink.propose(&change_set).is_ok());
    }
}
