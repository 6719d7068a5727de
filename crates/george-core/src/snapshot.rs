// crates/george-core/src/snapshot.rs
// ============================================================================
// Module: George Daily Snapshot
// Description: Per-day aggregate decision counters.
// Purpose: Canonical shape for `ops/decisions/snapshots/<YYYY-MM-DD>.json`.
// Dependencies: crate::decision, crate::identifiers, serde
// ============================================================================

//! ## Overview
//! A `DailySnapshot` is a running aggregate the Artifact Store maintains as
//! decisions are written, so readers don't need to replay an entire day's
//! history JSONL to answer "how many decisions happened today".

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::decision::Decision;
use crate::decision::DecisionStatus;
use crate::identifiers::DecisionId;
use crate::time::Timestamp;

/// Per-agent decision counters within a [`DailySnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCounts {
    /// Total decisions routed to this agent today.
    pub total: u64,
    /// Decisions that succeeded.
    pub success: u64,
    /// Decisions that errored.
    pub error: u64,
    /// Decisions that were blocked.
    pub blocked: u64,
}

impl AgentCounts {
    fn record(&mut self, status: DecisionStatus) {
        self.total += 1;
        match status {
            DecisionStatus::Success => self.success += 1,
            DecisionStatus::Error => self.error += 1,
            DecisionStatus::Blocked => self.blocked += 1,
            DecisionStatus::Pending => {}
        }
    }
}

/// Per-day aggregate decision counters, maintained by the Artifact Store.
///
/// # Invariants
/// - `total_decisions = successful + error + blocked` after every
///   [`DailySnapshot::record`] call (pending decisions are never recorded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// The calendar date this snapshot aggregates, `YYYY-MM-DD`.
    pub date: String,
    /// Total decisions recorded today.
    pub total_decisions: u64,
    /// Decisions that succeeded.
    pub successful: u64,
    /// Decisions that errored.
    pub error: u64,
    /// Decisions that were blocked.
    pub blocked: u64,
    /// Per-agent breakdown, keyed by agent id.
    pub by_agent: BTreeMap<String, AgentCounts>,
    /// The most recently recorded decision's id.
    pub last_decision_id: Option<DecisionId>,
    /// When this snapshot was last updated.
    pub last_updated: Timestamp,
}

/// The result of [`crate::interfaces::ArtifactStore::update_snapshot`]: the
/// updated snapshot, plus a non-fatal warning when the existing snapshot on
/// disk was corrupt and had to be re-initialized (§4.1, §7 — corruption is
/// recovered, not propagated as a hard failure).
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotUpdate {
    /// The updated snapshot, folding in the just-recorded decision.
    pub snapshot: DailySnapshot,
    /// Set when the on-disk snapshot was corrupt and was re-initialized
    /// before folding in this update.
    pub recovered_corruption: Option<String>,
}

impl DailySnapshot {
    /// Builds an empty snapshot for `date`.
    #[must_use]
    pub fn empty(date: impl Into<String>, at: Timestamp) -> Self {
        Self {
            date: date.into(),
            total_decisions: 0,
            successful: 0,
            error: 0,
            blocked: 0,
            by_agent: BTreeMap::new(),
            last_decision_id: None,
            last_updated: at,
        }
    }

    /// Folds one decision into this snapshot's counters.
    ///
    /// A decision whose status is [`DecisionStatus::Pending`] is never
    /// persisted by the Orchestrator and is ignored here too, matching the
    /// invariant above.
    pub fn record(&mut self, decision: &Decision, at: Timestamp) {
        if decision.status == DecisionStatus::Pending {
            return;
        }
        self.total_decisions += 1;
        match decision.status {
            DecisionStatus::Success => self.successful += 1,
            DecisionStatus::Error => self.error += 1,
            DecisionStatus::Blocked => self.blocked += 1,
            DecisionStatus::Pending => unreachable!("filtered above"),
        }
        self.by_agent
            .entry(decision.agent.as_str().to_string())
            .or_default()
            .record(decision.status);
        self.last_decision_id = Some(decision.id);
        self.last_updated = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::AuthoritySource;
    use crate::decision::ExecutionContext;
    use crate::decision::Signals;
    use crate::health::HealthState;
    use crate::identifiers::AgentId;

    fn ts() -> Timestamp {
        Timestamp::parse("2026-07-28T00:00:00Z").expect("parse")
    }

    fn decision(status: DecisionStatus, agent: &str) -> Decision {
        Decision {
            id: DecisionId::new(),
            timestamp: ts(),
            source_event_id: None,
            agent: AgentId::new(agent),
            action: "heartbeat".to_string(),
            intent: None,
            confidence: 0.5,
            status,
            error_message: None,
            guardian_flag: None,
            follow_up: None,
            result_summary: None,
            decision_class: "operational".to_string(),
            authority_source: AuthoritySource::George,
            health_context: HealthState::default(),
            decision_trace: Vec::new(),
            execution_context: ExecutionContext::default(),
            signals: Signals::default(),
        }
    }

    #[test]
    fn records_totals_match_breakdown_sum() {
        let mut snapshot = DailySnapshot::empty("2026-07-28", ts());
        snapshot.record(&decision(DecisionStatus::Success, "monitoring"), ts());
        snapshot.record(&decision(DecisionStatus::Error, "monitoring"), ts());
        snapshot.record(&decision(DecisionStatus::Blocked, "deploy"), ts());
        assert_eq!(snapshot.total_decisions, 3);
        assert_eq!(snapshot.successful + snapshot.error + snapshot.blocked, 3);
        assert_eq!(snapshot.by_agent["monitoring"].total, 2);
        assert_eq!(snapshot.by_agent["deploy"].blocked, 1);
    }

    #[test]
    fn pending_decisions_are_not_recorded() {
        let mut snapshot = DailySnapshot::empty("2026-07-28", ts());
        snapshot.record(&decision(DecisionStatus::Pending, "monitoring"), ts());
        assert_eq!(snapshot.total_decisions, 0);
        assert!(snapshot.by_agent.is_empty());
    }
}
