// crates/george-core/src/agent.rs
// ============================================================================
// Module: George Agent Profile
// Description: Configuration-only description of a worker agent.
// Purpose: Canonical shape for `ops/autonomy.json` entries.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An agent profile is pure configuration: it carries no behavior, only the
//! facts the Guardian and Authority need to decide whether an agent may act.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Lifecycle status of a worker agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// The agent is active and may be dispatched to.
    Active,
    /// The agent is planned but not yet active.
    Planned,
    /// The agent is temporarily paused.
    Paused,
    /// The agent is permanently inactive.
    Inactive,
}

/// Configuration-only description of a worker agent.
///
/// # Invariants
/// - `autonomy` is always in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Current lifecycle status.
    pub status: AgentStatus,
    /// Autonomy level in `[0, 1]`.
    pub autonomy: f64,
    /// Human-readable role description.
    pub role: String,
    /// Actions this agent is permitted to take.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Failure-handling thresholds.
    #[serde(default)]
    pub failure_thresholds: FailureThresholds,
}

impl AgentProfile {
    /// Returns true if the agent's status is [`AgentStatus::Active`].
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, AgentStatus::Active)
    }
}

/// Failure-handling thresholds for an [`AgentProfile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureThresholds {
    /// When true, a failed postcheck raises `guardian_policy_check` instead
    /// of the default `error_detected` flag.
    #[serde(default)]
    pub trigger_guardian_policy_check: bool,
}

/// The full set of configured agent profiles, keyed by agent id string.
pub type AgentRegistry = BTreeMap<String, AgentProfile>;
