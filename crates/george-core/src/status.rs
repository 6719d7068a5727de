// crates/george-core/src/status.rs
// ============================================================================
// Module: George System Status
// Description: The system-wide source of truth for health and artifact links.
// Purpose: Canonical shape for `ops/reports/system_status.json`.
// Dependencies: crate::agent, crate::time, serde
// ============================================================================

//! ## Overview
//! `SystemStatus` is the SSOT (single source of truth) other components read
//! to discover where the canonical artifacts live (`links`) and what the
//! system's current health looks like at a glance (`health`). Consistency
//! Validator checks I1 and I6 against this type's `links` and `agents` maps.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::agent::AgentStatus;
use crate::time::Timestamp;

/// The closed vocabulary for `SystemStatus.health.signal` (I5). Any other
/// string on the wire is a Consistency Validator finding, not a silent
/// coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthSignal {
    /// The system is operating within normal bounds.
    Healthy,
    /// The system is operating but showing signs of stress.
    Degraded,
    /// The system requires immediate attention.
    Critical,
    /// Health could not be determined.
    Unknown,
}

impl HealthSignal {
    /// Derives a signal from a `system_health_score` in `[0, 1]`, clamping
    /// out-of-range input to the nearest bucket rather than erroring — the
    /// caller is responsible for flagging an out-of-range score elsewhere.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if !score.is_finite() {
            Self::Unknown
        } else if score >= 0.8 {
            Self::Healthy
        } else if score >= 0.5 {
            Self::Degraded
        } else {
            Self::Critical
        }
    }

    /// The canonical wire name for this signal (`snake_case`, matching the
    /// `#[serde]` rename), used by [`crate::rule::RulePreconditions`]'s
    /// `guardian_status` comparison so a rule author writes the same string
    /// that shows up in `system_status.json`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }
}

/// The `system` block of [`SystemStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemBlock {
    /// Free-form operational state (e.g. `"running"`, `"halted"`).
    pub state: String,
    /// The autonomy mode the system is currently operating under.
    pub mode: String,
}

/// The `health` block of [`SystemStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthBlock {
    /// The closed-vocabulary health signal (I5).
    pub signal: HealthSignal,
    /// The overall health score in `[0, 1]`.
    pub overall_score: f64,
}

/// One entry in [`SystemStatus::agents`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatusEntry {
    /// The agent's lifecycle status.
    pub status: AgentStatus,
    /// The agent's configured autonomy level, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autonomy: Option<f64>,
}

/// Canonical artifact paths, checked against the Artifact Store's actual
/// output paths by Consistency Validator check I1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLinks {
    /// Path to the unified decision trace JSONL.
    pub decision_trace: String,
    /// Path to the latest Runtime Gate result.
    pub gate_result: String,
    /// Path to the latest canonical decision.
    pub latest: String,
}

/// The system-wide source of truth for health and artifact links.
///
/// # Invariants
/// - `links` always equal the canonical paths emitted by the Artifact
///   Store (I1).
/// - Every key in `agents` is present in the agent registry (I6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// When this status snapshot was generated.
    pub generated_at: Timestamp,
    /// Deployment environment name (e.g. `"production"`, `"staging"`).
    pub environment: String,
    /// Overall system operational block.
    pub system: SystemBlock,
    /// Overall health block.
    pub health: HealthBlock,
    /// Per-agent status entries, keyed by agent id.
    pub agents: BTreeMap<String, AgentStatusEntry>,
    /// Canonical artifact links.
    pub links: StatusLinks,
}
