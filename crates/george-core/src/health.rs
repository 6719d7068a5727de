// crates/george-core/src/health.rs
// ============================================================================
// Module: George Health State
// Description: Running counters and derived scores describing system health.
// Purpose: Canonical shape for `latest.json`'s health block; feeds the
//          Runtime Gate's `system_health_score` signal.
// Dependencies: crate::time, serde
// ============================================================================

//! ## Overview
//! `HealthState` accumulates simple counters as the Guardian's postcheck
//! processes every completed pipeline, and derives three bounded scores
//! from them on demand: `agent_response_success_rate`,
//! `system_stability_score`, and `autonomy_level_estimate`. All three are
//! always read fresh from the counters rather than cached, so a
//! `HealthState` loaded from a snapshot is always internally consistent.

use serde::Deserialize;
use serde::Serialize;

use crate::time::Timestamp;

/// Running counters and derived scores describing overall system health.
///
/// # Invariants
/// - All rate/score fields returned by this type's methods are in `[0, 1]`.
/// - `total_actions >= failed_actions` always holds after construction via
///   [`HealthState::register_result`]; a state loaded from disk that
///   violates this is a data-integrity problem for the Consistency
///   Validator to flag, not something this type repairs silently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthState {
    /// Total actions executed since the last reset.
    #[serde(default)]
    pub total_actions: u64,
    /// Actions that failed during execution or postcheck.
    #[serde(default)]
    pub failed_actions: u64,
    /// Count of errors detected by Self-Healing's own detectors.
    #[serde(default)]
    pub self_detection_errors: u64,
    /// Timestamp of the most recent autonomous (non-escalated) action.
    #[serde(default)]
    pub last_autonomous_action: Option<Timestamp>,
}

impl HealthState {
    /// Records the outcome of one executed action, per the Guardian's
    /// postcheck (§4.3): `total_actions` always increments; on failure,
    /// `failed_actions` and `self_detection_errors` both increment.
    pub fn register_result(&mut self, succeeded: bool, at: Timestamp) {
        self.total_actions += 1;
        if succeeded {
            self.last_autonomous_action = Some(at);
        } else {
            self.failed_actions += 1;
            self.self_detection_errors += 1;
        }
    }

    /// Records that Self-Healing's own detectors found a regression,
    /// independent of any executed action.
    pub fn register_self_detection_error(&mut self) {
        self.self_detection_errors += 1;
    }

    /// The fraction of executed actions that succeeded, in `[0, 1]`.
    /// Defined as `1.0` when no actions have been recorded yet: an agent
    /// that has never acted has not failed either.
    #[must_use]
    pub fn agent_response_success_rate(&self) -> f64 {
        if self.total_actions == 0 {
            return 1.0;
        }
        let successes = self.total_actions.saturating_sub(self.failed_actions);
        successes as f64 / self.total_actions as f64
    }

    /// `clamp(success_rate * (1 - 0.1 * self_detection_errors), 0, 1)`,
    /// per §4.3.
    #[must_use]
    pub fn system_stability_score(&self) -> f64 {
        let success_rate = self.agent_response_success_rate();
        let penalty = 1.0 - 0.1 * (self.self_detection_errors as f64);
        (success_rate * penalty).clamp(0.0, 1.0)
    }

    /// `clamp(0.4 + 0.6 * stability, 0, 1)`, per §4.3.
    #[must_use]
    pub fn autonomy_level_estimate(&self) -> f64 {
        (0.4 + 0.6 * self.system_stability_score()).clamp(0.0, 1.0)
    }

    /// The overall `system_health_score` read by the Runtime Gate: the
    /// stability score, unmodified. Kept as a distinct method so that the
    /// Gate's signal name and this type's derivation can diverge later
    /// without renaming either.
    #[must_use]
    pub fn system_health_score(&self) -> f64 {
        self.system_stability_score()
    }
}
