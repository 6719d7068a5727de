// crates/george-runtime/src/guardian.rs
// ============================================================================
// Module: George Guardian
// Description: Agent-readiness precheck and health-accounting postcheck.
// Purpose: Implements §4.3 exactly: precheck gates on profile status and
//          autonomy; postcheck always updates HealthState regardless of
//          precheck/authority outcome.
// Dependencies: george-core
// ============================================================================

//! ## Overview
//! The Guardian runs twice per event: once before execution (`precheck`,
//! which may reject the decision outright) and once after (`postcheck`,
//! which always records the outcome into [`george_core::HealthState`] — even
//! when the decision never reached execution, per the "after any sequence
//! of Guardian postchecks" invariant in §8).

use george_core::AgentProfile;
use george_core::HealthState;
use george_core::Timestamp;
use george_core::rule::RuleThen;

/// Stable Guardian precheck rejection reason codes.
pub mod reason {
    /// `profile.status != active`.
    pub const AGENT_INACTIVE: &str = "agent_inactive";
    /// `profile.autonomy < rule.min_autonomy`.
    pub const AUTONOMY_TOO_LOW: &str = "autonomy_too_low";
    /// A postcheck failure where the agent's `failure_thresholds` requests
    /// escalation to a policy check rather than a bare error flag.
    pub const GUARDIAN_POLICY_CHECK: &str = "guardian_policy_check";
    /// The default postcheck failure flag.
    pub const ERROR_DETECTED: &str = "error_detected";
}

/// The Guardian precheck's rejection outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecheckRejection {
    /// The stable reason code for the rejection.
    pub reason: &'static str,
}

/// Runs the Guardian precheck against `profile`, honoring `then.min_autonomy`
/// when the matched rule specifies one (absent means no minimum).
///
/// # Errors
///
/// Returns [`PrecheckRejection`] when the agent is not active, or its
/// autonomy falls below the rule's required minimum.
pub fn guardian_precheck(profile: &AgentProfile, then: &RuleThen) -> Result<(), PrecheckRejection> {
    if !profile.is_active() {
        return Err(PrecheckRejection {
            reason: reason::AGENT_INACTIVE,
        });
    }
    if let Some(min_autonomy) = then.min_autonomy {
        if profile.autonomy < min_autonomy {
            return Err(PrecheckRejection {
                reason: reason::AUTONOMY_TOO_LOW,
            });
        }
    }
    Ok(())
}

/// Runs the Guardian postcheck: always records `succeeded` into `health`,
/// and returns the stable guardian flag to set on the decision when the
/// action failed (`None` on success).
pub fn guardian_postcheck(
    health: &mut HealthState,
    profile: &AgentProfile,
    succeeded: bool,
    at: Timestamp,
) -> Option<&'static str> {
    health.register_result(succeeded, at);
    if succeeded {
        return None;
    }
    if profile.failure_thresholds.trigger_guardian_policy_check {
        Some(reason::GUARDIAN_POLICY_CHECK)
    } else {
        Some(reason::ERROR_DETECTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use george_core::AgentStatus;
    use george_core::agent::FailureThresholds;

    fn ts() -> Timestamp {
        Timestamp::parse("2026-07-28T00:00:00Z").expect("parse")
    }

    fn active_profile(autonomy: f64) -> AgentProfile {
        AgentProfile {
            status: AgentStatus::Active,
            autonomy,
            role: "monitoring agent".to_string(),
            actions: Vec::new(),
            failure_thresholds: FailureThresholds::default(),
        }
    }

    #[test]
    fn inactive_agent_is_rejected_before_autonomy_check() {
        let mut profile = active_profile(0.0);
        profile.status = AgentStatus::Paused;
        let rejection = guardian_precheck(&profile, &RuleThen::default()).expect_err("rejected");
        assert_eq!(rejection.reason, reason::AGENT_INACTIVE);
    }

    #[test]
    fn autonomy_below_rule_minimum_is_rejected() {
        let profile = active_profile(0.2);
        let then = RuleThen {
            min_autonomy: Some(0.5),
            ..RuleThen::default()
        };
        let rejection = guardian_precheck(&profile, &then).expect_err("rejected");
        assert_eq!(rejection.reason, reason::AUTONOMY_TOO_LOW);
    }

    #[test]
    fn sufficient_autonomy_passes_precheck() {
        let profile = active_profile(0.8);
        let then = RuleThen {
            min_autonomy: Some(0.5),
            ..RuleThen::default()
        };
        assert!(guardian_precheck(&profile, &then).is_ok());
    }

    #[test]
    fn postcheck_always_updates_health_even_on_success() {
        let mut health = HealthState::default();
        let profile = active_profile(0.8);
        let flag = guardian_postcheck(&mut health, &profile, true, ts());
        assert!(flag.is_none());
        assert_eq!(health.total_actions, 1);
        assert_eq!(health.failed_actions, 0);
    }

    #[test]
    fn failed_postcheck_flags_error_detected_by_default() {
        let mut health = HealthState::default();
        let profile = active_profile(0.8);
        let flag = guardian_postcheck(&mut health, &profile, false, ts());
        assert_eq!(flag, Some(reason::ERROR_DETECTED));
        assert_eq!(health.failed_actions, 1);
    }

    #[test]
    fn failed_postcheck_flags_guardian_policy_check_when_configured() {
        let mut health = HealthState::default();
        let mut profile = active_profile(0.8);
        profile.failure_thresholds.trigger_guardian_policy_check = true;
        let flag = guardian_postcheck(&mut health, &profile, false, ts());
        assert_eq!(flag, Some(reason::GUARDIAN_POLICY_CHECK));
    }
}
