// crates/george-cli/src/status_writer.rs
// ============================================================================
// Module: George Status Writer
// Description: Builds `ops/reports/system_status.json` after an Orchestrator
//              run.
// Purpose: The sole writer of the system status SSOT (§6's "Status writer"
//          role) — assembled from the same `HealthState` and agent registry
//          the Orchestrator and Guardian already computed, never recomputed
//          independently.
// Dependencies: george-core
// ============================================================================

//! ## Overview
//! `build_system_status` is deliberately pure: it takes the already-computed
//! [`HealthState`] and [`AgentRegistry`] and assembles the `SystemStatus`
//! shape the Consistency Validator's `I1`/`I6` checks expect, using the same
//! canonical paths the Artifact Store itself writes to.

use george_core::AgentRegistry;
use george_core::HealthState;
use george_core::Timestamp;
use george_core::paths::PathConfig;
use george_core::status::AgentStatusEntry;
use george_core::status::HealthBlock;
use george_core::status::HealthSignal;
use george_core::status::StatusLinks;
use george_core::status::SystemBlock;
use george_core::status::SystemStatus;

/// Assembles the system status snapshot for this run.
///
/// `locked` reflects whether the emergency lock was engaged; `registry`
/// supplies every agent's lifecycle status and configured autonomy.
#[must_use]
pub fn build_system_status(
    paths: &PathConfig,
    registry: &AgentRegistry,
    health: &HealthState,
    locked: bool,
    now: Timestamp,
) -> SystemStatus {
    let agents = registry
        .iter()
        .map(|(id, profile)| {
            (
                id.clone(),
                AgentStatusEntry { status: profile.status, autonomy: Some(profile.autonomy) },
            )
        })
        .collect();

    SystemStatus {
        generated_at: now,
        environment: paths.mode.clone(),
        system: SystemBlock {
            state: if locked { "locked".to_string() } else { "running".to_string() },
            mode: paths.mode.clone(),
        },
        health: HealthBlock {
            signal: HealthSignal::from_score(health.system_health_score()),
            overall_score: health.system_health_score(),
        },
        agents,
        links: StatusLinks {
            decision_trace: paths.decision_trace.display().to_string(),
            gate_result: paths.gate_result.display().to_string(),
            latest: paths.latest_decision.display().to_string(),
        },
    }
}
