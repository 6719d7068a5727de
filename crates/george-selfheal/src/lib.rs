#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only assertions are permitted to panic."
    )
)]
// crates/george-selfheal/src/lib.rs
// ============================================================================
// Crate: george-selfheal
// Description: Self-Healing quartet — deterministic regression detection and
//              templated, human-reviewed repair proposals.
// Purpose: Notice when the `ops/` tree has drifted from a valid state, open
//          exactly one proposed change set per invocation, and escalate to a
//          human rather than applying anything automatically (§4.9).
// Dependencies: george-core, george-policy, serde_json, thiserror, uuid
// ============================================================================

//! # george-selfheal
//!
//! Self-Healing never repairs silently. Every run checks detectors `R3`,
//! `R2`, and `R1` in that fixed order and stops at the first regression
//! found; the matching playbook proposes a minimal valid placeholder
//! through a [`george_core::interfaces::ChangeSetSink`], and a single
//! `SELF_HEALING` trace entry records that the repair was escalated to a
//! human, never applied by the runtime itself.

#![forbid(unsafe_code)]

pub mod detectors;
pub mod playbooks;

use george_core::Actor;
use george_core::DecisionId;
use george_core::TraceEntry;
use george_core::TraceId;
use george_core::TraceResult;
use george_core::Timestamp;
use george_core::interfaces::ArtifactStore;
use george_core::interfaces::ChangeSetError;
use george_core::interfaces::ChangeSetSink;
use george_core::interfaces::StoreError;
use george_core::paths::PathConfig;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

pub use detectors::Detector;
pub use detectors::Regression;
pub use detectors::detect_regression;
pub use playbooks::build_change_set;

/// Errors raised while running a Self-Healing cycle.
#[derive(Debug, Error)]
pub enum SelfHealError {
    /// The `SELF_HEALING` trace entry could not be appended.
    #[error(transparent)]
    Trace(#[from] StoreError),
    /// The proposed change set could not be handed to the sink.
    #[error(transparent)]
    Propose(#[from] ChangeSetError),
}

/// The machine-readable summary of one Self-Healing cycle, surfaced by the
/// CLI as `regression=true|false` plus the proposed branch name (§6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealOutcome {
    /// Whether a regression was found and a repair proposed.
    pub regression: bool,
    /// The regression's stable identifier, when one was found.
    pub regression_id: Option<String>,
    /// The detector that found it (`"R3"`, `"R2"`, or `"R1"`).
    pub detector: Option<&'static str>,
    /// The playbook template used to build the repair.
    pub playbook: Option<&'static str>,
    /// The deterministic branch name the proposed change set would land
    /// on.
    pub branch: Option<String>,
}

impl HealOutcome {
    fn clean() -> Self {
        Self { regression: false, regression_id: None, detector: None, playbook: None, branch: None }
    }
}

/// Runs one Self-Healing cycle: detect, and if a regression is found,
/// propose its repair and append the `SELF_HEALING` trace entry.
///
/// Detection, repair proposal, and trace recording never mutate any `ops/`
/// artifact directly — only the trace log is appended to, and only through
/// `store`; the repair itself is always routed through `sink` for human
/// review (§4.9).
///
/// # Errors
///
/// Returns [`SelfHealError`] if the trace entry cannot be appended or the
/// change set cannot be handed to `sink`.
pub fn run(
    store: &impl ArtifactStore,
    sink: &impl ChangeSetSink,
    paths: &PathConfig,
    now: Timestamp,
) -> Result<HealOutcome, SelfHealError> {
    let Some(regression) = detect_regression(paths) else {
        return Ok(HealOutcome::clean());
    };

    let change_set = build_change_set(&regression, paths, now);
    let playbook = playbooks::playbook_for(&regression);

    let detail = json!({
        "regression_id": regression.id,
        "detector": regression.detector.code(),
        "playbook": playbook,
        "action": "OPEN_PR",
        "authority": "SYSTEM",
        "result": "ESCALATED_TO_HUMAN",
    });
    let mut entry = TraceEntry::new(
        TraceId::new(),
        now,
        DecisionId::from_uuid(Uuid::nil()),
        Actor::SelfHealing,
        "self_healing",
        TraceResult::Blocked,
    );
    entry.detail = detail;
    store.append_trace(&paths.decision_trace, &entry)?;

    sink.propose(&change_set)?;

    Ok(HealOutcome {
        regression: true,
        regression_id: Some(regression.id),
        detector: Some(regression.detector.code()),
        playbook: Some(playbook),
        branch: Some(change_set.branch),
    })
}
