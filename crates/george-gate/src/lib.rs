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
// crates/george-gate/src/lib.rs
// ============================================================================
// Crate: george-gate
// Description: The Runtime Gate — an independent re-evaluator of the latest
//              decision.
// Purpose: Re-derive a verdict from the decision on disk and the gate
//          policy, never trusting the Orchestrator's own judgment of itself
//          (§4.7).
// Dependencies: george-core, george-policy, serde_json, thiserror
// ============================================================================

//! # george-gate
//!
//! The Runtime Gate reads `ops/decisions/latest.json` and the gate policy,
//! computes its own `ALLOW`/`ESCALATE`/`BLOCK` verdict independently of
//! whatever the Orchestrator decided, and writes the result to
//! `ops/decisions/gate_result.json`. [`evaluate`] is the pure core: it takes
//! no filesystem dependency and has no side effects, so it can be exercised
//! directly in tests; [`run`] is the thin disk-facing wrapper the CLI calls.

#![forbid(unsafe_code)]

mod evaluate;

pub use evaluate::REASON_MISSING_DECISION_CLASS;
pub use evaluate::evaluate;

use std::path::Path;

use george_core::GateResult;
use george_core::interfaces::ArtifactStore;
use george_core::interfaces::StoreError;
use george_policy::GatePolicy;
use george_policy::PolicyError;
use george_policy::load_gate_policy;
use serde_json::Value;
use thiserror::Error;

/// An error reading the decision input or writing the gate result.
#[derive(Debug, Error)]
pub enum GateError {
    /// `latest.json` could not be read or parsed as JSON.
    #[error("failed to read decision at {path}: {source}")]
    ReadDecision {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// `latest.json` was read but is not valid JSON.
    #[error("decision at {path} is not valid JSON: {source}")]
    ParseDecision {
        /// The path whose contents failed to parse.
        path: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The gate policy document failed to load.
    #[error(transparent)]
    Policy(#[from] PolicyError),
    /// The gate result could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reads the decision at `decision_path` and the policy at `policy_path`,
/// evaluates the Runtime Gate verdict, and writes it to `output_path` via
/// `store`.
///
/// # Errors
///
/// Returns [`GateError`] if the decision cannot be read or parsed, the
/// policy fails to load or schema-validate, or the result cannot be
/// persisted. A decision whose *contents* are malformed (legacy list shape,
/// missing `decision_class`) is not an error here: [`evaluate`] degrades
/// those to a `BLOCK` verdict rather than failing the whole run, per §7's
/// fail-closed posture.
pub fn run(
    store: &impl ArtifactStore,
    decision_path: &Path,
    policy_path: &Path,
    output_path: &Path,
) -> Result<GateResult, GateError> {
    let policy = load_policy(policy_path)?;
    let decision = read_decision(decision_path)?;
    let result = evaluate(&decision, &policy);
    let value = serde_json::to_value(&result).unwrap_or(Value::Null);
    store.write_canonical(output_path, &value)?;
    Ok(result)
}

fn load_policy(path: &Path) -> Result<GatePolicy, GateError> {
    load_gate_policy(path).map_err(GateError::from)
}

fn read_decision(path: &Path) -> Result<Value, GateError> {
    let text = std::fs::read_to_string(path).map_err(|source| GateError::ReadDecision {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| GateError::ParseDecision {
        path: path.display().to_string(),
        source,
    })
}
