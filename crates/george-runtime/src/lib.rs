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
// crates/george-runtime/src/lib.rs
// ============================================================================
// Crate: george-runtime
// Description: The Orchestrator pipeline: Rule Engine, Guardian, simulated
//              Executor, glued into the per-event state machine of §4.6.
// Purpose: Drive one event from `Event` to a persisted `Decision`, honoring
//          the emergency lock and the single-writer artifact discipline.
// Dependencies: george-core, george-store (dev-only), serde_json, thiserror
// ============================================================================

//! # george-runtime
//!
//! This crate owns the hard core of the Orchestrator: routing
//! ([`rule_engine`]), agent readiness and health accounting ([`guardian`]),
//! the simulated action dispatcher ([`executor`]), and the pipeline that
//! glues them together ([`orchestrator`]). Runtime Gate, Consistency
//! Validator, and Self-Healing each live in their own sibling crate and read
//! the artifacts this crate writes; none of them are a dependency here.

#![forbid(unsafe_code)]

pub mod executor;
pub mod guardian;
pub mod orchestrator;
pub mod rule_engine;

pub use executor::SimulatedExecutor;
pub use orchestrator::OrchestrateOutcome;
pub use orchestrator::Orchestrator;
pub use orchestrator::RuntimeError;
