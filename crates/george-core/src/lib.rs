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
// crates/george-core/src/lib.rs
// ============================================================================
// Crate: george-core
// Description: Shared data model and capability interfaces for the George
//              governance runtime.
// Purpose: One data contract (event, rule, decision, trace, gate result,
//          system status, snapshot) consumed by every other crate in the
//          workspace, plus the trait seams (`ArtifactStore`, `Executor`,
//          `ChangeSetSink`) concrete implementations plug into.
// Dependencies: serde, serde_json, thiserror, time, uuid
// ============================================================================

//! # george-core
//!
//! George's central data contract. Every other crate in the workspace
//! depends on `george-core` and nothing here depends on any other George
//! crate — this is the leaf of the dependency graph, matching the
//! "decision + trace + status + gate_result tuple" description in the
//! specification's purpose statement.

#![forbid(unsafe_code)]

pub mod agent;
pub mod authority;
pub mod decision;
pub mod event;
pub mod gate;
pub mod health;
pub mod identifiers;
pub mod interfaces;
pub mod paths;
pub mod rule;
pub mod snapshot;
pub mod status;
pub mod time;
pub mod trace;
pub mod tristate;

pub use agent::AgentProfile;
pub use agent::AgentRegistry;
pub use agent::AgentStatus;
pub use authority::AuthorityMatrix;
pub use authority::DecisionClass;
pub use decision::Decision;
pub use decision::DecisionStatus;
pub use event::Event;
pub use gate::GateResult;
pub use gate::GateVerdict;
pub use health::HealthState;
pub use identifiers::AgentId;
pub use identifiers::DecisionId;
pub use identifiers::EventId;
pub use identifiers::RuleId;
pub use identifiers::TraceId;
pub use paths::PathConfig;
pub use rule::Rule;
pub use snapshot::DailySnapshot;
pub use snapshot::SnapshotUpdate;
pub use status::SystemStatus;
pub use time::Clock;
pub use time::Timestamp;
pub use trace::Actor;
pub use trace::TraceEntry;
pub use trace::TraceResult;
pub use tristate::TriState;
