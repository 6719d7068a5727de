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
// crates/george-policy/src/lib.rs
// ============================================================================
// Crate: george-policy
// Description: Schema-validated loaders for every on-disk policy and rule
//              document George reads.
// Purpose: A malformed policy document must fail closed with a readable
//          message, never a panic or a silently-wrong default (§7).
// Dependencies: george-core, jsonschema, serde, serde_json, serde_yaml,
//               thiserror
// ============================================================================

//! # george-policy
//!
//! Every document George loads from `ops/` — the rule table, the authority
//! matrix, the agent registry, the Runtime Gate's policy, the Consistency
//! Validator's rule file, and the capability graph — is read here first:
//! parsed, schema-validated against a JSON Schema, and only then
//! deserialized into its typed Rust shape. A document that fails schema
//! validation is rejected before serde ever sees it, so the failure mode is
//! always a [`loader::PolicyError`] rather than a panic.

#![forbid(unsafe_code)]

pub mod agents;
pub mod authority_loader;
pub mod capability_graph;
pub mod consistency_rules;
pub mod gate_policy;
pub mod loader;
pub mod rules;
pub mod schemas;

pub use agents::load_agent_registry;
pub use authority_loader::load_authority_matrix;
pub use capability_graph::CapabilityEntry;
pub use capability_graph::CapabilityGraph;
pub use capability_graph::load_capability_graph;
pub use consistency_rules::ConsistencyRules;
pub use consistency_rules::load_consistency_rules;
pub use gate_policy::ClassPolicy;
pub use gate_policy::EnforcementConfig;
pub use gate_policy::EnforcementMode;
pub use gate_policy::GatePolicy;
pub use gate_policy::Thresholds;
pub use gate_policy::load_gate_policy;
pub use loader::PolicyError;
pub use rules::RuleTable;
pub use rules::load_rule_table;
