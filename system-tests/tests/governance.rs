// system-tests/tests/governance.rs
// ============================================================================
// Module: Governance Suite
// Description: Aggregates George's end-to-end system tests into one binary.
// Purpose: Drive the Orchestrator, Runtime Gate, Consistency Validator, and
//          Self-Healing against real fixture trees, the way a deployment
//          would actually exercise them.
// Dependencies: suites/*, helpers
// ============================================================================

mod helpers;

#[path = "suites/scenarios.rs"]
mod scenarios;

#[path = "suites/boundaries.rs"]
mod boundaries;
