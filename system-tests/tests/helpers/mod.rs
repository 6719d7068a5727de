// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared fixture builders for George's system tests.
// Purpose: Stand up a minimal-but-valid `ops/` tree so each scenario only
//          has to describe the one thing it's deviating from.
// Dependencies: system-tests, george-core, george-policy
// ============================================================================

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod fixtures;
