// crates/george-runtime/src/executor.rs
// ============================================================================
// Module: George Simulated Executor
// Description: The sole production `Executor` implementation in this core.
// Purpose: Always simulates success with a formatted result summary (§4.5).
// Dependencies: george-core
// ============================================================================

//! ## Overview
//! `SimulatedExecutor` never calls out to a real action dispatcher; it is
//! the extension point named in §4.5 and §9 ("source's optional provider
//! plugins become a capability interface injected at construction; the core
//! ships a no-op implementation"). A production executor is a drop-in
//! [`george_core::interfaces::Executor`] implementation, not a rewrite.

use george_core::interfaces::ExecutionOutcome;
use george_core::interfaces::ExecutionRequest;
use george_core::interfaces::Executor;
use george_core::interfaces::ExecutorError;

/// Simulates execution of the action selected by the Rule Engine and
/// Authority; always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedExecutor;

impl Executor for SimulatedExecutor {
    fn execute(&self, request: &ExecutionRequest<'_>) -> Result<ExecutionOutcome, ExecutorError> {
        let summary = format!(
            "simulated execution of '{}' by agent '{}' (role: {}, event: {})",
            request.action, request.agent, request.role, request.event_id
        );
        Ok(ExecutionOutcome {
            success: true,
            summary,
        })
    }
}
