// crates/george-runtime/src/orchestrator.rs
// ============================================================================
// Module: George Orchestrator
// Description: The per-event pipeline: Rule Engine -> Guardian.pre ->
//              Authority -> Executor -> Guardian.post -> artifact writes.
// Purpose: Implements the state machine in §4.6: `INIT -> ROUTED ->
//          PRE_OK|BLOCKED_PRE -> AUTH_OK|BLOCKED_AUTH ->
//          EXECUTED{success|error} -> POSTCHECKED -> FINALIZED`.
// Dependencies: george-core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The Orchestrator is the sole writer of `latest.json`, `canonical_latest.json`,
//! the per-day decision history and snapshot files, and (on the Guardian's
//! behalf) `health_log.jsonl`. Every phase transition — reached or not —
//! that actually executes appends one [`TraceEntry`] before the pipeline
//! moves on, so the decision trace is always a prefix-consistent record of
//! what happened, never a reconstruction after the fact.
//!
//! On a `BLOCKED_*` terminal, the pipeline still writes a decision with a
//! minimal but valid `decision_trace` and `execution_context`, so the
//! Runtime Gate and Consistency Validator never have to special-case an
//! absent decision (§4.6).
//!
//! The emergency lock is checked once, before rule matching: when engaged,
//! a single trace entry is appended and the pipeline aborts with
//! [`OrchestrateOutcome::EmergencyLocked`] — no decision is produced.

use george_core::AgentRegistry;
use george_core::AuthorityMatrix;
use george_core::Decision;
use george_core::DecisionId;
use george_core::Event;
use george_core::HealthState;
use george_core::PathConfig;
use george_core::Rule;
use george_core::Timestamp;
use george_core::TraceEntry;
use george_core::TraceId;
use george_core::agent::AgentProfile;
use george_core::agent::AgentStatus;
use george_core::agent::FailureThresholds;
use george_core::authority::resolve_decision_class;
use george_core::decision::AuthoritySource;
use george_core::decision::DecisionStatus;
use george_core::decision::ExecutionContext;
use george_core::decision::PhaseRecord;
use george_core::decision::Signals;
use george_core::interfaces::ArtifactStore;
use george_core::interfaces::ExecutionRequest;
use george_core::interfaces::Executor;
use george_core::interfaces::StoreError;
use george_core::trace::Actor;
use george_core::trace::TraceResult;
use serde_json::Value;
use thiserror::Error;

use crate::guardian;
use crate::rule_engine;

/// Errors raised by the Orchestrator's own plumbing, distinct from a
/// `blocked`/`error` [`Decision`] (which is a defined outcome, not a
/// `RuntimeError`).
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// An [`ArtifactStore`] write or read failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The result of one [`Orchestrator::orchestrate`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum OrchestrateOutcome {
    /// The event was processed to a terminal [`Decision`]; `health` is the
    /// updated [`HealthState`] the caller should persist for the next
    /// invocation.
    Processed {
        /// The decision produced for this event.
        decision: Decision,
        /// The health state after this event's Guardian postcheck.
        health: HealthState,
    },
    /// The emergency lock was engaged; processing aborted before rule
    /// matching and no decision was produced.
    EmergencyLocked,
}

/// Synthesized for an agent id with no entry in the agent registry: always
/// inactive, so the Guardian precheck fails closed (`agent_inactive`)
/// rather than the pipeline silently adopting default autonomy for an
/// unregistered agent.
fn unknown_agent_profile() -> AgentProfile {
    AgentProfile {
        status: AgentStatus::Inactive,
        autonomy: 0.0,
        role: "unknown".to_string(),
        actions: Vec::new(),
        failure_thresholds: FailureThresholds::default(),
    }
}

/// Reads `ops/emergency_lock.json`'s `{"locked": bool}` shape directly from
/// disk. A missing file, or one that fails to parse, is treated as
/// unlocked: the lock is an explicit opt-in kill switch, not a default-deny
/// gate (§4.6, §6).
fn emergency_lock_engaged(path: &std::path::Path) -> bool {
    std::fs::read(path)
        .ok()
        .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
        .and_then(|value| value.get("locked").and_then(Value::as_bool).or(Some(false)))
        .unwrap_or(false)
}

/// Drives one event through the full pipeline, writing every artifact the
/// Orchestrator owns (§4.1, §6). Generic over the [`ArtifactStore`] and
/// [`Executor`] capability interfaces so a caller can inject the real
/// filesystem store and the simulated executor, or test doubles.
pub struct Orchestrator<'a, S, E> {
    store: &'a S,
    executor: &'a E,
}

impl<'a, S, E> Orchestrator<'a, S, E>
where
    S: ArtifactStore,
    E: Executor,
{
    /// Builds an orchestrator over `store` and `executor`.
    #[must_use]
    pub const fn new(store: &'a S, executor: &'a E) -> Self {
        Self { store, executor }
    }

    /// Processes `event` to a terminal [`Decision`], writing every artifact
    /// the Orchestrator owns along the way.
    ///
    /// `health` is the caller's current [`HealthState`] (e.g. loaded from
    /// the latest decision or the health log); the returned state reflects
    /// this event's Guardian postcheck and should be threaded into the next
    /// call.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] when an artifact write fails; a policy
    /// denial is never an error, it is a `status=blocked` [`Decision`].
    #[allow(clippy::too_many_lines)]
    pub fn orchestrate(
        &self,
        event: &Event,
        rules: &[Rule],
        agents: &AgentRegistry,
        authority: &AuthorityMatrix,
        paths: &PathConfig,
        mut health: HealthState,
        at: Timestamp,
    ) -> Result<OrchestrateOutcome, RuntimeError> {
        let decision_id = DecisionId::new();

        if emergency_lock_engaged(&paths.emergency_lock) {
            self.append_trace(
                &paths.decision_trace,
                decision_id,
                Actor::George,
                "emergency_lock",
                TraceResult::Blocked,
                Value::Null,
                at,
            )?;
            return Ok(OrchestrateOutcome::EmergencyLocked);
        }

        let mut phase_records = Vec::new();
        let matched = rule_engine::match_rule(event, rules, &health);

        let agent = matched
            .and_then(|rule| rule.then.agent.clone())
            .unwrap_or_else(|| event.agent.clone());
        let action = matched
            .and_then(|rule| rule.then.action.clone())
            .unwrap_or_else(|| event.event.clone());
        let confidence = matched.map_or(rule_engine::FALLBACK_CONFIDENCE, |rule| {
            rule.then.confidence.unwrap_or(1.0)
        });
        let decision_class = resolve_decision_class(
            matched.and_then(|rule| rule.then.decision_class.as_deref()),
            event.intent.as_deref(),
        );
        let then = matched.map(|rule| rule.then.clone()).unwrap_or_default();

        self.emit(
            &paths.decision_trace,
            decision_id,
            Actor::George,
            "route",
            TraceResult::Ok,
            serde_json::json!({
                "matched_rule": matched.map(|rule| rule.id.as_str()),
                "agent": agent.as_str(),
                "action": action,
                "decision_class": decision_class,
            }),
            at,
            &mut phase_records,
        )?;

        let profile = agents
            .get(agent.as_str())
            .cloned()
            .unwrap_or_else(unknown_agent_profile);

        let mut status = DecisionStatus::Success;
        let mut error_message = None;
        let mut guardian_flag = None;
        let mut authority_source = AuthoritySource::George;
        let mut result_summary = None;
        let mut execution_context = ExecutionContext::default();
        let guardian_ok;

        if let Err(rejection) = guardian::guardian_precheck(&profile, &then) {
            guardian_ok = false;
            status = DecisionStatus::Blocked;
            guardian_flag = Some(rejection.reason.to_string());
            authority_source = AuthoritySource::Guardian;
            self.emit(
                &paths.decision_trace,
                decision_id,
                Actor::Guardian,
                "precheck",
                TraceResult::Blocked,
                serde_json::json!({"reason": rejection.reason}),
                at,
                &mut phase_records,
            )?;
        } else {
            guardian_ok = true;
            self.emit(
                &paths.decision_trace,
                decision_id,
                Actor::Guardian,
                "precheck",
                TraceResult::Ok,
                Value::Null,
                at,
                &mut phase_records,
            )?;

            let outcome = authority.decide(&decision_class, agent.as_str());
            if outcome.allowed {
                authority_source = AuthoritySource::George;
                self.emit(
                    &paths.decision_trace,
                    decision_id,
                    Actor::Authority,
                    "enforcement",
                    TraceResult::Ok,
                    serde_json::json!({"required": outcome.required}),
                    at,
                    &mut phase_records,
                )?;

                let request = ExecutionRequest {
                    agent: &agent,
                    action: action.as_str(),
                    event_id: event.id_or_fresh(),
                    role: profile.role.as_str(),
                };
                match self.executor.execute(&request) {
                    Ok(outcome) => {
                        execution_context.simulated = true;
                        status = if outcome.success {
                            DecisionStatus::Success
                        } else {
                            DecisionStatus::Error
                        };
                        result_summary = Some(outcome.summary.clone());
                        self.emit(
                            &paths.decision_trace,
                            decision_id,
                            Actor::Executor,
                            "execute",
                            if outcome.success { TraceResult::Ok } else { TraceResult::Error },
                            serde_json::json!({"summary": outcome.summary}),
                            at,
                            &mut phase_records,
                        )?;
                    }
                    Err(exec_err) => {
                        execution_context.simulated = true;
                        execution_context.cancelled =
                            matches!(exec_err, george_core::interfaces::ExecutorError::Cancelled);
                        status = DecisionStatus::Error;
                        error_message = Some(exec_err.to_string());
                        self.emit(
                            &paths.decision_trace,
                            decision_id,
                            Actor::Executor,
                            "execute",
                            TraceResult::Error,
                            serde_json::json!({"error": exec_err.to_string()}),
                            at,
                            &mut phase_records,
                        )?;
                    }
                }
            } else {
                status = DecisionStatus::Blocked;
                authority_source = AuthoritySource::Human;
                self.emit(
                    &paths.decision_trace,
                    decision_id,
                    Actor::Authority,
                    "enforcement",
                    TraceResult::Blocked,
                    serde_json::json!({"reason": outcome.reason, "required": outcome.required}),
                    at,
                    &mut phase_records,
                )?;
            }
        }

        let succeeded = status == DecisionStatus::Success;
        let postcheck_flag = guardian::guardian_postcheck(&mut health, &profile, succeeded, at);
        if guardian_flag.is_none() {
            guardian_flag = postcheck_flag.map(str::to_string);
        }
        self.emit(
            &paths.decision_trace,
            decision_id,
            Actor::Guardian,
            "postcheck",
            if succeeded { TraceResult::Ok } else { TraceResult::Error },
            serde_json::json!({"flag": postcheck_flag}),
            at,
            &mut phase_records,
        )?;

        self.emit(
            &paths.decision_trace,
            decision_id,
            Actor::George,
            "finalize",
            match status {
                DecisionStatus::Success => TraceResult::Ok,
                DecisionStatus::Blocked => TraceResult::Blocked,
                DecisionStatus::Error | DecisionStatus::Pending => TraceResult::Error,
            },
            Value::Null,
            at,
            &mut phase_records,
        )?;

        let decision = Decision {
            id: decision_id,
            timestamp: at,
            source_event_id: event.id,
            agent,
            action,
            intent: event.intent.clone(),
            confidence,
            status,
            error_message,
            guardian_flag,
            follow_up: None,
            result_summary,
            decision_class,
            authority_source,
            health_context: health.clone(),
            decision_trace: phase_records,
            execution_context,
            signals: Signals {
                system_health_score: Some(health.system_health_score()),
                guardian_ok: Some(guardian_ok),
                status_endpoint_ok: None,
                decision_trace_present: Some(true),
            },
        };

        self.persist(paths, &decision, &health, at)?;

        Ok(OrchestrateOutcome::Processed { decision, health })
    }

    fn append_trace(
        &self,
        path: &std::path::Path,
        decision_id: DecisionId,
        actor: Actor,
        phase: &str,
        result: TraceResult,
        detail: Value,
        at: Timestamp,
    ) -> Result<(), RuntimeError> {
        let mut entry = TraceEntry::new(TraceId::new(), at, decision_id, actor, phase, result);
        entry.detail = detail;
        self.store.append_trace(path, &entry)?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn emit(
        &self,
        path: &std::path::Path,
        decision_id: DecisionId,
        actor: Actor,
        phase: &str,
        result: TraceResult,
        detail: Value,
        at: Timestamp,
        phase_records: &mut Vec<PhaseRecord>,
    ) -> Result<(), RuntimeError> {
        self.append_trace(path, decision_id, actor, phase, result, detail.clone(), at)?;
        let mut record = PhaseRecord::new(phase, result);
        record.detail = detail;
        phase_records.push(record);
        Ok(())
    }

    fn persist(
        &self,
        paths: &PathConfig,
        decision: &Decision,
        health: &HealthState,
        at: Timestamp,
    ) -> Result<(), RuntimeError> {
        let decision_json =
            serde_json::to_value(decision).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.store.write_canonical(&paths.latest_decision, &decision_json)?;
        self.store.write_canonical(&paths.canonical_latest, &decision_json)?;

        let date = decision.timestamp.to_rfc3339()[..10].to_string();
        self.store.append_jsonl(&paths.history_file(&date), &decision_json)?;
        self.store
            .update_snapshot(&paths.snapshot_file(&date), &date, decision, at)?;

        let mut health_line =
            serde_json::to_value(health).map_err(|e| StoreError::Encode(e.to_string()))?;
        if let Value::Object(ref mut map) = health_line {
            map.insert("at".to_string(), Value::String(at.to_rfc3339()));
            map.insert(
                "system_stability_score".to_string(),
                serde_json::json!(health.system_stability_score()),
            );
            map.insert(
                "autonomy_level_estimate".to_string(),
                serde_json::json!(health.autonomy_level_estimate()),
            );
        }
        self.store.append_jsonl(&paths.health_log, &health_line)?;
        Ok(())
    }
}
