// crates/george-core/src/rule.rs
// ============================================================================
// Module: George Rule
// Description: Declarative routing rules matched against inbound events.
// Purpose: Canonical shape for `ops/rules/george_rules.yaml` entries.
// Dependencies: crate::identifiers, serde
// ============================================================================

//! ## Overview
//! A rule pairs a `when` pattern (fields to match on an event) with a `then`
//! outcome (the agent/action/decision-class to route to) and optional
//! preconditions. Rules are matched in declaration order by the Rule Engine
//! using plain field equality, not tri-state logic.

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::AgentId;
use crate::identifiers::RuleId;

/// A single routing rule.
///
/// # Invariants
/// - `when` fields that are `None` act as wildcards; fields that are
///   `Some("")` are treated as absent too (empty string equals absence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule identifier, for diagnostics and audit trails.
    pub id: RuleId,
    /// Match pattern against the inbound event.
    pub when: RuleWhen,
    /// Routing outcome when this rule matches.
    pub then: RuleThen,
    /// Optional additional preconditions evaluated alongside the Guardian
    /// precheck.
    #[serde(default)]
    pub preconditions: Option<RulePreconditions>,
}

/// The `when` pattern of a [`Rule`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleWhen {
    /// Match against `Event::agent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Match against `Event::event`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Match against `Event::intent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    /// Match against `Event::source_event_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_event_id: Option<String>,
}

/// The `then` outcome of a [`Rule`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleThen {
    /// Target agent; defaults to the event's own agent when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentId>,
    /// Target action; defaults to the event name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Confidence assigned to the resulting decision, in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Decision class used for Authority resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_class: Option<String>,
    /// Minimum autonomy the target agent must have for the Guardian
    /// precheck to pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_autonomy: Option<f64>,
}

/// Additional preconditions a [`Rule`] may require, checked by the Rule
/// Engine alongside its `when` pattern: a rule whose preconditions are not
/// met is treated as non-matching, and matching continues to the next rule
/// in declaration order (§4.2, §3).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulePreconditions {
    /// Required Guardian health signal (the closed vocabulary in
    /// [`crate::status::HealthSignal`]: `"healthy"`, `"degraded"`,
    /// `"critical"`, `"unknown"`) before this rule may fire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_status: Option<String>,
    /// Minimum `system_health_score` required before this rule may fire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_health_min: Option<f64>,
}
