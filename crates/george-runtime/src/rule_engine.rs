// crates/george-runtime/src/rule_engine.rs
// ============================================================================
// Module: George Rule Engine
// Description: Deterministic first-match-wins matcher on (agent,event,intent).
// Purpose: Select the rule, if any, that routes an inbound event (§4.2).
// Dependencies: george-core
// ============================================================================

//! ## Overview
//! Matching is plain field equality with no priorities beyond declaration
//! order: the first rule whose present `when` fields all equal the event's
//! corresponding fields, and whose `preconditions` (if any) are satisfied by
//! the current [`HealthState`], wins. An absent `when` field is a wildcard;
//! an empty-string event field is treated as absent too, so a rule pinned to
//! `intent: "deploy"` never matches an event with `intent: ""`. A rule whose
//! preconditions fail is skipped, not treated as an error — matching simply
//! continues to the next rule in declaration order.

use george_core::Event;
use george_core::HealthState;
use george_core::Rule;
use george_core::event::EventField;
use george_core::rule::RulePreconditions;
use george_core::status::HealthSignal;

/// The confidence assigned to the fallback decision when no rule matches.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Returns the first rule in `rules` whose `when` pattern matches `event`
/// and whose `preconditions` are satisfied by `health`, or `None` if no rule
/// matches (the orchestrator falls back to `(agent=event.agent,
/// action=event.event, confidence=0.5)` in that case, per §4.2 — a defined
/// outcome, not an error).
#[must_use]
pub fn match_rule<'a>(event: &Event, rules: &'a [Rule], health: &HealthState) -> Option<&'a Rule> {
    rules
        .iter()
        .find(|rule| rule_matches(event, rule) && preconditions_satisfied(rule.preconditions.as_ref(), health))
}

fn rule_matches(event: &Event, rule: &Rule) -> bool {
    field_matches(rule.when.agent.as_deref(), event.field(EventField::Agent))
        && field_matches(rule.when.event.as_deref(), event.field(EventField::Event))
        && field_matches(rule.when.intent.as_deref(), event.field(EventField::Intent))
        && field_matches(
            rule.when.source_event_id.as_deref(),
            event.field(EventField::SourceEventId),
        )
}

/// A rule with no `preconditions` always passes. Otherwise both configured
/// checks must hold: `guardian_status` compares case-insensitively against
/// the [`HealthSignal`] derived from `health`'s current score, and
/// `system_health_min` is a lower bound on that same score.
fn preconditions_satisfied(preconditions: Option<&RulePreconditions>, health: &HealthState) -> bool {
    let Some(preconditions) = preconditions else {
        return true;
    };
    let score = health.system_health_score();
    if let Some(required) = preconditions.guardian_status.as_deref() {
        let signal = HealthSignal::from_score(score);
        if !required.eq_ignore_ascii_case(signal.as_str()) {
            return false;
        }
    }
    if let Some(min) = preconditions.system_health_min {
        if score < min {
            return false;
        }
    }
    true
}

/// A rule field matches when it is absent (wildcard) or equal to the
/// event's field, with both sides treating an empty string as absent.
fn field_matches(rule_field: Option<&str>, event_field: Option<&str>) -> bool {
    match rule_field.filter(|s| !s.is_empty()) {
        None => true,
        Some(expected) => event_field == Some(expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use george_core::AgentId;
    use george_core::Timestamp;
    use george_core::rule::RuleThen;
    use george_core::rule::RuleWhen;
    use serde_json::Value;

    fn ts() -> Timestamp {
        Timestamp::parse("2026-07-28T00:00:00Z").expect("parse")
    }

    fn healthy() -> HealthState {
        HealthState::default()
    }

    fn event(agent: &str, event_name: &str, intent: Option<&str>) -> Event {
        Event {
            id: None,
            timestamp: ts(),
            agent: AgentId::new(agent),
            event: event_name.to_string(),
            intent: intent.map(str::to_string),
            payload: Value::Null,
            source_event_id: None,
        }
    }

    fn rule(id: &str, when: RuleWhen, then: RuleThen) -> Rule {
        Rule {
            id: george_core::RuleId::new(id),
            when,
            then,
            preconditions: None,
        }
    }

    fn rule_with_preconditions(id: &str, preconditions: RulePreconditions) -> Rule {
        Rule {
            id: george_core::RuleId::new(id),
            when: RuleWhen::default(),
            then: RuleThen::default(),
            preconditions: Some(preconditions),
        }
    }

    #[test]
    fn first_matching_rule_wins_by_declaration_order() {
        let rules = vec![
            rule(
                "general",
                RuleWhen {
                    agent: Some("monitoring".to_string()),
                    ..RuleWhen::default()
                },
                RuleThen {
                    decision_class: Some("operational".to_string()),
                    ..RuleThen::default()
                },
            ),
            rule(
                "specific",
                RuleWhen {
                    agent: Some("monitoring".to_string()),
                    event: Some("heartbeat".to_string()),
                    ..RuleWhen::default()
                },
                RuleThen {
                    decision_class: Some("strategic".to_string()),
                    ..RuleThen::default()
                },
            ),
        ];
        let matched = match_rule(&event("monitoring", "heartbeat", None), &rules, &healthy());
        assert_eq!(matched.map(|r| r.id.as_str()), Some("general"));
    }

    #[test]
    fn wildcard_rule_field_matches_any_event_value() {
        let rules = vec![rule("wild", RuleWhen::default(), RuleThen::default())];
        let matched = match_rule(&event("deploy", "release", Some("deploy")), &rules, &healthy());
        assert!(matched.is_some());
    }

    #[test]
    fn empty_event_field_does_not_satisfy_a_pinned_rule_field() {
        let rules = vec![rule(
            "pinned",
            RuleWhen {
                intent: Some("deploy".to_string()),
                ..RuleWhen::default()
            },
            RuleThen::default(),
        )];
        let matched = match_rule(&event("deploy", "release", Some("")), &rules, &healthy());
        assert!(matched.is_none());
    }

    #[test]
    fn no_rule_matches_returns_none() {
        let rules = vec![rule(
            "only-deploy",
            RuleWhen {
                agent: Some("deploy".to_string()),
                ..RuleWhen::default()
            },
            RuleThen::default(),
        )];
        assert!(match_rule(&event("monitoring", "heartbeat", None), &rules, &healthy()).is_none());
    }

    #[test]
    fn rule_with_unmet_system_health_min_is_skipped_for_the_next_rule() {
        let rules = vec![
            rule_with_preconditions(
                "needs-high-health",
                RulePreconditions { guardian_status: None, system_health_min: Some(0.99) },
            ),
            rule("fallback", RuleWhen::default(), RuleThen::default()),
        ];
        let matched = match_rule(&event("monitoring", "heartbeat", None), &rules, &healthy());
        assert_eq!(matched.map(|r| r.id.as_str()), Some("fallback"));
    }

    #[test]
    fn rule_with_satisfied_system_health_min_matches() {
        let rules = vec![rule_with_preconditions(
            "needs-some-health",
            RulePreconditions { guardian_status: None, system_health_min: Some(0.5) },
        )];
        let matched = match_rule(&event("monitoring", "heartbeat", None), &rules, &healthy());
        assert_eq!(matched.map(|r| r.id.as_str()), Some("needs-some-health"));
    }

    #[test]
    fn rule_with_mismatched_guardian_status_is_skipped() {
        let rules = vec![
            rule_with_preconditions(
                "needs-critical",
                RulePreconditions { guardian_status: Some("critical".to_string()), system_health_min: None },
            ),
            rule("fallback", RuleWhen::default(), RuleThen::default()),
        ];
        let matched = match_rule(&event("monitoring", "heartbeat", None), &rules, &healthy());
        assert_eq!(matched.map(|r| r.id.as_str()), Some("fallback"));
    }

    #[test]
    fn rule_with_matching_guardian_status_is_case_insensitive() {
        let rules = vec![rule_with_preconditions(
            "needs-healthy",
            RulePreconditions { guardian_status: Some("HEALTHY".to_string()), system_health_min: None },
        )];
        let matched = match_rule(&event("monitoring", "heartbeat", None), &rules, &healthy());
        assert_eq!(matched.map(|r| r.id.as_str()), Some("needs-healthy"));
    }
}
