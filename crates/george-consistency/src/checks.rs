// crates/george-consistency/src/checks.rs
// ============================================================================
// Module: George Consistency Checks
// Description: Pure, side-effect-free implementations of invariants I1-I6.
// Purpose: Operate entirely on already-loaded JSON values so a malformed
//          artifact produces a specific finding rather than an unhandled
//          parse failure (§4.8).
// Dependencies: crate::codes, george-core, serde_json
// ============================================================================

//! ## Overview
//! Every artifact the validator inspects is read as a raw [`serde_json::Value`]
//! rather than deserialized into its canonical typed shape: the validator's
//! entire purpose is to notice when an artifact does *not* conform, and a
//! strict typed deserialize would turn that into an unhandled error instead
//! of a reportable finding. [`validate`] composes the per-invariant check
//! functions below into one ordered [`crate::ConsistencyReport`].

use std::collections::HashSet;
use std::path::Path;

use george_core::AgentRegistry;
use george_core::Timestamp;
use george_core::paths::PathConfig;
use serde_json::Value;

use crate::Finding;
use crate::codes;

/// The result of attempting to load one artifact as JSON: either the parsed
/// value, or a human-readable detail of why it could not be loaded.
pub type ArtifactLoad = Result<Value, String>;

/// Everything [`validate`] needs; assembled by [`crate::run`] from disk, or
/// directly by a test.
pub struct ValidationInputs<'a> {
    /// `ops/reports/system_status.json`.
    pub system_status: ArtifactLoad,
    /// `ops/decisions/gate_result.json`.
    pub gate_result: ArtifactLoad,
    /// `ops/decisions/latest.json`.
    pub latest_decision: ArtifactLoad,
    /// The last `tail_window` lines of `ops/reports/decision_trace.jsonl`.
    pub trace_tail: Vec<String>,
    /// The loaded agent registry, or `None` if it failed to load.
    pub registry: Option<&'a AgentRegistry>,
    /// The closed vocabulary for `gate_result.verdict` (I5). Empty disables
    /// the check.
    pub gate_verdicts: &'a [String],
    /// The closed vocabulary for agent status strings (I5). Empty disables
    /// the check.
    pub agent_states: &'a [String],
    /// The closed vocabulary for `system_status.health.signal` (I5). Empty
    /// disables the check.
    pub health_signals: &'a [String],
    /// The canonical path set, for I1's link comparisons.
    pub paths: &'a PathConfig,
    /// The validator's own clock reading, for I3/clock-skew checks. Never
    /// read internally — always supplied by the caller.
    pub now: Timestamp,
}

fn normalize_path(text: &str) -> String {
    text.trim_start_matches("./").replace('\\', "/")
}

fn paths_match(actual: &str, expected: &Path) -> bool {
    normalize_path(actual) == normalize_path(&expected.display().to_string())
}

fn vocab_check(code: &'static str, field: &str, actual: Option<&str>, vocab: &[String]) -> Finding {
    if vocab.is_empty() {
        return Finding::pass(code, format!("{field} vocabulary is not configured; check skipped"));
    }
    match actual {
        None => Finding::fail(code, format!("{field} is missing")),
        Some(value) if vocab.iter().any(|allowed| allowed == value) => {
            Finding::pass(code, format!("{field}={value} is in the closed vocabulary"))
        }
        Some(value) => Finding::fail(
            code,
            format!("{field}={value} is not in the closed vocabulary {vocab:?}"),
        ),
    }
}

fn check_ssot(status: &ArtifactLoad, paths: &PathConfig) -> Vec<Finding> {
    let value = match status {
        Err(detail) => {
            return vec![Finding::fail(
                codes::SSOT_UNREADABLE,
                format!("system_status.json could not be loaded: {detail}"),
            )];
        }
        Ok(value) => value,
    };

    let mut findings = vec![Finding::pass(codes::SSOT_UNREADABLE, "system_status.json loaded")];
    for (code, key, expected) in [
        (codes::SSOT_LATEST_LINK, "latest", &paths.latest_decision),
        (codes::SSOT_TRACE_LINK, "decision_trace", &paths.decision_trace),
        (codes::SSOT_GATE_LINK, "gate_result", &paths.gate_result),
    ] {
        let actual = value.pointer("/links").and_then(|links| links.get(key)).and_then(Value::as_str);
        findings.push(match actual {
            None => Finding::fail(code, format!("system_status.links.{key} is missing")),
            Some(actual) if paths_match(actual, expected) => {
                Finding::pass(code, format!("system_status.links.{key} matches the canonical path"))
            }
            Some(actual) => Finding::fail(
                code,
                format!(
                    "system_status.links.{key}={actual} does not match canonical path {}",
                    expected.display()
                ),
            ),
        });
    }
    findings
}

fn check_trace(tail: &[String], gate_result: &ArtifactLoad) -> Vec<Finding> {
    let mut malformed = false;
    let mut duplicate = false;
    let mut invalid_timestamp = false;
    let mut version_mismatch = false;
    let mut seen_ids = HashSet::new();
    let gate_decision_id = gate_result
        .as_ref()
        .ok()
        .and_then(|value| value.get("decision_id"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let mut found_decision_id = gate_decision_id.is_none();

    for line in tail {
        let Ok(value) = serde_json::from_str::<Value>(line) else {
            malformed = true;
            continue;
        };
        if let Some(id) = value.get("id").and_then(Value::as_str) {
            if !seen_ids.insert(id.to_string()) {
                duplicate = true;
            }
        }
        let has_valid_timestamp = value
            .get("ts")
            .and_then(Value::as_str)
            .is_some_and(|ts| Timestamp::parse(ts).is_ok());
        if !has_valid_timestamp {
            invalid_timestamp = true;
        }
        if value.get("trace_version").and_then(Value::as_str) != Some("v1") {
            version_mismatch = true;
        }
        if !found_decision_id {
            if let Some(decision_id) = value.get("decision_id").and_then(Value::as_str) {
                if Some(decision_id.to_string()) == gate_decision_id {
                    found_decision_id = true;
                }
            }
        }
    }

    vec![
        if tail.is_empty() {
            Finding::fail(codes::TRACE_EMPTY_TAIL, "decision trace tail window is empty")
        } else {
            Finding::pass(codes::TRACE_EMPTY_TAIL, format!("tail window has {} entries", tail.len()))
        },
        if malformed {
            Finding::fail(codes::TRACE_MALFORMED_LINE, "one or more trace lines are not valid JSON")
        } else {
            Finding::pass(codes::TRACE_MALFORMED_LINE, "every trace line in the tail window parses as JSON")
        },
        if gate_decision_id.is_some() && !found_decision_id {
            Finding::fail(
                codes::TRACE_DECISION_ID_MISSING,
                "gate_result.decision_id was not found in the trace tail window",
            )
        } else {
            Finding::pass(
                codes::TRACE_DECISION_ID_MISSING,
                "gate_result.decision_id is present in the trace tail window (or not applicable)",
            )
        },
        if duplicate {
            Finding::fail(codes::TRACE_DUPLICATE_ID, "a trace_id repeats within the tail window")
        } else {
            Finding::pass(codes::TRACE_DUPLICATE_ID, "no duplicate trace_id within the tail window")
        },
        if invalid_timestamp {
            Finding::fail(codes::TRACE_INVALID_TIMESTAMP, "a trace entry is missing a valid timestamp")
        } else {
            Finding::pass(codes::TRACE_INVALID_TIMESTAMP, "every trace entry has a valid timestamp")
        },
        if version_mismatch {
            Finding::fail(codes::TRACE_VERSION_MISMATCH, "a trace entry's trace_version is not \"v1\"")
        } else {
            Finding::pass(codes::TRACE_VERSION_MISMATCH, "every trace entry carries trace_version \"v1\"")
        },
    ]
}

fn check_gate(gate_result: &ArtifactLoad, latest_decision: &ArtifactLoad, gate_verdicts: &[String]) -> Vec<Finding> {
    let value = match gate_result {
        Err(detail) => {
            return vec![Finding::fail(
                codes::GATE_UNREADABLE,
                format!("gate_result.json could not be loaded: {detail}"),
            )];
        }
        Ok(value) => value,
    };

    let mut findings = vec![Finding::pass(codes::GATE_UNREADABLE, "gate_result.json loaded")];
    let verdict = value.get("verdict").and_then(Value::as_str);
    findings.push(vocab_check(codes::GATE_VERDICT_VOCAB, "gate_result.verdict", verdict, gate_verdicts));

    if verdict == Some("ALLOW") {
        let min_health_score = value.pointer("/applied_policy/min_health_score").and_then(Value::as_f64);
        let health_score = latest_decision
            .as_ref()
            .ok()
            .and_then(|decision| decision.pointer("/signals/system_health_score"))
            .and_then(Value::as_f64);
        findings.push(match (min_health_score, health_score) {
            (Some(min), Some(score)) if score >= min => Finding::pass(
                codes::GATE_ALLOW_BELOW_THRESHOLD,
                format!("health score {score} meets the applied minimum {min}"),
            ),
            (Some(min), Some(score)) => Finding::fail(
                codes::GATE_ALLOW_BELOW_THRESHOLD,
                format!("verdict is ALLOW but health score {score} is below the applied minimum {min}"),
            ),
            _ => Finding::warn(
                codes::GATE_ALLOW_BELOW_THRESHOLD,
                "insufficient data to verify the ALLOW threshold invariant",
            ),
        });
    } else {
        findings.push(Finding::pass(
            codes::GATE_ALLOW_BELOW_THRESHOLD,
            "verdict is not ALLOW; the threshold invariant does not apply",
        ));
    }
    findings
}

fn check_registry(status: &ArtifactLoad, registry: Option<&AgentRegistry>, agent_states: &[String]) -> Vec<Finding> {
    let Some(registry) = registry else {
        return vec![
            Finding::fail(codes::REG_UNREADABLE, "agent registry could not be loaded"),
            Finding::warn(codes::REG_AGENT_NOT_REGISTERED, "agent registry unavailable; cannot cross-check agents"),
            Finding::warn(codes::REG_AGENT_STATE_VOCAB, "agent registry unavailable; cannot cross-check agent states"),
        ];
    };

    let mut findings = vec![Finding::pass(codes::REG_UNREADABLE, "agent registry loaded")];
    let Ok(status) = status else {
        findings.push(Finding::warn(codes::REG_AGENT_NOT_REGISTERED, "system_status unavailable; cannot cross-check agents"));
        findings.push(Finding::warn(codes::REG_AGENT_STATE_VOCAB, "system_status unavailable; cannot cross-check agent states"));
        return findings;
    };

    let agents = status.pointer("/agents").and_then(Value::as_object);
    let Some(agents) = agents else {
        findings.push(Finding::pass(codes::REG_AGENT_NOT_REGISTERED, "system_status lists no agents"));
        findings.push(Finding::pass(codes::REG_AGENT_STATE_VOCAB, "system_status lists no agents"));
        return findings;
    };

    let mut unregistered = Vec::new();
    let mut bad_state = Vec::new();
    for (agent_id, entry) in agents {
        if !registry.contains_key(agent_id) {
            unregistered.push(agent_id.clone());
        }
        if !agent_states.is_empty() {
            if let Some(state) = entry.get("status").and_then(Value::as_str) {
                if !agent_states.iter().any(|allowed| allowed == state) {
                    bad_state.push(agent_id.clone());
                }
            }
        }
    }

    findings.push(if unregistered.is_empty() {
        Finding::pass(codes::REG_AGENT_NOT_REGISTERED, "every agent in system_status.agents is registered")
    } else {
        Finding::fail(
            codes::REG_AGENT_NOT_REGISTERED,
            format!("agents not present in the registry: {unregistered:?}"),
        )
    });
    findings.push(if bad_state.is_empty() {
        Finding::pass(codes::REG_AGENT_STATE_VOCAB, "every agent status is in the closed vocabulary")
    } else {
        Finding::fail(
            codes::REG_AGENT_STATE_VOCAB,
            format!("agents with an unrecognized status: {bad_state:?}"),
        )
    });
    findings
}

fn check_health(status: &ArtifactLoad, health_signals: &[String]) -> Vec<Finding> {
    match status {
        Err(_) => vec![Finding::warn(
            codes::HEALTH_SIGNAL_VOCAB,
            "system_status unavailable; cannot check the health signal",
        )],
        Ok(value) => {
            let signal = value.pointer("/health/signal").and_then(Value::as_str);
            vec![vocab_check(codes::HEALTH_SIGNAL_VOCAB, "system_status.health.signal", signal, health_signals)]
        }
    }
}

fn check_time(status: &ArtifactLoad, now: Timestamp) -> Vec<Finding> {
    let value = match status {
        Err(_) => {
            return vec![
                Finding::warn(codes::TIME_INVALID, "system_status unavailable; cannot check generated_at"),
                Finding::warn(codes::TIME_SKEW, "system_status unavailable; cannot check for clock skew"),
            ];
        }
        Ok(value) => value,
    };

    match value.get("generated_at").and_then(Value::as_str).map(Timestamp::parse) {
        None => vec![
            Finding::fail(codes::TIME_INVALID, "system_status.generated_at is missing"),
            Finding::pass(codes::TIME_SKEW, "no timestamp to check for clock skew"),
        ],
        Some(Err(_)) => vec![
            Finding::fail(codes::TIME_INVALID, "system_status.generated_at is not a valid RFC 3339 timestamp"),
            Finding::pass(codes::TIME_SKEW, "generated_at is not parseable; clock skew check skipped"),
        ],
        Some(Ok(generated_at)) => vec![
            Finding::pass(codes::TIME_INVALID, "system_status.generated_at is a valid RFC 3339 timestamp"),
            if generated_at > now {
                Finding::warn(codes::TIME_SKEW, "system_status.generated_at is ahead of the validator's clock")
            } else {
                Finding::pass(codes::TIME_SKEW, "system_status.generated_at is not ahead of the validator's clock")
            },
        ],
    }
}

/// Runs every I1-I6 check against `inputs`, in a fixed order, and returns the
/// full ordered list of findings.
#[must_use]
pub fn run_checks(inputs: &ValidationInputs<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    findings.extend(check_ssot(&inputs.system_status, inputs.paths));
    findings.extend(check_trace(&inputs.trace_tail, &inputs.gate_result));
    findings.extend(check_gate(&inputs.gate_result, &inputs.latest_decision, inputs.gate_verdicts));
    findings.extend(check_registry(&inputs.system_status, inputs.registry, inputs.agent_states));
    findings.extend(check_health(&inputs.system_status, inputs.health_signals));
    findings.extend(check_time(&inputs.system_status, inputs.now));
    findings
}
