// crates/george-policy/src/schemas.rs
// ============================================================================
// Module: George Policy Schemas
// Description: JSON Schema builders for every loadable policy document.
// Purpose: Let the loader fail closed on a malformed document before serde
//          ever sees it, with a readable validation message (§7: "Schema
//          errors in loaded policy/rules: fail closed").
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Each function returns the JSON Schema (2020-12) for one on-disk document.
//! Schemas only constrain shape (required keys, types, enum membership);
//! they never encode business rules (those live in the typed Rust model and
//! the components that consume it).

use serde_json::Value;
use serde_json::json;

/// Schema for `ops/rules/george_rules.yaml` (a bare array of rule objects).
#[must_use]
pub fn rules_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "array",
        "items": {
            "type": "object",
            "required": ["id", "when", "then"],
            "properties": {
                "id": {"type": "string"},
                "when": {"type": "object"},
                "then": {"type": "object"},
                "preconditions": {"type": ["object", "null"]}
            }
        }
    })
}

/// Schema for `ops/authority_matrix.yaml`.
#[must_use]
pub fn authority_matrix_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["default"],
        "properties": {
            "default": {
                "type": "object",
                "required": ["require"],
                "properties": {
                    "require": {"enum": ["agent", "guardian", "human", "manual"]}
                }
            },
            "classes": {"type": "object"},
            "agents": {"type": "object"}
        }
    })
}

/// Schema for `ops/autonomy.json` (a map of agent id to profile).
#[must_use]
pub fn agent_registry_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "additionalProperties": {
            "type": "object",
            "required": ["status", "autonomy", "role"],
            "properties": {
                "status": {"enum": ["active", "planned", "paused", "inactive"]},
                "autonomy": {"type": "number", "minimum": 0.0, "maximum": 1.0},
                "role": {"type": "string"}
            }
        }
    })
}

/// Schema for the Runtime Gate's policy YAML.
#[must_use]
pub fn gate_policy_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["enforcement", "thresholds"],
        "properties": {
            "enforcement": {
                "type": "object",
                "required": ["mode", "default_action", "allow_human_override"],
                "properties": {
                    "mode": {"enum": ["advisory", "enforcing"]},
                    "default_action": {"enum": ["ALLOW", "ESCALATE", "BLOCK"]},
                    "allow_human_override": {"type": "boolean"}
                }
            },
            "decision_classes": {"type": "object"},
            "thresholds": {
                "type": "object",
                "required": ["min_health_score"],
                "properties": {
                    "min_health_score": {"type": "number", "minimum": 0.0, "maximum": 1.0}
                }
            }
        }
    })
}

/// Schema for the Consistency Validator's declarative rule file.
#[must_use]
pub fn consistency_rules_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "properties": {
            "tail_window": {"type": "integer", "minimum": 1},
            "required_keys": {"type": "object"},
            "required_outputs_in_latest": {
                "type": "array",
                "items": {"type": "string"}
            },
            "health_signals": {
                "type": "array",
                "items": {"type": "string"}
            },
            "gate_verdicts": {
                "type": "array",
                "items": {"type": "string"}
            },
            "autonomy_modes": {
                "type": "array",
                "items": {"type": "string"}
            },
            "agent_states": {
                "type": "array",
                "items": {"type": "string"}
            }
        }
    })
}

/// Schema for the capability graph (ambient: supplements self-healing's
/// `R1` detector input; no canonical path is named in the file layout
/// table, so this loader also governs the document's shape at the path
/// George chooses, `ops/capability_graph.json`, per `DESIGN.md`).
#[must_use]
pub fn capability_graph_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["agents"],
        "properties": {
            "agents": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "required": ["actions", "decision_classes"],
                    "properties": {
                        "actions": {"type": "array", "items": {"type": "string"}},
                        "decision_classes": {"type": "array", "items": {"type": "string"}}
                    }
                }
            }
        }
    })
}
