// crates/george-core/src/authority.rs
// ============================================================================
// Module: George Authority Matrix
// Description: Per-decision-class approval requirements.
// Purpose: Canonical shape for `ops/authority_matrix.yaml`; resolves a
//          decision class + agent pair to an approver requirement.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The authority matrix maps a normalized decision class to the approver
//! required before an action may proceed (`agent`, `guardian`, `human`, or
//! `manual`), with a `default` applied when no per-class entry exists, and
//! an optional per-agent `allowed_classes` allow-list. Decision-class names
//! accept a handful of synonyms on input (`"safety-critical"`, `"critical"`
//! both normalize to `safety_critical`); unrecognized class strings pass
//! through lowercased and unmodified rather than being rejected here — the
//! Runtime Gate, not the Authority, is what fails closed on an unknown class.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

/// The canonical decision-class taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionClass {
    /// Irreversible or safety-impacting actions.
    SafetyCritical,
    /// Routine actions within an agent's normal operating envelope.
    Operational,
    /// Actions with cross-system or long-lived consequences.
    Strategic,
    /// Actions that modify what is running in production.
    Deploy,
}

impl DecisionClass {
    /// Normalizes a free-form decision-class string (as it might appear in
    /// a rule's `then.decision_class` or an event's `intent`) into the
    /// canonical taxonomy, accepting known synonyms.
    ///
    /// Returns `None` if `text` does not match any known class or synonym;
    /// callers fall back to a lowercased, underscore-normalized copy of
    /// `text` in that case rather than rejecting it outright.
    #[must_use]
    pub fn normalize(text: &str) -> Option<Self> {
        let lowered = text.trim().to_lowercase().replace(['-', ' '], "_");
        match lowered.as_str() {
            "safety_critical" | "critical" | "safety" | "safetycritical" => {
                Some(Self::SafetyCritical)
            }
            "operational" | "ops" | "operation" => Some(Self::Operational),
            "strategic" | "strategy" => Some(Self::Strategic),
            "deploy" | "deployment" | "release" => Some(Self::Deploy),
            _ => None,
        }
    }

    /// The canonical wire name for this class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SafetyCritical => "safety_critical",
            Self::Operational => "operational",
            Self::Strategic => "strategic",
            Self::Deploy => "deploy",
        }
    }
}

/// Resolves the decision class for a decision: the rule's `then.decision_class`
/// takes priority, then the event's `intent`, then the `"operational"`
/// fallback, each passed through [`DecisionClass::normalize`] with unknown
/// values kept verbatim (lowercased, spaces/hyphens folded to underscores).
#[must_use]
pub fn resolve_decision_class(rule_decision_class: Option<&str>, intent: Option<&str>) -> String {
    let raw = rule_decision_class
        .filter(|s| !s.is_empty())
        .or_else(|| intent.filter(|s| !s.is_empty()))
        .unwrap_or("operational");
    DecisionClass::normalize(raw).map_or_else(
        || raw.trim().to_lowercase().replace(['-', ' '], "_"),
        |class| class.as_str().to_string(),
    )
}

/// The approver a decision class requires before the action may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Approver {
    /// The target agent may act on its own authority.
    Agent,
    /// The Guardian's precheck passing is sufficient authority.
    Guardian,
    /// A human must approve before the action proceeds.
    Human,
    /// A manual (offline) approval process is required.
    Manual,
}

impl Approver {
    /// Returns true if this approver requirement blocks autonomous
    /// execution (i.e. is not satisfiable by the pipeline itself).
    #[must_use]
    pub const fn requires_human_intervention(self) -> bool {
        matches!(self, Self::Human | Self::Manual)
    }
}

/// Per-class approval requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAuthority {
    /// The approver required for this class.
    pub require: Approver,
}

/// Per-agent authority overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAuthority {
    /// Decision classes this agent is permitted to act under. `None` means
    /// unrestricted; `Some(set)` restricts the agent to exactly that set.
    #[serde(default)]
    pub allowed_classes: Option<BTreeSet<String>>,
}

/// The default approval requirement applied when a class has no entry in
/// `classes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultAuthority {
    /// The fallback approver requirement.
    pub require: Approver,
}

/// The full authority matrix: a default policy, per-class overrides, and
/// per-agent allow-lists.
///
/// # Invariants
/// - [`AuthorityMatrix::decide`] always returns a concrete verdict; an
///   unmapped class falls back to `default.require`, and an unmapped agent
///   is treated as unrestricted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityMatrix {
    /// Policy applied when a decision class has no entry in `classes`.
    pub default: DefaultAuthority,
    /// Per-class policy overrides, keyed by canonical class name.
    #[serde(default)]
    pub classes: BTreeMap<String, ClassAuthority>,
    /// Per-agent overrides, keyed by agent id.
    #[serde(default)]
    pub agents: BTreeMap<String, AgentAuthority>,
}

impl Default for AuthorityMatrix {
    fn default() -> Self {
        Self {
            default: DefaultAuthority {
                require: Approver::Human,
            },
            classes: BTreeMap::new(),
            agents: BTreeMap::new(),
        }
    }
}

/// Stable reason codes for an [`AuthorityMatrix::decide`] rejection.
pub mod reason {
    /// The agent's `allowed_classes` does not include the resolved class.
    pub const AGENT_NOT_ALLOWED: &str = "agent_not_allowed_for_decision_class";
    /// The resolved class requires human or manual approval.
    pub const REQUIRES_HUMAN: &str = "authority_requires_human";
}

/// The outcome of [`AuthorityMatrix::decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityOutcome {
    /// Whether the action may proceed.
    pub allowed: bool,
    /// Stable reason code when `allowed` is `false`.
    pub reason: Option<&'static str>,
    /// The approver this class resolved to.
    pub required: Approver,
    /// The normalized decision class this outcome was computed for.
    pub class: String,
}

impl AuthorityMatrix {
    /// Resolves the authorization outcome for `class` and `agent_id`.
    ///
    /// Agent allow-list checks happen before the class requirement lookup:
    /// an agent excluded from a class is blocked regardless of whether that
    /// class would otherwise be satisfied by `agent` or `guardian` authority.
    #[must_use]
    pub fn decide(&self, class: &str, agent_id: &str) -> AuthorityOutcome {
        let required = self
            .classes
            .get(class)
            .map_or(self.default.require, |c| c.require);

        if let Some(agent) = self.agents.get(agent_id) {
            if let Some(allowed) = &agent.allowed_classes {
                if !allowed.contains(class) {
                    return AuthorityOutcome {
                        allowed: false,
                        reason: Some(reason::AGENT_NOT_ALLOWED),
                        required,
                        class: class.to_string(),
                    };
                }
            }
        }

        if required.requires_human_intervention() {
            return AuthorityOutcome {
                allowed: false,
                reason: Some(reason::REQUIRES_HUMAN),
                required,
                class: class.to_string(),
            };
        }

        AuthorityOutcome {
            allowed: true,
            reason: None,
            required,
            class: class.to_string(),
        }
    }
}
