// crates/george-core/src/tristate.rs
// ============================================================================
// Module: Tri-State Logic
// Description: Tri-state truth values for fail-closed policy evaluation.
// Purpose: Let the Runtime Gate treat missing or invalid signals as Unknown
//          rather than silently coercing them to false (or worse, true).
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Tri-state values (`true`/`false`/`unknown`) preserve fail-closed semantics
//! when a required signal is missing or not well-formed (a `NaN` health
//! score, an absent `decision_class`). Grounded on the requirement-gate
//! tri-state logic used by the Decision Gate family of tools, trimmed down
//! to what the Runtime Gate's conjunctive class rules need: no DSL, no
//! requirement trees, just `True`/`False`/`Unknown` and strong-Kleene `and`.

use serde::Deserialize;
use serde::Serialize;

/// Tri-state truth value for evidence-aware evaluation.
///
/// # Invariants
/// - Represents a closed set of truth values: true, false, or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriState {
    /// Definitively true.
    True,
    /// Definitively false.
    False,
    /// Indeterminate due to missing or malformed input.
    Unknown,
}

impl TriState {
    /// Returns true if the value is `True`.
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    /// Returns true if the value is `Unknown`.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Strong-Kleene conjunction: `Unknown` dominates unless either side is
    /// definitively `False`.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::False, _) | (_, Self::False) => Self::False,
            (Self::Unknown, _) | (_, Self::Unknown) => Self::Unknown,
            (Self::True, Self::True) => Self::True,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_is_false_dominant() {
        assert_eq!(TriState::False.and(TriState::Unknown), TriState::False);
        assert_eq!(TriState::Unknown.and(TriState::False), TriState::False);
    }

    #[test]
    fn and_is_unknown_dominant_absent_false() {
        assert_eq!(TriState::True.and(TriState::Unknown), TriState::Unknown);
    }

    #[test]
    fn and_true_true_is_true() {
        assert_eq!(TriState::True.and(TriState::True), TriState::True);
    }

    #[test]
    fn from_bool_maps_both_ways() {
        assert_eq!(TriState::from(true), TriState::True);
        assert_eq!(TriState::from(false), TriState::False);
    }
}
