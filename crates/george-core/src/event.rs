// crates/george-core/src/event.rs
// ============================================================================
// Module: George Event
// Description: Inbound events produced by worker agents.
// Purpose: Immutable, serializable events consumed by the Rule Engine.
// Dependencies: crate::identifiers, crate::time, serde_json
// ============================================================================

//! ## Overview
//! An event is the sole input to one pass through the Orchestrator pipeline.
//! Events are immutable on arrival: the Orchestrator never mutates a
//! received event, it only reads from it while building a [`crate::Decision`].

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::identifiers::AgentId;
use crate::identifiers::EventId;
use crate::time::Timestamp;

/// An inbound event produced by a worker agent.
///
/// # Invariants
/// - Immutable once constructed; the Orchestrator never mutates a received
///   event.
/// - `id` is assigned by [`Event::with_fresh_id_if_absent`] when absent on
///   the wire, never left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier; a fresh UUID is assigned if absent on arrival.
    #[serde(default)]
    pub id: Option<EventId>,
    /// Event arrival timestamp, supplied by the producer.
    pub timestamp: Timestamp,
    /// Producing agent's identifier.
    pub agent: AgentId,
    /// Event name (e.g. `"heartbeat"`, `"deploy_requested"`).
    pub event: String,
    /// Optional intent, used for decision-class resolution when no rule
    /// supplies one.
    #[serde(default)]
    pub intent: Option<String>,
    /// Arbitrary event payload.
    #[serde(default)]
    pub payload: Value,
    /// Optional identifier of the event that caused this one, for
    /// correlation.
    #[serde(default)]
    pub source_event_id: Option<String>,
}

impl Event {
    /// Returns the event's identifier, assigning and returning a fresh one
    /// if none was supplied on arrival.
    ///
    /// This does not mutate `self`; callers that need a stable id should
    /// call this once and thread the result through, matching the
    /// immutable-on-arrival invariant.
    #[must_use]
    pub fn id_or_fresh(&self) -> EventId {
        self.id.unwrap_or_default()
    }

    /// Returns the event's field value for a given `when` key, treating an
    /// absent or empty string as equivalent to "not present" for matching
    /// purposes.
    #[must_use]
    pub fn field(&self, key: EventField) -> Option<&str> {
        let value = match key {
            EventField::Agent => Some(self.agent.as_str()),
            EventField::Event => Some(self.event.as_str()),
            EventField::Intent => self.intent.as_deref(),
            EventField::SourceEventId => self.source_event_id.as_deref(),
        };
        value.filter(|s| !s.is_empty())
    }
}

/// The fields a [`crate::Rule`]'s `when` clause can match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    /// The producing agent.
    Agent,
    /// The event name.
    Event,
    /// The event's intent, if any.
    Intent,
    /// The source event identifier, if any.
    SourceEventId,
}
