// crates/george-core/src/time.rs
// ============================================================================
// Module: George Time Model
// Description: Canonical timestamp representation for events, traces, and reports.
// Purpose: Provide a deterministic, RFC 3339 timestamp value injected by callers.
// Dependencies: time, serde
// ============================================================================

//! ## Overview
//! George never reads the wall clock inside its pure evaluation functions
//! (Rule Engine, Guardian, Authority, Runtime Gate, Consistency Validator,
//! Self-Healing detectors). Hosts supply a [`Timestamp`] explicitly so that a
//! run is replayable from its recorded artifacts alone.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A UTC timestamp serialized as RFC 3339 text on the wire.
///
/// # Invariants
/// - Always round-trips through [`Timestamp::parse`] / [`Timestamp::to_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Wraps an existing `OffsetDateTime` as a canonical timestamp.
    #[must_use]
    pub const fn from_offset_date_time(value: OffsetDateTime) -> Self {
        Self(value)
    }

    /// Returns the underlying `OffsetDateTime`.
    #[must_use]
    pub const fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }

    /// Parses an RFC 3339 timestamp string.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] when `text` is not a syntactically valid
    /// RFC 3339 timestamp.
    pub fn parse(text: &str) -> Result<Self, TimestampError> {
        OffsetDateTime::parse(text, &Rfc3339)
            .map(Self)
            .map_err(|_| TimestampError::Invalid {
                text: text.to_string(),
            })
    }

    /// Formats the timestamp as RFC 3339 text.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.format(&Rfc3339).unwrap_or_else(|_| self.0.unix_timestamp().to_string())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Errors produced while parsing a [`Timestamp`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimestampError {
    /// The input was not a syntactically valid RFC 3339 timestamp.
    #[error("invalid RFC 3339 timestamp: {text}")]
    Invalid {
        /// The raw text that failed to parse.
        text: String,
    },
}

/// Supplies the current time to components that need it (the Orchestrator's
/// event-arrival clock; never used inside pure evaluation functions).
pub trait Clock: Send + Sync {
    /// Returns the current timestamp.
    fn now(&self) -> Timestamp;
}

/// A clock backed by `time::OffsetDateTime::now_utc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_offset_date_time(OffsetDateTime::now_utc())
    }
}

/// A fixed clock for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
