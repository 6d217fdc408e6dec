//! # Event Metadata
//!
//! Parsing of `new_event.json` and derivation of the fields an index record
//! needs: the topic and the `hasGame` capability flag.
//!
//! Only three keys are read (`topic`, `events`, `ordered_buckets`); every
//! other key is ignored. No further schema validation is performed.
//!
//! ## Game detection
//!
//! The game marker check is textual: each element of `events` is rendered to
//! text and searched for `C_gold`. A string element renders as its contents,
//! anything else as compact JSON in source key order. This matches a marker
//! anywhere inside nested structures, in keys and values alike.

use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::SkipReason;
use crate::primitives::{
    EVENTS_KEY, FALLBACK_TOPIC_LABEL, GAME_MARKER, ORDERED_BUCKETS_KEY, TOPIC_KEY,
};

/// A parsed metadata document. Always a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMetadata {
    fields: Map<String, Value>,
}

impl EventMetadata {
    /// Parse raw bytes into a metadata document.
    ///
    /// Returns `SkipReason::Malformed` for invalid JSON and
    /// `SkipReason::NotAnObject` for any top-level value other than an object.
    pub fn parse(bytes: &[u8]) -> Result<Self, SkipReason> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| SkipReason::Malformed(e.to_string()))?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(SkipReason::NotAnObject),
        }
    }

    /// The `events` list, or an empty slice when absent or not an array.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        self.fields
            .get(EVENTS_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Presence of `ordered_buckets`. The value is ignored, `null` included.
    #[must_use]
    pub fn has_ordered_buckets(&self) -> bool {
        self.fields.contains_key(ORDERED_BUCKETS_KEY)
    }

    /// True iff some event carries the game marker and `ordered_buckets`
    /// is present.
    #[must_use]
    pub fn has_game(&self) -> bool {
        self.events().iter().any(contains_game_marker) && self.has_ordered_buckets()
    }

    /// The `topic` field, if it is a non-empty string.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.fields
            .get(TOPIC_KEY)
            .and_then(Value::as_str)
            .filter(|topic| !topic.is_empty())
    }

    /// The topic, falling back to [`fallback_topic`].
    #[must_use]
    pub fn topic_or_fallback(&self, id: &str) -> String {
        self.topic()
            .map_or_else(|| fallback_topic(id), str::to_string)
    }
}

/// Title used when an event has no usable `topic`.
#[must_use]
pub fn fallback_topic(id: &str) -> String {
    format!("{} {}", FALLBACK_TOPIC_LABEL, id)
}

/// Render one `events` element to the text searched for the game marker.
#[must_use]
pub fn render_event(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Check if the rendered element contains the game marker.
#[must_use]
pub fn contains_game_marker(value: &Value) -> bool {
    render_event(value).contains(GAME_MARKER)
}

// =============================================================================
// TESTS
// =============================================================================
