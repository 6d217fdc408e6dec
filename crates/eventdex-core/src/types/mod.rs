//! # Core Type Definitions
//!
//! This module contains all core types for the eventdex indexer:
//! - Output structures (`EventRecord`, `IndexDocument`)
//! - Per-item scan outcomes (`ScanEntry`, `SkipReason`)
//! - Error types (`EventdexError`)
//!
//! ## Determinism Guarantees
//!
//! - Serialized field order is the declaration order below
//! - Counts are derived from records, never stored independently
//! - No timestamps or host-dependent values

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::primitives::METADATA_FILE_NAME;

// =============================================================================
// EVENT RECORD
// =============================================================================

/// One indexed event, produced from a subdirectory with valid metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// The subdirectory name.
    pub id: String,
    /// Title from the metadata, or the fallback derived from `id`.
    pub topic: String,
    /// Path of the metadata document relative to the data directory.
    pub file: String,
    /// The event carries a playable sorting game.
    #[serde(rename = "hasGame")]
    pub has_game: bool,
    /// A `cover.png` sits next to the metadata document.
    #[serde(rename = "hasCover")]
    pub has_cover: bool,
}

impl EventRecord {
    /// Create a record; `file` is derived from `id`.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        topic: impl Into<String>,
        has_game: bool,
        has_cover: bool,
    ) -> Self {
        let id = id.into();
        let file = metadata_rel_path(&id);
        Self {
            id,
            topic: topic.into(),
            file,
            has_game,
            has_cover,
        }
    }
}

/// Relative metadata path for an event id. Always uses `/`.
#[must_use]
pub fn metadata_rel_path(id: &str) -> String {
    format!("{}/{}", id, METADATA_FILE_NAME)
}

// =============================================================================
// INDEX DOCUMENT
// =============================================================================

/// The consolidated index written to `index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IndexDocument {
    /// Records in ascending id order.
    pub topics: Vec<EventRecord>,
    /// Number of records.
    pub total: usize,
    /// Number of records with `hasGame`.
    pub with_game: usize,
    /// Number of records with `hasCover`.
    pub with_cover: usize,
}

impl IndexDocument {
    /// Assemble a document, computing every count from `topics`.
    #[must_use]
    pub fn from_records(topics: Vec<EventRecord>) -> Self {
        let total = topics.len();
        let with_game = topics.iter().filter(|t| t.has_game).count();
        let with_cover = topics.iter().filter(|t| t.has_cover).count();
        Self {
            topics,
            total,
            with_game,
            with_cover,
        }
    }

    /// Check that the stored counts agree with the records.
    pub fn validate(&self) -> Result<(), EventdexError> {
        let total = self.topics.len();
        let with_game = self.topics.iter().filter(|t| t.has_game).count();
        let with_cover = self.topics.iter().filter(|t| t.has_cover).count();

        if total != self.total {
            return Err(EventdexError::InconsistentIndex(format!(
                "total is {} but {} topics are listed",
                self.total, total
            )));
        }
        if with_game != self.with_game {
            return Err(EventdexError::InconsistentIndex(format!(
                "with_game is {} but {} topics have a game",
                self.with_game, with_game
            )));
        }
        if with_cover != self.with_cover {
            return Err(EventdexError::InconsistentIndex(format!(
                "with_cover is {} but {} topics have a cover",
                self.with_cover, with_cover
            )));
        }
        Ok(())
    }

    /// Check if the index lists no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

// =============================================================================
// SCAN OUTCOMES
// =============================================================================

/// Why a subdirectory produced no record.
///
/// Every variant is recoverable: the scan records it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The subdirectory has no metadata document.
    #[error("no new_event.json found")]
    MissingMetadata,

    /// The metadata document exists but could not be read.
    #[error("cannot read new_event.json: {0}")]
    Unreadable(String),

    /// The metadata document exceeds the size limit.
    #[error("new_event.json is {size} bytes, limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    /// The metadata document is not valid JSON.
    #[error("malformed new_event.json: {0}")]
    Malformed(String),

    /// The metadata document is valid JSON but not an object.
    #[error("new_event.json is not a JSON object")]
    NotAnObject,

    /// The directory name is not valid UTF-8.
    #[error("directory name is not valid UTF-8")]
    InvalidName,
}

/// Outcome of one subdirectory, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEntry {
    /// A record was produced.
    Indexed(EventRecord),
    /// No record; `id` is lossy for non-UTF-8 names.
    Skipped { id: String, reason: SkipReason },
}

impl ScanEntry {
    /// The subdirectory name this entry refers to.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Indexed(record) => &record.id,
            Self::Skipped { id, .. } => id,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Fatal errors. Any of these aborts the run before an index is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventdexError {
    /// The data directory does not exist.
    #[error("Data directory not found: {}", .0.display())]
    DataDirNotFound(PathBuf),

    /// The data directory path exists but is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An index document's counts disagree with its records.
    #[error("Inconsistent index: {0}")]
    InconsistentIndex(String),

    /// The index on disk differs from a fresh scan.
    #[error("Index is out of date: {}", .0.display())]
    StaleIndex(PathBuf),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_file_is_derived_from_id() {
        let record = EventRecord::new("e1", "T1", false, false);
        assert_eq!(record.file, "e1/new_event.json");
    }

    #[test]
    fn counts_are_derived_from_records() {
        let doc = IndexDocument::from_records(vec![
            EventRecord::new("a", "A", true, false),
            EventRecord::new("b", "B", true, true),
            EventRecord::new("c", "C", false, true),
            EventRecord::new("d", "D", false, false),
        ]);
        assert_eq!(doc.total, 4);
        assert_eq!(doc.with_game, 2);
        assert_eq!(doc.with_cover, 2);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn empty_document_is_consistent() {
        let doc = IndexDocument::from_records(Vec::new());
        assert!(doc.is_empty());
        assert_eq!(doc.total, 0);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn validate_rejects_tampered_counts() {
        let mut doc = IndexDocument::from_records(vec![EventRecord::new("a", "A", true, true)]);
        doc.with_game = 0;
        assert!(matches!(
            doc.validate(),
            Err(EventdexError::InconsistentIndex(_))
        ));
    }

    #[test]
    fn record_serializes_camel_case_flags_in_order() {
        let record = EventRecord::new("e1", "T1", true, false);
        let json = serde_json::to_string(&record).expect("serialize");
        assert_eq!(
            json,
            r#"{"id":"e1","topic":"T1","file":"e1/new_event.json","hasGame":true,"hasCover":false}"#
        );
    }

    #[test]
    fn skip_reason_messages_name_the_file() {
        assert_eq!(
            SkipReason::MissingMetadata.to_string(),
            "no new_event.json found"
        );
        assert_eq!(
            SkipReason::NotAnObject.to_string(),
            "new_event.json is not a JSON object"
        );
    }

    #[test]
    fn scan_entry_id() {
        let indexed = ScanEntry::Indexed(EventRecord::new("x", "X", false, false));
        let skipped = ScanEntry::Skipped {
            id: "y".to_string(),
            reason: SkipReason::MissingMetadata,
        };
        assert_eq!(indexed.id(), "x");
        assert_eq!(skipped.id(), "y");
    }
}
