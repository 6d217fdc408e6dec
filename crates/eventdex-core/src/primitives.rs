//! # Fixed Names and Limits
//!
//! Hardcoded file names, metadata keys and limits for the eventdex indexer.
//!
//! These values define the on-disk contract with the content set and are
//! compiled into the binary. Changing any of them changes which events are
//! discovered or how they are flagged.

// =============================================================================
// FILESYSTEM LAYOUT
// =============================================================================

/// Name of the data directory next to the executable.
pub const DATA_DIR_NAME: &str = "data";

/// Per-event metadata document. Required for a record to be produced.
pub const METADATA_FILE_NAME: &str = "new_event.json";

/// Optional cover image, a sibling of the metadata document.
pub const COVER_FILE_NAME: &str = "cover.png";

/// The consolidated index written into the data directory.
pub const INDEX_FILE_NAME: &str = "index.json";

// =============================================================================
// METADATA KEYS
// =============================================================================

/// Human-readable title of an event.
pub const TOPIC_KEY: &str = "topic";

/// List of sub-events scanned for the game marker.
pub const EVENTS_KEY: &str = "events";

/// Presence-only key; the sorting game needs it.
pub const ORDERED_BUCKETS_KEY: &str = "ordered_buckets";

/// Substring searched in the rendered text of each `events` element.
pub const GAME_MARKER: &str = "C_gold";

/// Label prefixed to the id when an event has no usable topic.
pub const FALLBACK_TOPIC_LABEL: &str = "事件";

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Maximum metadata file size (100 MB).
///
/// Larger files are skipped before being read into memory.
pub const MAX_METADATA_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum number of characters of a topic shown on a progress line.
pub const PROGRESS_TOPIC_WIDTH: usize = 40;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_and_cover_are_siblings() {
        assert!(!METADATA_FILE_NAME.contains('/'));
        assert!(!COVER_FILE_NAME.contains('/'));
    }

    #[test]
    fn game_marker_is_exact() {
        assert_eq!(GAME_MARKER, "C_gold");
        assert_eq!(ORDERED_BUCKETS_KEY, "ordered_buckets");
    }
}
