//! # eventdex-core
//!
//! The event indexer for eventdex - THE LOGIC.
//!
//! Scans a data directory of event subfolders, reads each folder's
//! `new_event.json`, and assembles one `index.json` listing every event with
//! its title and capability flags (`hasGame`, `hasCover`).
//!
//! ## Pipeline
//!
//! 1. `scanner` - list immediate subdirectories, sorted
//! 2. `indexer` - extract one record per subdirectory, failures isolated
//! 3. `formats` - encode and write the index document
//!
//! ## Architectural Constraints
//!
//! - Synchronous, single-threaded, NO async, NO network
//! - Never logs; per-item outcomes are returned in a `ScanReport`
//! - Never modifies input files

// =============================================================================
// MODULES
// =============================================================================

pub mod formats;
pub mod indexer;
pub mod metadata;
pub mod primitives;
pub mod scanner;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    EventRecord, EventdexError, IndexDocument, ScanEntry, SkipReason, metadata_rel_path,
};

// =============================================================================
// RE-EXPORTS: Indexer
// =============================================================================

pub use indexer::{Indexer, ScanReport, build_index, extract_event};
pub use metadata::{EventMetadata, contains_game_marker, fallback_topic, render_event};
pub use scanner::list_event_dirs;

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{index_from_bytes, index_to_bytes, write_index};
