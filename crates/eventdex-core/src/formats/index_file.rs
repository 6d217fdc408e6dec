//! # Index File Format
//!
//! JSON encoding for the consolidated index.
//!
//! Format: pretty-printed JSON, two-space indent, fields in the order
//! `topics`, `total`, `with_game`, `with_cover`. Non-ASCII text is written
//! as UTF-8, never `\u` escaped. No trailing newline.
//!
//! The encoding is a pure function of the document, so an unchanged data
//! directory always produces identical bytes.

use std::fs;
use std::path::Path;

use crate::{EventdexError, IndexDocument};

/// Serialize an index to bytes.
///
/// This is a pure transformation - no file I/O.
pub fn index_to_bytes(doc: &IndexDocument) -> Result<Vec<u8>, EventdexError> {
    serde_json::to_vec_pretty(doc).map_err(|e| EventdexError::SerializationError(e.to_string()))
}

/// Deserialize an index from bytes.
///
/// Rejects documents whose counts disagree with their records.
pub fn index_from_bytes(bytes: &[u8]) -> Result<IndexDocument, EventdexError> {
    let doc: IndexDocument = serde_json::from_slice(bytes).map_err(|e| {
        EventdexError::SerializationError(format!("Failed to parse index: {}", e))
    })?;
    doc.validate()?;
    Ok(doc)
}

/// Write an index to `output_path`, replacing any existing file.
///
/// The parent directory must already exist.
pub fn write_index(doc: &IndexDocument, output_path: &Path) -> Result<(), EventdexError> {
    let bytes = index_to_bytes(doc)?;
    fs::write(output_path, bytes).map_err(|e| {
        EventdexError::IoError(format!(
            "Cannot write index '{}': {}",
            output_path.display(),
            e
        ))
    })
}

// =============================================================================
// TESTS
// =============================================================================
