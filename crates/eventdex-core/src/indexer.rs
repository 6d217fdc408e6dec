//! # Indexer Module
//!
//! Builds the index document from a data directory.
//!
//! - Enumerate event subdirectories in sorted order
//! - Extract one record per subdirectory, isolating failures
//! - Aggregate records and counts into an `IndexDocument`
//!
//! A subdirectory that cannot be indexed becomes a `ScanEntry::Skipped`
//! with its reason. Only a missing or unlistable data directory is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use crate::metadata::EventMetadata;
use crate::primitives::{COVER_FILE_NAME, MAX_METADATA_FILE_SIZE, METADATA_FILE_NAME};
use crate::scanner::list_event_dirs;
use crate::{EventRecord, EventdexError, IndexDocument, ScanEntry, SkipReason};

// =============================================================================
// SCAN REPORT
// =============================================================================

/// Result of a full scan: the document plus every per-item outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// One entry per subdirectory, in scan order.
    pub entries: Vec<ScanEntry>,
    /// The assembled index.
    pub document: IndexDocument,
}

impl ScanReport {
    /// Iterate over skipped subdirectories and their reasons.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.entries.iter().filter_map(|entry| match entry {
            ScanEntry::Skipped { id, reason } => Some((id.as_str(), reason)),
            ScanEntry::Indexed(_) => None,
        })
    }

    /// Number of subdirectories that produced no record.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }
}

// =============================================================================
// INDEXER
// =============================================================================

/// Scans one data directory.
#[derive(Debug, Clone)]
pub struct Indexer {
    data_dir: PathBuf,
}

impl Indexer {
    /// Create an indexer for `data_dir`. Nothing is read until `scan`.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The directory being scanned.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Scan every subdirectory and assemble the index.
    ///
    /// # Errors
    /// Fails only when the data directory itself cannot be listed. Per-item
    /// failures are recorded in the report.
    pub fn scan(&self) -> Result<ScanReport, EventdexError> {
        self.scan_with(|_| {})
    }

    /// Like [`Indexer::scan`], calling `on_entry` as each subdirectory is
    /// processed.
    ///
    /// # Errors
    /// Same as [`Indexer::scan`].
    pub fn scan_with(
        &self,
        mut on_entry: impl FnMut(&ScanEntry),
    ) -> Result<ScanReport, EventdexError> {
        let names = list_event_dirs(&self.data_dir)?;

        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let entry = match name.into_string() {
                Ok(id) => match extract_event(&self.data_dir, &id) {
                    Ok(record) => ScanEntry::Indexed(record),
                    Err(reason) => ScanEntry::Skipped { id, reason },
                },
                Err(raw) => ScanEntry::Skipped {
                    id: raw.to_string_lossy().into_owned(),
                    reason: SkipReason::InvalidName,
                },
            };
            on_entry(&entry);
            entries.push(entry);
        }

        let records = entries
            .iter()
            .filter_map(|entry| match entry {
                ScanEntry::Indexed(record) => Some(record.clone()),
                ScanEntry::Skipped { .. } => None,
            })
            .collect();

        Ok(ScanReport {
            entries,
            document: IndexDocument::from_records(records),
        })
    }
}

/// Build the index document for `data_dir`.
pub fn build_index(data_dir: &Path) -> Result<IndexDocument, EventdexError> {
    Indexer::new(data_dir).scan().map(|report| report.document)
}

/// Extract the record for one event subdirectory.
///
/// Every failure for this item is returned as a `SkipReason`.
pub fn extract_event(data_dir: &Path, id: &str) -> Result<EventRecord, SkipReason> {
    extract_event_within(data_dir, id, MAX_METADATA_FILE_SIZE)
}

fn extract_event_within(
    data_dir: &Path,
    id: &str,
    max_metadata_size: u64,
) -> Result<EventRecord, SkipReason> {
    let event_dir = data_dir.join(id);
    let metadata_path = event_dir.join(METADATA_FILE_NAME);

    let file_meta = match fs::metadata(&metadata_path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SkipReason::MissingMetadata);
        }
        Err(e) => return Err(SkipReason::Unreadable(e.to_string())),
    };

    // Checked before reading to avoid loading huge files.
    if file_meta.len() > max_metadata_size {
        return Err(SkipReason::TooLarge {
            size: file_meta.len(),
            max: max_metadata_size,
        });
    }

    let contents = fs::read(&metadata_path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    let metadata = EventMetadata::parse(&contents)?;

    let has_game = metadata.has_game();
    let has_cover = event_dir.join(COVER_FILE_NAME).exists();
    let topic = metadata.topic_or_fallback(id);

    Ok(EventRecord::new(id, topic, has_game, has_cover))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_event(root: &Path, id: &str, metadata: Option<&str>, cover: bool) {
        let dir = root.join(id);
        fs::create_dir_all(&dir).expect("mkdir");
        if let Some(text) = metadata {
            fs::write(dir.join(METADATA_FILE_NAME), text).expect("write metadata");
        }
        if cover {
            fs::write(dir.join(COVER_FILE_NAME), b"\x89PNG").expect("write cover");
        }
    }

    #[test]
    fn extract_full_record() {
        let root = tempfile::tempdir().expect("tempdir");
        write_event(
            root.path(),
            "e1",
            Some(r#"{"topic":"T1","events":[{"C_gold":1}],"ordered_buckets":[1,2]}"#),
            true,
        );

        let record = extract_event(root.path(), "e1").expect("extract");
        assert_eq!(record, EventRecord::new("e1", "T1", true, true));
    }

    #[test]
    fn extract_missing_metadata() {
        let root = tempfile::tempdir().expect("tempdir");
        write_event(root.path(), "e3", None, true);

        assert_eq!(
            extract_event(root.path(), "e3"),
            Err(SkipReason::MissingMetadata)
        );
    }

    #[test]
    fn extract_malformed_metadata() {
        let root = tempfile::tempdir().expect("tempdir");
        write_event(root.path(), "e4", Some("{\"topic\": "), false);

        assert!(matches!(
            extract_event(root.path(), "e4"),
            Err(SkipReason::Malformed(_))
        ));
    }

    #[test]
    fn extract_metadata_directory_is_unreadable() {
        let root = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(root.path().join("e5").join(METADATA_FILE_NAME)).expect("mkdir");

        assert!(matches!(
            extract_event(root.path(), "e5"),
            Err(SkipReason::Unreadable(_))
        ));
    }

    #[test]
    fn extract_rejects_metadata_over_limit() {
        let root = tempfile::tempdir().expect("tempdir");
        let text = r#"{"topic":"T"}"#;
        write_event(root.path(), "big", Some(text), false);
        let size = text.len() as u64;

        assert_eq!(
            extract_event_within(root.path(), "big", size - 1),
            Err(SkipReason::TooLarge {
                size,
                max: size - 1
            })
        );
        // exactly at the limit is accepted
        assert!(extract_event_within(root.path(), "big", size).is_ok());
    }

    #[test]
    fn scan_with_reports_entries_in_order() {
        let root = tempfile::tempdir().expect("tempdir");
        write_event(root.path(), "b", Some(r#"{"topic":"B"}"#), false);
        write_event(root.path(), "a", None, false);

        let mut seen = Vec::new();
        let report = Indexer::new(root.path())
            .scan_with(|entry| seen.push(entry.clone()))
            .expect("scan");

        assert_eq!(seen, report.entries);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].id(), "a");
    }

    #[test]
    fn scan_keeps_order_and_outcomes() {
        let root = tempfile::tempdir().expect("tempdir");
        write_event(root.path(), "b", Some(r#"{"topic":"B"}"#), false);
        write_event(root.path(), "a", Some(r#"{"topic":"A"}"#), true);
        write_event(root.path(), "c", None, false);

        let report = Indexer::new(root.path()).scan().expect("scan");

        let ids: Vec<&str> = report.entries.iter().map(ScanEntry::id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(report.document.total, 2);
        assert_eq!(report.document.with_cover, 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(
            report.skipped().collect::<Vec<_>>(),
            vec![("c", &SkipReason::MissingMetadata)]
        );
    }

    #[test]
    fn build_index_on_missing_dir_fails() {
        let root = tempfile::tempdir().expect("tempdir");
        let missing = root.path().join("data");
        assert_eq!(
            build_index(&missing),
            Err(EventdexError::DataDirNotFound(missing))
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_are_skipped() {
        use std::os::unix::ffi::OsStrExt;

        let root = tempfile::tempdir().expect("tempdir");
        let raw = std::ffi::OsStr::from_bytes(b"bad\xffname");
        fs::create_dir(root.path().join(raw)).expect("mkdir");
        write_event(root.path(), "good", Some("{}"), false);

        let report = Indexer::new(root.path()).scan().expect("scan");
        assert_eq!(report.document.total, 1);
        assert!(
            report
                .skipped()
                .any(|(_, reason)| *reason == SkipReason::InvalidName)
        );
    }
}
