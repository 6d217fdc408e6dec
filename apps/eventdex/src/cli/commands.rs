//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use eventdex_core::{
    EventdexError, IndexDocument, Indexer, ScanEntry, ScanReport, SkipReason, index_from_bytes,
    index_to_bytes,
    primitives::{DATA_DIR_NAME, INDEX_FILE_NAME, PROGRESS_TOPIC_WIDTH},
    write_index,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// =============================================================================
// PATHS & OPTIONS
// =============================================================================

/// Resolved input and output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPaths {
    /// Directory holding one folder per event.
    pub data_dir: PathBuf,
    /// Where the index is written.
    pub output: PathBuf,
}

/// How much to print.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub verbose: bool,
    pub quiet: bool,
    pub json_mode: bool,
}

impl OutputOptions {
    fn show_progress(self) -> bool {
        !self.quiet && !self.json_mode
    }
}

/// The `data` directory next to the running executable.
pub fn default_data_dir() -> Result<PathBuf, EventdexError> {
    let exe = std::env::current_exe()
        .map_err(|e| EventdexError::IoError(format!("Cannot locate executable: {}", e)))?;
    let exe_dir = exe.parent().ok_or_else(|| {
        EventdexError::IoError(format!(
            "Executable '{}' has no parent directory",
            exe.display()
        ))
    })?;
    Ok(exe_dir.join(DATA_DIR_NAME))
}

/// Fill in defaults: data dir next to the executable, index inside it.
pub fn resolve_paths(
    data_dir: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<IndexPaths, EventdexError> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let output = output.unwrap_or_else(|| data_dir.join(INDEX_FILE_NAME));

    tracing::debug!("Resolved data dir {:?}, output {:?}", data_dir, output);
    Ok(IndexPaths { data_dir, output })
}

/// Where the index will be written.
///
/// The containing directory must already exist; the index file is created
/// or overwritten. A bare file name resolves against the working directory.
fn output_target(path: &Path) -> Result<PathBuf, EventdexError> {
    let Some(file_name) = path.file_name() else {
        return Err(EventdexError::IoError(format!(
            "Output path '{}' does not name a file",
            path.display()
        )));
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(dir.join(file_name)),
        Ok(_) => Err(EventdexError::IoError(format!(
            "Output location '{}' is not a directory",
            dir.display()
        ))),
        Err(e) => Err(EventdexError::IoError(format!(
            "Output directory '{}' is unavailable: {}",
            dir.display(),
            e
        ))),
    }
}

// =============================================================================
// PROGRESS OUTPUT
// =============================================================================

/// First `width` characters of `text`.
pub fn truncate_chars(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// One progress line per scanned folder.
pub fn progress_line(entry: &ScanEntry) -> String {
    match entry {
        ScanEntry::Indexed(record) => {
            let status = if record.has_game { "✅" } else { "📋" };
            let cover = if record.has_cover { "🖼️" } else { "  " };
            format!(
                "{} {} {}: {}",
                status,
                cover,
                record.id,
                truncate_chars(&record.topic, PROGRESS_TOPIC_WIDTH)
            )
        }
        ScanEntry::Skipped {
            id,
            reason: SkipReason::MissingMetadata,
        } => format!("⚠️  skipped {}: {}", id, SkipReason::MissingMetadata),
        ScanEntry::Skipped { id, reason } => format!("❌ error {}: {}", id, reason),
    }
}

fn log_skips(report: &ScanReport) {
    for (id, reason) in report.skipped() {
        tracing::warn!(event = id, "Skipped event folder: {}", reason);
    }
}

fn print_header(paths: &IndexPaths, opts: OutputOptions) {
    if opts.show_progress() {
        println!("📂 Data directory: {}", paths.data_dir.display());
        println!("📝 Output file:    {}", paths.output.display());
        println!();
    }
}

fn print_progress(entry: &ScanEntry, opts: OutputOptions) {
    if opts.show_progress() {
        println!("{}", progress_line(entry));
    }
}

fn print_summary(report: &ScanReport, paths: &IndexPaths, opts: OutputOptions, written: bool) {
    let doc = &report.document;

    if opts.json_mode {
        let skipped: Vec<serde_json::Value> = report
            .skipped()
            .map(|(id, reason)| serde_json::json!({ "id": id, "reason": reason.to_string() }))
            .collect();
        let output = serde_json::json!({
            "data_dir": paths.data_dir.to_string_lossy(),
            "output": paths.output.to_string_lossy(),
            "written": written,
            "total": doc.total,
            "with_game": doc.with_game,
            "with_cover": doc.with_cover,
            "skipped": skipped
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return;
    }

    println!();
    if written {
        println!("✅ Wrote {}", paths.output.display());
    }
    println!("📊 Summary:");
    println!("   - Total events: {}", doc.total);
    println!("   - With game:    {}", doc.with_game);
    println!("   - With cover:   {}", doc.with_cover);
    println!("   - Skipped:      {}", report.skipped_count());

    if opts.verbose && report.skipped_count() > 0 {
        println!();
        println!("Skipped folders:");
        for (id, reason) in report.skipped() {
            println!("   - {}: {}", id, reason);
        }
    }
}

// =============================================================================
// BUILD COMMAND
// =============================================================================

/// Scan the data directory and write the index.
pub fn cmd_build(paths: &IndexPaths, opts: OutputOptions) -> Result<(), EventdexError> {
    let indexer = Indexer::new(&paths.data_dir);
    tracing::info!("Scanning {:?}", indexer.data_dir());
    print_header(paths, opts);

    let report = indexer.scan_with(|entry| print_progress(entry, opts))?;
    log_skips(&report);

    let output = output_target(&paths.output)?;

    if report.document.is_empty() {
        tracing::warn!(
            "No events indexed; {:?} will be overwritten with an empty index",
            output
        );
    }

    write_index(&report.document, &output)?;
    tracing::info!(
        "Indexed {} events ({} skipped) into {:?}",
        report.document.total,
        report.skipped_count(),
        output
    );

    print_summary(&report, paths, opts, true);
    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Scan and compare with the index on disk. Never writes.
pub fn cmd_check(paths: &IndexPaths, opts: OutputOptions) -> Result<(), EventdexError> {
    tracing::info!("Checking {:?} against {:?}", paths.data_dir, paths.output);
    print_header(paths, opts);

    let report = Indexer::new(&paths.data_dir).scan_with(|entry| print_progress(entry, opts))?;
    log_skips(&report);
    print_summary(&report, paths, opts, false);

    let fresh = index_to_bytes(&report.document)?;
    let existing = match std::fs::read(&paths.output) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("No index at {:?}", paths.output);
            return Err(EventdexError::StaleIndex(paths.output.clone()));
        }
        Err(e) => {
            return Err(EventdexError::IoError(format!(
                "Cannot read index '{}': {}",
                paths.output.display(),
                e
            )));
        }
    };

    if existing == fresh {
        tracing::info!("Index is up to date");
        return Ok(());
    }

    match index_from_bytes(&existing) {
        Ok(old) => report_changes(&old, &report.document),
        Err(e) => tracing::warn!("Existing index is invalid: {}", e),
    }
    Err(EventdexError::StaleIndex(paths.output.clone()))
}

/// Log which events would be added, removed or changed.
fn report_changes(old: &IndexDocument, new: &IndexDocument) {
    let old_ids: BTreeSet<&str> = old.topics.iter().map(|t| t.id.as_str()).collect();
    let new_ids: BTreeSet<&str> = new.topics.iter().map(|t| t.id.as_str()).collect();

    for id in new_ids.difference(&old_ids) {
        tracing::warn!(event = *id, "Not in index");
    }
    for id in old_ids.difference(&new_ids) {
        tracing::warn!(event = *id, "Listed in index but no longer indexable");
    }
    for record in &new.topics {
        let changed = old
            .topics
            .iter()
            .find(|t| t.id == record.id)
            .is_some_and(|t| t != record);
        if changed {
            tracing::warn!(event = record.id.as_str(), "Index entry is outdated");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use eventdex_core::EventRecord;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("事件事件事件", 2), "事件");
        assert_eq!(truncate_chars("short", 40), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn progress_line_for_game_with_cover() {
        let entry = ScanEntry::Indexed(EventRecord::new("e1", "T1", true, true));
        assert_eq!(progress_line(&entry), "✅ 🖼️ e1: T1");
    }

    #[test]
    fn progress_line_for_plain_event() {
        let entry = ScanEntry::Indexed(EventRecord::new("e2", "事件 e2", false, false));
        assert_eq!(progress_line(&entry), "📋    e2: 事件 e2");
    }

    #[test]
    fn progress_line_truncates_topic() {
        let topic = "x".repeat(60);
        let entry = ScanEntry::Indexed(EventRecord::new("e", topic, false, false));
        let line = progress_line(&entry);
        assert!(line.ends_with(&"x".repeat(PROGRESS_TOPIC_WIDTH)));
        assert!(!line.ends_with(&"x".repeat(PROGRESS_TOPIC_WIDTH + 1)));
    }

    #[test]
    fn progress_line_for_skips() {
        let missing = ScanEntry::Skipped {
            id: "e3".to_string(),
            reason: SkipReason::MissingMetadata,
        };
        let broken = ScanEntry::Skipped {
            id: "e4".to_string(),
            reason: SkipReason::NotAnObject,
        };
        assert_eq!(
            progress_line(&missing),
            "⚠️  skipped e3: no new_event.json found"
        );
        assert_eq!(
            progress_line(&broken),
            "❌ error e4: new_event.json is not a JSON object"
        );
    }

    #[test]
    fn resolve_paths_defaults_output_into_data_dir() {
        let paths = resolve_paths(Some(PathBuf::from("/srv/site/data")), None).expect("resolve");
        assert_eq!(paths.output, PathBuf::from("/srv/site/data/index.json"));
    }

    #[test]
    fn resolve_paths_default_data_dir_is_next_to_exe() {
        let paths = resolve_paths(None, None).expect("resolve");
        assert!(paths.data_dir.ends_with(DATA_DIR_NAME));
        assert!(paths.output.ends_with("data/index.json"));
    }

    #[test]
    fn output_target_accepts_bare_filename() {
        let target = output_target(Path::new("index.json")).expect("resolve");
        assert_eq!(target, Path::new(".").join("index.json"));
    }

    #[test]
    fn output_target_rejects_missing_parent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nope").join("index.json");
        assert!(matches!(output_target(&path), Err(EventdexError::IoError(_))));
    }

    #[test]
    fn output_target_rejects_file_as_parent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("plain");
        std::fs::write(&file, "x").expect("write");
        assert!(matches!(
            output_target(&file.join("index.json")),
            Err(EventdexError::IoError(_))
        ));
    }

    #[test]
    fn output_target_keeps_existing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("index.json");
        assert_eq!(output_target(&path).expect("resolve"), path);
    }
}
