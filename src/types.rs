use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by every branch of one traversal run.
///
/// Each update is a single atomic increment, so concurrent workers never
/// lose a count.
#[derive(Debug, Default)]
pub struct Statistics {
    found_files: AtomicUsize,
    skipped_files: AtomicUsize,
}
impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }
    /// Files read and handed to the printer.
    pub fn found_files(&self) -> usize {
        self.found_files.load(Ordering::Relaxed)
    }
    /// Files dropped by an extension, custom pattern or binary filter.
    pub fn skipped_files(&self) -> usize {
        self.skipped_files.load(Ordering::Relaxed)
    }
    pub(crate) fn record_found(&self) {
        self.found_files.fetch_add(1, Ordering::Relaxed);
    }
    pub(crate) fn record_skipped(&self) {
        self.skipped_files.fetch_add(1, Ordering::Relaxed);
    }
}

/// The outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Directory that gitignore rules and tree paths are relative to.
    pub base: PathBuf,
    /// The rendered tree, when one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    pub found_files: usize,
    pub skipped_files: usize,
}
