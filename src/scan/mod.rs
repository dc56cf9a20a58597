//! Snapshot traversal and language census

use crate::domain::CandidateFile;
use std::path::Path;

pub mod languages;
pub mod scanner;

pub use languages::{language_census, primary_language, LanguageCensus};
pub use scanner::{FileScanner, ScanStats};

/// Scan `root` with default settings.
pub fn scan_snapshot<P: AsRef<Path>>(root: P) -> (Vec<CandidateFile>, ScanStats) {
    let mut scanner = FileScanner::new(root.as_ref().to_path_buf());
    let files = scanner.scan();
    let stats = scanner.stats().clone();
    (files, stats)
}
