//! Deterministic snapshot traversal

use crate::domain::CandidateFile;
use crate::rank::classifier::is_noise_dir;
use crate::utils::{dotted_extension, relative_to};
use ignore::WalkBuilder;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counters for one traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub dirs_pruned: usize,
    pub walk_errors: usize,
}

/// Walks a snapshot root and yields candidate files in traversal order.
///
/// Traversal is depth-first with directory entries sorted by file name, so the
/// same tree always produces the same sequence. Noise directories are pruned
/// without being descended into.
pub struct FileScanner {
    root_path: PathBuf,
    respect_gitignore: bool,
    stats: ScanStats,
}

impl FileScanner {
    /// Create a new FileScanner with default settings.
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path, respect_gitignore: false, stats: ScanStats::default() }
    }

    /// Set whether to respect gitignore files
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    pub fn scan(&mut self) -> Vec<CandidateFile> {
        self.stats = ScanStats::default();

        let mut builder = WalkBuilder::new(&self.root_path);
        builder
            .standard_filters(false)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        let pruned = Arc::new(AtomicUsize::new(0));
        let pruned_in_filter = Arc::clone(&pruned);
        let mut files = Vec::new();
        let walker = builder
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                let prune = is_dir
                    && entry.depth() > 0
                    && entry.file_name().to_str().is_some_and(is_noise_dir);
                if prune {
                    pruned_in_filter.fetch_add(1, Ordering::Relaxed);
                }
                !prune
            })
            .build();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", self.root_path.display(), err);
                    self.stats.walk_errors += 1;
                    continue;
                }
            };

            if entry.file_type().is_some_and(|t| t.is_dir()) {
                continue;
            }

            let Some(relative_path) = relative_to(&self.root_path, entry.path()) else {
                continue;
            };
            if relative_path.is_empty() {
                continue;
            }

            self.stats.files_scanned += 1;

            // Size follows symlinks; a dangling link reports zero and fails later at read time.
            let size_bytes = std::fs::metadata(entry.path()).map(|m| m.len()).unwrap_or(0);
            let extension = dotted_extension(&relative_path);
            files.push(CandidateFile { relative_path, size_bytes, extension });
        }

        self.stats.dirs_pruned = pruned.load(Ordering::Relaxed);

        tracing::debug!(
            root = %self.root_path.display(),
            files = self.stats.files_scanned,
            pruned = self.stats.dirs_pruned,
            "snapshot scanned"
        );
        files
    }

    /// Get scanning statistics
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }
}
