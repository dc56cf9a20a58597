//! Budgeted context assembly
//!
//! Classify every file under a snapshot, drop ignored ones, stable-sort the rest
//! by priority, keep the first `max_files`, and read each one truncated to
//! `max_bytes_per_file`. An unreadable file is logged and skipped; its slot is
//! not refilled. Reaching the file budget is normal termination.

use crate::domain::{Assembly, AssemblyStats, Budget, ContextRecord};
use crate::error::ReadFailure;
use crate::fetch::RepositorySnapshot;
use crate::rank::rank_files;
use crate::scan::scan_snapshot;
use crate::utils::read_text_prefix;
use std::path::Path;
use tracing::{debug, warn};

/// Ordered context records for `snapshot` under `budget`.
pub fn assemble(snapshot: &RepositorySnapshot, budget: Budget) -> Vec<ContextRecord> {
    assemble_dir(snapshot.root(), budget).records
}

/// Same as [`assemble`] but also returns counters.
pub fn assemble_with_stats(snapshot: &RepositorySnapshot, budget: Budget) -> Assembly {
    assemble_dir(snapshot.root(), budget)
}

/// Assemble directly from a directory root.
pub fn assemble_dir(root: &Path, budget: Budget) -> Assembly {
    let max_files = budget.max_files.get();
    let max_bytes = budget.max_bytes_per_file.get();

    let (candidates, scan_stats) = scan_snapshot(root);
    let mut stats = AssemblyStats {
        files_scanned: candidates.len(),
        dirs_pruned: scan_stats.dirs_pruned,
        ..AssemblyStats::default()
    };

    let ranked = rank_files(candidates);
    stats.files_eligible = ranked.len();
    stats.files_ignored = stats.files_scanned - stats.files_eligible;

    let mut records = Vec::with_capacity(ranked.len().min(max_files));
    for selected in ranked.into_iter().take(max_files) {
        let relative_path = selected.file.relative_path;
        let full_path = root.join(&relative_path);
        match read_text_prefix(&full_path, max_bytes) {
            Ok(prefix) => {
                debug!(
                    path = %relative_path,
                    class = %selected.class,
                    key = %selected.key,
                    bytes = prefix.content.len(),
                    truncated = prefix.truncated,
                    "selected file"
                );
                if prefix.truncated {
                    stats.files_truncated += 1;
                }
                stats.bytes_emitted += prefix.content.len();
                records.push(ContextRecord { path: relative_path, content: prefix.content });
            }
            Err(source) => {
                let failure = ReadFailure { path: full_path, source };
                warn!("Skipping unreadable file: {}", failure);
                stats.files_unreadable += 1;
            }
        }
    }
    stats.files_emitted = records.len();

    Assembly { records, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn budget(files: usize, bytes: usize) -> Budget {
        Budget::try_from_counts(files, bytes).unwrap()
    }

    #[test]
    fn readme_then_source_with_noise_excluded() {
        let tmp = TempDir::new().unwrap();
        let main_py = "p".repeat(200);
        write(tmp.path(), "README.md", "# Test");
        write(tmp.path(), "src/main.py", &main_py);
        write(tmp.path(), "node_modules/x.js", &"x".repeat(50));

        let assembly = assemble_dir(tmp.path(), budget(2, 1000));
        assert_eq!(
            assembly.records,
            vec![
                ContextRecord { path: "README.md".into(), content: "# Test".into() },
                ContextRecord { path: "src/main.py".into(), content: main_py },
            ]
        );
        assert_eq!(assembly.stats.files_emitted, 2);
        assert_eq!(assembly.stats.files_truncated, 0);
    }

    #[test]
    fn only_noise_yields_empty_output() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "node_modules/a.js", "a");
        write(tmp.path(), "node_modules/pkg/README.md", "# pkg");
        write(tmp.path(), "dist/bundle.js", "b");

        let assembly = assemble_dir(tmp.path(), budget(15, 4000));
        assert!(assembly.records.is_empty());
        assert_eq!(assembly.stats, AssemblyStats { dirs_pruned: 2, ..AssemblyStats::default() });
    }

    #[test]
    fn content_cut_to_exact_byte_budget() {
        let tmp = TempDir::new().unwrap();
        let body: String = (0..5000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        write(tmp.path(), "big.py", &body);

        let records = assemble_dir(tmp.path(), budget(1, 4000)).records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, body[..4000]);
    }

    #[test]
    fn budgets_bound_output() {
        let tmp = TempDir::new().unwrap();
        for i in 0..10 {
            write(tmp.path(), &format!("src/file{i}.rs"), &"y".repeat(100 + i));
        }

        let assembly = assemble_dir(tmp.path(), budget(3, 64));
        assert_eq!(assembly.records.len(), 3);
        assert!(assembly.records.iter().all(|r| r.content.len() <= 64));
        assert_eq!(assembly.stats.files_eligible, 10);
        assert_eq!(assembly.stats.files_truncated, 3);
        assert_eq!(assembly.stats.bytes_emitted, 3 * 64);
    }

    #[test]
    fn priority_docs_precede_sources() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.py", "a");
        write(tmp.path(), "LICENSE", "MIT");
        write(tmp.path(), "docs/guide.md", "guide");
        write(tmp.path(), "CONTRIBUTING.md", "help");
        write(tmp.path(), "README.md", "# Hi");
        write(tmp.path(), "logo.png", "not really a png");

        let paths: Vec<String> =
            assemble_dir(tmp.path(), budget(10, 100)).records.into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["README.md", "CONTRIBUTING.md", "LICENSE", "docs/guide.md", "a.py"]);
    }

    #[test]
    fn assembling_twice_is_identical() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "README.md", "# Same");
        write(tmp.path(), "b/two.go", "package b");
        write(tmp.path(), "a/one.go", "package a");

        let first = assemble_dir(tmp.path(), budget(15, 4000));
        let second = assemble_dir(tmp.path(), budget(15, 4000));
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_skipped_without_backfill() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "README.md", "# Test");
        write(tmp.path(), "z.py", "z");
        std::os::unix::fs::symlink(tmp.path().join("missing-target"), tmp.path().join("broken.py"))
            .unwrap();

        let assembly = assemble_dir(tmp.path(), budget(2, 100));
        let paths: Vec<&str> = assembly.records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["README.md"]);
        assert_eq!(assembly.stats.files_unreadable, 1);
    }

    #[test]
    fn snapshot_entry_points_agree() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "README.md", "# Test");
        let snapshot = RepositorySnapshot::borrowed(tmp.path().to_path_buf(), "HEAD");

        let records = assemble(&snapshot, Budget::prompt());
        assert_eq!(records, assemble_with_stats(&snapshot, Budget::prompt()).records);
        assert_eq!(records.len(), 1);
    }
}
