//! Local path validation

use crate::error::AcquisitionError;
use crate::fetch::RepositorySnapshot;
use std::path::{Path, PathBuf};

/// Walk up from `start` looking for a `.git` directory.
///
/// Returns the nearest ancestor holding `.git`, or `start` itself when none exists.
pub fn find_repo_root(start: &Path) -> PathBuf {
    let mut current = start.to_path_buf();
    loop {
        if current.join(".git").exists() {
            if current != start {
                tracing::info!(
                    "Using repository root {} (detected from {})",
                    current.display(),
                    start.display()
                );
            }
            return current;
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }
    tracing::debug!("No .git found; using {} as repository root", start.display());
    start.to_path_buf()
}

/// Use an existing directory as a snapshot. The directory is never deleted.
pub fn validate_local_path(path: &Path, reference: &str) -> Result<RepositorySnapshot, AcquisitionError> {
    let canonical = match path.canonicalize() {
        Ok(p) => p,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(AcquisitionError::NotADirectory { path: path.to_path_buf() });
        }
        Err(err) => return Err(AcquisitionError::Storage(err)),
    };

    if !canonical.is_dir() {
        return Err(AcquisitionError::NotADirectory { path: path.to_path_buf() });
    }

    let root = find_repo_root(&canonical);
    Ok(RepositorySnapshot::borrowed(root, reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_repo_root_returns_ancestor_with_git() {
        let temp = TempDir::new().expect("tmp");
        let root = temp.path();

        fs::create_dir(root.join(".git")).expect("mkdir .git");
        let subdir = root.join("src").join("lib");
        fs::create_dir_all(&subdir).expect("mkdir subdir");

        let found = find_repo_root(&subdir);
        assert_eq!(found, root, "should walk up to the directory containing .git");
    }

    #[test]
    fn find_repo_root_returns_start_when_no_git() {
        let temp = TempDir::new().expect("tmp");
        let dir = temp.path().join("myproject");
        fs::create_dir_all(&dir).expect("mkdir myproject");

        let found = find_repo_root(&dir);
        assert_eq!(found, dir, "should return the input path when no .git is found");
    }

    #[test]
    fn local_snapshot_is_not_temporary() {
        let temp = TempDir::new().expect("tmp");
        let snapshot = validate_local_path(temp.path(), "HEAD").expect("local snapshot");
        assert!(!snapshot.is_temporary());
        drop(snapshot);
        assert!(temp.path().exists());
    }

    #[test]
    fn missing_or_file_paths_are_rejected() {
        let temp = TempDir::new().expect("tmp");
        let missing = validate_local_path(&temp.path().join("absent"), "HEAD").unwrap_err();
        assert!(matches!(missing, AcquisitionError::NotADirectory { .. }));

        let file = temp.path().join("file.txt");
        fs::write(&file, "x").expect("write");
        let not_dir = validate_local_path(&file, "HEAD").unwrap_err();
        assert!(matches!(not_dir, AcquisitionError::NotADirectory { .. }));
    }
}
