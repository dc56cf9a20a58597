//! Snapshot ownership and guaranteed cleanup

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix for temporary snapshot directories.
pub const SNAPSHOT_PREFIX: &str = "repo-digest-";

enum Storage {
    /// Owned temp directory, removed on release or drop.
    Temporary(Option<TempDir>),
    /// Caller-owned directory, never removed.
    Borrowed,
}

/// A local copy of one repository reference.
///
/// A temporary snapshot deletes its directory when released or dropped, including
/// during unwinding. Removal errors are logged and swallowed.
pub struct RepositorySnapshot {
    root_path: PathBuf,
    source_url: String,
    reference: String,
    storage: Storage,
}

impl RepositorySnapshot {
    /// Allocate an empty, uniquely named temporary snapshot directory.
    pub fn allocate(source_url: &str, reference: &str) -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(SNAPSHOT_PREFIX).tempdir()?;
        tracing::debug!(path = %dir.path().display(), "allocated snapshot directory");
        Ok(Self {
            root_path: dir.path().to_path_buf(),
            source_url: source_url.to_string(),
            reference: reference.to_string(),
            storage: Storage::Temporary(Some(dir)),
        })
    }

    /// Wrap an existing directory without taking ownership of it.
    pub fn borrowed(root_path: PathBuf, reference: &str) -> Self {
        let source_url = root_path.display().to_string();
        Self { root_path, source_url, reference: reference.to_string(), storage: Storage::Borrowed }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self.storage, Storage::Temporary(_))
    }

    /// Remove the snapshot now instead of waiting for drop.
    pub fn release(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        let Storage::Temporary(slot) = &mut self.storage else {
            return;
        };
        let Some(dir) = slot.take() else {
            return;
        };
        let path = dir.path().to_path_buf();
        match dir.close() {
            Ok(()) => tracing::debug!(path = %path.display(), "removed snapshot directory"),
            Err(err) => tracing::warn!("Failed to remove snapshot {}: {}", path.display(), err),
        }
    }
}

impl Drop for RepositorySnapshot {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl std::fmt::Debug for RepositorySnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositorySnapshot")
            .field("root_path", &self.root_path)
            .field("source_url", &self.source_url)
            .field("reference", &self.reference)
            .field("temporary", &self.is_temporary())
            .finish()
    }
}
