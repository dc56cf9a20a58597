//! Repository acquisition (remote clone or local directory) and snapshot lifetime

use crate::error::AcquisitionError;
use std::path::Path;

pub mod local;
pub mod remote;
pub mod snapshot;

pub use snapshot::RepositorySnapshot;

/// Where a snapshot comes from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Remote(&'a str),
    Local(&'a Path),
}

/// Obtain a snapshot of `source` at `reference`.
///
/// - [`Source::Remote`] → [`remote::clone_repository`] into a temporary directory
/// - [`Source::Local`] → [`local::validate_local_path`]; the reference is recorded
///   but the working tree is used as-is
pub fn acquire(source: Source<'_>, reference: &str) -> Result<RepositorySnapshot, AcquisitionError> {
    match source {
        Source::Remote(url) => remote::clone_repository(url, reference),
        Source::Local(path) => local::validate_local_path(path, reference),
    }
}

/// Run `f` against a snapshot of `source`, then release the snapshot.
///
/// Release also happens if `f` panics. Only acquisition errors are returned.
pub fn with_snapshot<T, F>(source: Source<'_>, reference: &str, f: F) -> Result<T, AcquisitionError>
where
    F: FnOnce(&RepositorySnapshot) -> T,
{
    let snapshot = acquire(source, reference)?;
    let out = f(&snapshot);
    snapshot.release();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn with_snapshot_runs_closure_on_local_tree() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "# Test").unwrap();

        let seen = with_snapshot(Source::Local(temp.path()), "HEAD", |snapshot| {
            snapshot.root().join("README.md").exists()
        })
        .unwrap();
        assert!(seen);
    }

    #[test]
    fn with_snapshot_surfaces_acquisition_errors() {
        let result = with_snapshot(Source::Remote("nope"), "main", |_| ());
        assert!(matches!(result, Err(AcquisitionError::InvalidUrl { .. })));
    }
}
