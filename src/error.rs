//! Error taxonomy for the digest pipeline.
//!
//! Only [`AcquisitionError`] escalates to callers. Read and cleanup failures are
//! logged where they happen and never returned.

use std::path::PathBuf;
use thiserror::Error;

/// Which side of the fence a failure sits on, for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureDomain {
    /// The repository is unreachable, private, or the request named something that does not exist.
    Repository,
    /// Local tooling failed (disk, libgit2 internals).
    Tool,
}

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("unsupported repository URL: {url}")]
    InvalidUrl { url: String },

    #[error("repository unreachable: {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: git2::Error,
    },

    #[error("reference '{reference}' not found in {url}")]
    ReferenceNotFound { url: String, reference: String },

    #[error("authentication required for {url}")]
    AuthenticationRequired {
        url: String,
        #[source]
        source: git2::Error,
    },

    #[error("local path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("snapshot storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

impl AcquisitionError {
    pub fn domain(&self) -> FailureDomain {
        match self {
            AcquisitionError::InvalidUrl { .. }
            | AcquisitionError::Unreachable { .. }
            | AcquisitionError::ReferenceNotFound { .. }
            | AcquisitionError::AuthenticationRequired { .. }
            | AcquisitionError::NotADirectory { .. } => FailureDomain::Repository,
            AcquisitionError::Storage(_) | AcquisitionError::Git(_) => FailureDomain::Tool,
        }
    }

    /// Short actionable hint shown next to the error.
    pub fn hint(&self) -> &'static str {
        match self {
            AcquisitionError::InvalidUrl { .. } => {
                "use an https://, ssh://, git://, file:// or user@host:path repository address"
            }
            AcquisitionError::Unreachable { .. } => {
                "check the URL and your network connection"
            }
            AcquisitionError::ReferenceNotFound { .. } => {
                "pass an existing branch, tag or commit with --ref"
            }
            AcquisitionError::AuthenticationRequired { .. } => {
                "the repository is private or requires credentials"
            }
            AcquisitionError::NotADirectory { .. } => "pass an existing directory with --path",
            AcquisitionError::Storage(_) => "check free space and permissions of the temp directory",
            AcquisitionError::Git(_) => "this is a local git tooling failure; retry with --verbose",
        }
    }
}

/// A single file that could not be read during assembly.
#[derive(Debug, Error)]
#[error("failed to read {}: {source}", path.display())]
pub struct ReadFailure {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported store schema version {found}; expected {expected}")]
    SchemaVersion { found: i64, expected: i64 },

    #[error("store lock poisoned")]
    Poisoned,
}
