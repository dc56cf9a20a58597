//! repo-digest: turn a git repository into a bounded, prioritized text digest
//!
//! The pipeline clones a repository reference into a temporary snapshot,
//! classifies every file by path, and assembles the highest-priority files
//! under a file-count and per-file byte budget. The snapshot is removed on
//! every exit path.

pub mod assemble;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod rank;
pub mod render;
pub mod scan;
pub mod store;
pub mod utils;

pub use assemble::{assemble, assemble_dir, assemble_with_stats};
pub use domain::{Assembly, Budget, CandidateFile, Config, ContextRecord, FileClass, SortKey};
pub use error::{AcquisitionError, FailureDomain};
pub use fetch::{acquire, with_snapshot, RepositorySnapshot, Source};
pub use pipeline::{digest_repository, Digest};
pub use rank::classify;
