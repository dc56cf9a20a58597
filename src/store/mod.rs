//! Injected digest cache.
//!
//! Callers own the store and pass it to the pipeline explicitly; nothing here is
//! process-global.

use crate::domain::{Assembly, Budget};
use crate::error::StoreError;
use crate::utils::stable_key;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Identity of one assembled digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestKey {
    pub url: String,
    pub reference: String,
    pub budget: Budget,
}

impl DigestKey {
    pub fn new(url: &str, reference: &str, budget: Budget) -> Self {
        Self { url: url.trim().to_string(), reference: reference.trim().to_string(), budget }
    }

    /// SHA-256 hex of url, reference and both budget limits.
    pub fn id(&self) -> String {
        let max_files = self.budget.max_files.to_string();
        let max_bytes = self.budget.max_bytes_per_file.to_string();
        stable_key(&[&self.url, &self.reference, &max_files, &max_bytes])
    }
}

/// Key-value storage for assembled digests.
pub trait DigestStore {
    fn get(&self, key: &DigestKey) -> Result<Option<Assembly>, StoreError>;

    fn put(&self, key: &DigestKey, assembly: &Assembly) -> Result<(), StoreError>;

    /// Returns whether an entry existed.
    fn remove(&self, key: &DigestKey) -> Result<bool, StoreError>;
}
