//! In-process digest store

use super::{DigestKey, DigestStore};
use crate::domain::Assembly;
use crate::error::StoreError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Map-backed store; share it across threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Assembly>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DigestStore for MemoryStore {
    fn get(&self, key: &DigestKey) -> Result<Option<Assembly>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(&key.id()).cloned())
    }

    fn put(&self, key: &DigestKey, assembly: &Assembly) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.id(), assembly.clone());
        Ok(())
    }

    fn remove(&self, key: &DigestKey) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.remove(&key.id()).is_some())
    }
}
