//! SQLite-backed digest store.

use super::{DigestKey, DigestStore};
use crate::domain::{Assembly, DEFAULT_CACHE_TTL_SECS};
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;

pub const SCHEMA_VERSION: i64 = 1;

/// Digest cache persisted in SQLite.
///
/// Entries older than the TTL read as misses and are deleted on lookup.
pub struct SqliteStore {
    conn: Connection,
    ttl: Option<Duration>,
}

impl SqliteStore {
    /// Open or create the database at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        ensure_schema(&conn)?;
        Ok(Self { conn, ttl: Some(Duration::from_secs(DEFAULT_CACHE_TTL_SECS)) })
    }

    /// Replace the entry lifetime. `None` keeps entries forever.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    fn is_expired(&self, created_at: &str) -> bool {
        let Some(ttl) = self.ttl else {
            return false;
        };
        let Ok(created) = DateTime::parse_from_rfc3339(created_at) else {
            return true;
        };
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return false;
        };
        Utc::now().signed_duration_since(created.with_timezone(&Utc)) > ttl
    }

    /// Delete every cached digest. Returns the number of rows removed.
    pub fn clear(&self) -> Result<usize, StoreError> {
        Ok(self.conn.execute("DELETE FROM digests", [])?)
    }
}

fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS digests (
            key TEXT PRIMARY KEY,
            url TEXT NOT NULL,
            reference TEXT NOT NULL,
            assembly_json TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        ",
    )?;

    let current: Option<i64> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| row.get(0))
        .optional()?;
    match current {
        None => {
            conn.execute("INSERT INTO schema_version(version) VALUES(?1)", [SCHEMA_VERSION])?;
        }
        Some(version) if version == SCHEMA_VERSION => {}
        Some(found) => {
            return Err(StoreError::SchemaVersion { found, expected: SCHEMA_VERSION });
        }
    }
    Ok(())
}

impl DigestStore for SqliteStore {
    fn get(&self, key: &DigestKey) -> Result<Option<Assembly>, StoreError> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT assembly_json, created_at FROM digests WHERE key = ?1",
                [key.id()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((json, created_at)) = row else {
            return Ok(None);
        };
        if self.is_expired(&created_at) {
            tracing::debug!(url = %key.url, reference = %key.reference, %created_at, "cached digest expired");
            self.remove(key)?;
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn put(&self, key: &DigestKey, assembly: &Assembly) -> Result<(), StoreError> {
        let json = serde_json::to_string(assembly)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO digests(key, url, reference, assembly_json, created_at) VALUES(?1, ?2, ?3, ?4, ?5)",
            params![key.id(), key.url, key.reference, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &DigestKey) -> Result<bool, StoreError> {
        let removed = self.conn.execute("DELETE FROM digests WHERE key = ?1", [key.id()])?;
        Ok(removed > 0)
    }
}
