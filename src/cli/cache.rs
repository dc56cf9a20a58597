//! Digest cache location and maintenance.

use crate::store::SqliteStore;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// `$XDG_CACHE_HOME/repo-digest/digests.sqlite`, or `None` without a cache root.
pub fn digest_cache_db_path() -> Option<PathBuf> {
    let cache_base = cache_root_dir()?;
    Some(cache_base.join("repo-digest").join("digests.sqlite"))
}

pub fn cache_root_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("LOCALAPPDATA").map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache"))
    }
}

pub fn open_digest_cache(ttl: Duration) -> Result<SqliteStore> {
    let path = digest_cache_db_path().context("No cache directory available (set XDG_CACHE_HOME)")?;
    let store = SqliteStore::open(&path)
        .with_context(|| format!("Failed to open digest cache: {}", path.display()))?;
    Ok(store.with_ttl(Some(ttl)))
}

pub fn clear() -> Result<()> {
    let Some(path) = digest_cache_db_path() else {
        println!("No cache directory configured");
        return Ok(());
    };
    if !path.exists() {
        println!("Cache is empty");
        return Ok(());
    }
    let store = SqliteStore::open(&path)
        .with_context(|| format!("Failed to open digest cache: {}", path.display()))?;
    let removed = store.clear().context("Failed to clear digest cache")?;
    println!("Removed {} cached digest(s) from {}", removed, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_ends_with_database_name() {
        if let Some(path) = digest_cache_db_path() {
            assert!(path.ends_with("repo-digest/digests.sqlite"));
        }
    }
}
