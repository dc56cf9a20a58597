//! Acquire → assemble → release, with an optional injected cache.

use crate::assemble::assemble_with_stats;
use crate::domain::{Assembly, Budget};
use crate::error::AcquisitionError;
use crate::fetch::{with_snapshot, Source};
use crate::store::{DigestKey, DigestStore};
use tracing::{info, warn};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub assembly: Assembly,
    /// `true` when the assembly came from the store instead of a fresh clone.
    pub cached: bool,
}

/// Run the full pipeline for `source` at `reference`.
///
/// Remote sources consult `store` first and populate it afterwards; local
/// directories always assemble fresh because their contents can change. Store
/// failures are logged and the run proceeds uncached.
pub fn digest_repository(
    source: Source<'_>,
    reference: &str,
    budget: Budget,
    store: Option<&dyn DigestStore>,
) -> Result<Digest, AcquisitionError> {
    let cache = match (source, store) {
        (Source::Remote(url), Some(store)) => Some((store, DigestKey::new(url, reference, budget))),
        _ => None,
    };

    if let Some((store, key)) = &cache {
        match store.get(key) {
            Ok(Some(assembly)) => {
                info!(url = %key.url, reference = %key.reference, "digest served from cache");
                return Ok(Digest { assembly, cached: true });
            }
            Ok(None) => {}
            Err(err) => warn!("Digest cache lookup failed: {}", err),
        }
    }

    let assembly = with_snapshot(source, reference, |snapshot| {
        info!(root = %snapshot.root().display(), "assembling snapshot");
        assemble_with_stats(snapshot, budget)
    })?;

    if let Some((store, key)) = &cache {
        if let Err(err) = store.put(key, &assembly) {
            warn!("Failed to cache digest: {}", err);
        }
    }

    Ok(Digest { assembly, cached: false })
}
