//! Atomic swap point for the current catalog generation.

use std::sync::Arc;

use log::info;
use parking_lot::RwLock;

use crate::catalog::cache::{CacheInfo, CatalogCache};
use crate::catalog::entry::{CatalogEntry, ProductRecord};

/// Shared handle to the current [`CatalogCache`] generation.
///
/// Readers call [`current`](CatalogHandle::current) and keep the returned
/// `Arc` for the duration of one resolution call; they always observe one
/// fully consistent generation. Refreshing builds the next generation outside
/// the lock and swaps the reference under a short write lock, so readers
/// never block on a rebuild.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<CatalogCache>>,
}

impl CatalogHandle {
    /// Create a handle serving the given generation.
    pub fn new(cache: CatalogCache) -> Self {
        CatalogHandle {
            current: RwLock::new(Arc::new(cache)),
        }
    }

    /// Get the current generation.
    pub fn current(&self) -> Arc<CatalogCache> {
        Arc::clone(&self.current.read())
    }

    /// Rebuild the index from fresh snapshots and swap it in.
    ///
    /// The heavy build runs outside the lock; the version is assigned under
    /// the write lock so it stays monotonic even with concurrent refreshes.
    /// Returns the new generation's statistics.
    pub fn refresh(&self, entries: Vec<CatalogEntry>, records: &[ProductRecord]) -> CacheInfo {
        let next = CatalogCache::from_snapshot(entries, records);

        let info = {
            let mut guard = self.current.write();
            let next = Arc::new(next.with_version(guard.version() + 1));
            let info = next.info();
            *guard = next;
            info
        };

        info!(
            "Catalog cache refreshed: {} entries, {} synonyms, version {}",
            info.total_entries, info.total_synonyms, info.version
        );

        info
    }

    /// Statistics for the current generation.
    pub fn info(&self) -> CacheInfo {
        self.current().info()
    }
}

impl Default for CatalogHandle {
    fn default() -> Self {
        Self::new(CatalogCache::default())
    }
}
