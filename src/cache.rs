//! Catalog cache keyed by source identity and version marker.
//!
//! The cache holds one immutable catalog snapshot per [`RecordStore::source_id`].
//! On every [`CatalogCache::get_or_load`] it asks the store for its current
//! [`VersionMarker`] and reloads only when the marker differs from the one
//! recorded with the snapshot. Snapshots are shared as `Arc<[BookRecord]>`
//! so a caller can keep using an old version while the cache moves on.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use bookshelf_core::models::BookRecord;
use bookshelf_core::store::{RecordStore, VersionMarker};

struct CachedCatalog {
    version: VersionMarker,
    records: Arc<[BookRecord]>,
}

/// Caller-owned cache of loaded catalogs.
#[derive(Default)]
pub struct CatalogCache {
    entries: HashMap<String, CachedCatalog>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the catalog for `store`, loading it if absent or stale.
    ///
    /// Store errors (missing file, malformed data) are returned unchanged and
    /// leave any previous snapshot in place.
    pub fn get_or_load<S: RecordStore + ?Sized>(&mut self, store: &S) -> Result<Arc<[BookRecord]>> {
        let source = store.source_id();
        let current = store.version()?;

        if let Some(entry) = self.entries.get(source) {
            if entry.version == current {
                debug!(source, version = %current, "catalog cache hit");
                return Ok(Arc::clone(&entry.records));
            }
            debug!(
                source,
                cached = %entry.version,
                current = %current,
                "catalog changed, reloading"
            );
        }

        let records: Arc<[BookRecord]> = store.load()?.into();
        self.entries.insert(
            source.to_string(),
            CachedCatalog {
                version: current,
                records: Arc::clone(&records),
            },
        );
        Ok(records)
    }

    /// Version recorded with the cached snapshot for `source_id`, if any.
    pub fn cached_version(&self, source_id: &str) -> Option<VersionMarker> {
        self.entries.get(source_id).map(|e| e.version)
    }

    /// Drop the snapshot for `source_id`. Returns whether one existed.
    pub fn invalidate(&mut self, source_id: &str) -> bool {
        self.entries.remove(source_id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::store::memory::InMemoryStore;

    fn book(code: &str) -> BookRecord {
        BookRecord::new(code, "Title", "Author", None)
    }

    #[test]
    fn test_unchanged_source_is_not_reloaded() {
        let store = InMemoryStore::new("mem", vec![book("B1")]);
        let mut cache = CatalogCache::new();

        let first = cache.get_or_load(&store).unwrap();
        let second = cache.get_or_load(&store).unwrap();
        assert_eq!(store.load_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_changed_version_reloads() {
        let store = InMemoryStore::new("mem", vec![book("B1")]);
        let mut cache = CatalogCache::new();

        let old = cache.get_or_load(&store).unwrap();
        store.replace(vec![book("B1"), book("B2")]).unwrap();
        let new = cache.get_or_load(&store).unwrap();

        assert_eq!(store.load_count(), 2);
        assert_eq!(old.len(), 1);
        assert_eq!(new.len(), 2);
        assert_eq!(cache.cached_version("mem"), Some(store.version().unwrap()));
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let store = InMemoryStore::new("mem", vec![book("B1")]);
        let mut cache = CatalogCache::new();

        cache.get_or_load(&store).unwrap();
        assert!(cache.invalidate("mem"));
        assert!(!cache.invalidate("mem"));
        cache.get_or_load(&store).unwrap();
        assert_eq!(store.load_count(), 2);
    }

    #[test]
    fn test_sources_are_independent() {
        let a = InMemoryStore::new("a", vec![book("A1")]);
        let b = InMemoryStore::new("b", vec![book("B1"), book("B2")]);
        let mut cache = CatalogCache::new();

        assert_eq!(cache.get_or_load(&a).unwrap().len(), 1);
        assert_eq!(cache.get_or_load(&b).unwrap().len(), 2);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
