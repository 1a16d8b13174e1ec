//! In-memory [`RecordStore`] implementation for tests and embedders.
//!
//! Records live in a `Vec` behind `std::sync::RwLock`. Every call to
//! [`InMemoryStore::replace`] bumps a generation counter, which is the
//! store's [`VersionMarker`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use anyhow::{anyhow, Result};

use crate::models::BookRecord;

use super::{RecordStore, VersionMarker};

/// In-memory record source.
pub struct InMemoryStore {
    id: String,
    records: RwLock<Vec<BookRecord>>,
    generation: AtomicU64,
    loads: AtomicU64,
}

impl InMemoryStore {
    pub fn new(id: impl Into<String>, records: Vec<BookRecord>) -> Self {
        Self {
            id: id.into(),
            records: RwLock::new(records),
            generation: AtomicU64::new(0),
            loads: AtomicU64::new(0),
        }
    }

    /// Swap in a new set of records and advance the version.
    pub fn replace(&self, records: Vec<BookRecord>) -> Result<()> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        *guard = records;
        self.generation.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Number of times [`RecordStore::load`] has been called.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::SeqCst)
    }
}

impl RecordStore for InMemoryStore {
    fn source_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> Result<VersionMarker> {
        Ok(VersionMarker::Generation(
            self.generation.load(Ordering::SeqCst),
        ))
    }

    fn load(&self) -> Result<Vec<BookRecord>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let guard = self
            .records
            .read()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        Ok(guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(code: &str) -> BookRecord {
        BookRecord::new(code, "Title", "Author", None)
    }

    #[test]
    fn test_load_preserves_order() {
        let store = InMemoryStore::new("mem", vec![book("B2"), book("B1")]);
        let loaded = store.load().unwrap();
        assert_eq!(loaded[0].code, "B2");
        assert_eq!(loaded[1].code, "B1");
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn test_replace_bumps_version() {
        let store = InMemoryStore::new("mem", vec![book("B1")]);
        let v0 = store.version().unwrap();
        assert_eq!(store.version().unwrap(), v0);

        store.replace(vec![book("B9")]).unwrap();
        let v1 = store.version().unwrap();
        assert_ne!(v0, v1);
        assert_eq!(store.load().unwrap()[0].code, "B9");
    }

    #[test]
    fn test_version_display() {
        assert_eq!(VersionMarker::Generation(3).to_string(), "generation=3");
        let file = VersionMarker::File {
            modified_ns: 10,
            len: 42,
        };
        assert_eq!(file.to_string(), "mtime=10ns size=42B");
    }
}
