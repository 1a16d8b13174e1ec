//! Record source abstraction.
//!
//! The [`RecordStore`] trait is the seam between the pure catalog logic and
//! whatever supplies records (a CSV file, an in-memory list, a future
//! database). A store identifies itself with a stable [`source_id`] and
//! reports a [`VersionMarker`] for its current contents; callers compare
//! markers to decide whether a previously loaded catalog is still valid.
//!
//! The core never loads, caches, or invalidates on its own.
//!
//! [`source_id`]: RecordStore::source_id

pub mod memory;

use std::fmt;

use anyhow::Result;
use serde::Serialize;

use crate::models::BookRecord;

/// Identity of one version of a record source.
///
/// Two markers from the same source compare equal exactly when the source
/// is considered unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionMarker {
    /// File-backed source: modification time and size.
    File {
        /// Modification time in nanoseconds since the Unix epoch.
        modified_ns: i128,
        /// File length in bytes.
        len: u64,
    },
    /// Monotonic counter bumped on every replacement of an in-memory source.
    Generation(u64),
}

impl fmt::Display for VersionMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionMarker::File { modified_ns, len } => {
                write!(f, "mtime={}ns size={}B", modified_ns, len)
            }
            VersionMarker::Generation(n) => write!(f, "generation={}", n),
        }
    }
}

/// Abstract source of book records.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`source_id`](RecordStore::source_id) | Stable identity of the source, used as a cache key |
/// | [`version`](RecordStore::version) | Cheap check of the current contents' version |
/// | [`load`](RecordStore::load) | Read every record, in source order |
///
/// Failures (source missing, unreadable, malformed) are returned as errors
/// and surfaced unchanged by callers.
pub trait RecordStore: Send + Sync {
    /// Stable identity of this source.
    fn source_id(&self) -> &str;

    /// Version marker of the source's current contents.
    fn version(&self) -> Result<VersionMarker>;

    /// Load all records in source order. Optional fields are already
    /// defaulted (publisher `"-"`, others empty).
    fn load(&self) -> Result<Vec<BookRecord>>;
}
