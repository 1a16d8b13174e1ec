//! # Bookshelf Core
//!
//! Pure catalog logic for Bookshelf: book record models, the shared text
//! rules, a stable field sort, Levenshtein edit distance, and the tokenized
//! fuzzy matcher with its ranking stage.
//!
//! This crate does no file I/O and owns no caches. The calling application
//! supplies records through the [`store::RecordStore`] trait (or directly as
//! a slice) and receives back new collections; inputs are never mutated.
//!
//! ```rust
//! use bookshelf_core::models::{BookRecord, Field};
//! use bookshelf_core::{search, sort};
//!
//! let catalog = vec![
//!     BookRecord::new("B1", "Sistem Operasi", "Tanenbaum", None),
//!     BookRecord::new("B2", "Jaringan Komputer", "Kurose", Some("Pearson")),
//! ];
//!
//! let by_title = sort::sort(&catalog, Field::Title);
//! assert_eq!(by_title[0].code, "B2");
//!
//! let hits = search::search("sytem", &catalog, Field::Title);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].score, 2.0);
//! ```

pub mod distance;
pub mod models;
pub mod search;
pub mod sort;
pub mod store;
pub mod text;

pub use distance::distance;
pub use models::{BookRecord, Field, MatchResult};
pub use search::{rank, search, search_with, SearchParams};
pub use store::{RecordStore, VersionMarker};
