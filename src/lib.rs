//! # Bookshelf
//!
//! Browse and fuzzy-search a library book catalog.
//!
//! The catalog is a CSV file of book records (code, title, author, and an
//! optional publisher). Bookshelf loads it through a version-aware cache
//! and hands the records to `bookshelf-core`, which provides a stable,
//! case-insensitive field sort and a typo-tolerant token search built on
//! Levenshtein edit distance.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌────────────────────┐
//! │  CSV file  │──▶│ CatalogCache │──▶│  bookshelf-core    │
//! │ (CsvStore) │   │ (id,version) │   │ sort / search      │
//! └────────────┘   └──────────────┘   └─────────┬──────────┘
//!                                               │
//!                          ┌────────────────────┤
//!                          ▼                    ▼
//!                    ┌──────────┐        ┌────────────┐
//!                    │   CLI    │        │   shell    │
//!                    │ (shelf)  │        │ (REPL)     │
//!                    └──────────┘        └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! shelf list --sort title            # browse, sorted by title
//! shelf search "sytem programing"    # typo-tolerant title search
//! shelf search kurose --field author
//! shelf info                         # which file, which version
//! shelf shell                        # interactive session
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`csv_store`] | CSV-file record store with field defaults and version markers |
//! | [`cache`] | Catalog cache keyed by source identity and version marker |
//! | [`library`] | Configured session: store + cache + search parameters |
//! | [`browse`] | Sorted catalog listing |
//! | [`search`] | Fuzzy search entry point and result messages |
//! | [`info`] | Catalog overview |
//! | [`shell`] | Interactive command loop |
//! | [`output`] | Text tables and JSON rendering |

pub mod browse;
pub mod cache;
pub mod config;
pub mod csv_store;
pub mod info;
pub mod library;
pub mod output;
pub mod search;
pub mod shell;

pub use bookshelf_core::{models, store};
pub use library::Library;
