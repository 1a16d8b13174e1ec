//! A configured catalog session: the CSV store, its cache, and the search
//! parameters, bundled so every front-end (one-shot commands, the
//! interactive shell) goes through the same load → sort/search path.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use bookshelf_core::models::{BookRecord, Field, MatchResult};
use bookshelf_core::search::{search_with, SearchParams};
use bookshelf_core::sort::sort;
use bookshelf_core::store::RecordStore;

use crate::cache::CatalogCache;
use crate::config::Config;
use crate::csv_store::CsvStore;

pub struct Library {
    config: Config,
    store: CsvStore,
    cache: CatalogCache,
}

impl Library {
    pub fn open(config: Config) -> Self {
        let store = CsvStore::from_config(&config);
        Self {
            config,
            store,
            cache: CatalogCache::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &CsvStore {
        &self.store
    }

    pub fn params(&self) -> SearchParams {
        self.config.search.params()
    }

    /// Current catalog snapshot, re-read only if the file changed.
    pub fn catalog(&mut self) -> Result<Arc<[BookRecord]>> {
        self.cache.get_or_load(&self.store)
    }

    /// Drop the cached snapshot so the next access re-reads the file.
    pub fn reload(&mut self) -> Result<Arc<[BookRecord]>> {
        self.cache.invalidate(self.store.source_id());
        let catalog = self.catalog()?;
        info!(records = catalog.len(), "catalog reloaded");
        Ok(catalog)
    }

    /// The catalog ordered by `field`, or by `browse.default_sort`.
    pub fn list(&mut self, field: Option<Field>) -> Result<(Field, Vec<BookRecord>)> {
        let field = match field {
            Some(f) => f,
            None => self.config.browse.sort_field()?,
        };
        let catalog = self.catalog()?;
        Ok((field, sort(&catalog, field)))
    }

    /// Ranked fuzzy matches of `keyword` on `field`, or on `search.default_field`.
    pub fn search(
        &mut self,
        keyword: &str,
        field: Option<Field>,
    ) -> Result<(Field, Vec<MatchResult>)> {
        let field = match field {
            Some(f) => f,
            None => self.config.search.field()?,
        };
        let params = self.params();
        let catalog = self.catalog()?;
        Ok((field, search_with(keyword, &catalog, field, &params)))
    }
}
