//! TOML configuration parsing and validation.
//!
//! Every section and key has a default, so an empty file (or no file at
//! all, see [`load_or_default`]) is a valid configuration pointing at
//! `./FP_buku.csv` with the library's standard column headers.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use bookshelf_core::models::Field;
use bookshelf_core::search::{SearchParams, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_TOLERANCE_RATIO};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub columns: ColumnsConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            columns: ColumnsConfig::default(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("./FP_buku.csv")
}

/// CSV header names for each record field.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ColumnsConfig {
    #[serde(default = "default_code_column")]
    pub code: String,
    #[serde(default = "default_title_column")]
    pub title: String,
    #[serde(default = "default_author_column")]
    pub author: String,
    #[serde(default = "default_publisher_column")]
    pub publisher: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            code: default_code_column(),
            title: default_title_column(),
            author: default_author_column(),
            publisher: default_publisher_column(),
        }
    }
}

impl ColumnsConfig {
    pub fn column(&self, field: Field) -> &str {
        match field {
            Field::Code => &self.code,
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Publisher => &self.publisher,
        }
    }
}

fn default_code_column() -> String {
    "kode_buku".to_string()
}
fn default_title_column() -> String {
    "nama_buku".to_string()
}
fn default_author_column() -> String {
    "penulis_buku".to_string()
}
fn default_publisher_column() -> String {
    "penerbit_buku".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowseConfig {
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
        }
    }
}

fn default_sort() -> String {
    "code".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_search_field")]
    pub default_field: String,
    #[serde(default = "default_tolerance_ratio")]
    pub tolerance_ratio: f64,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_field: default_search_field(),
            tolerance_ratio: default_tolerance_ratio(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

fn default_search_field() -> String {
    "title".to_string()
}
fn default_tolerance_ratio() -> f64 {
    DEFAULT_TOLERANCE_RATIO
}
fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

impl SearchConfig {
    pub fn params(&self) -> SearchParams {
        SearchParams {
            tolerance_ratio: self.tolerance_ratio,
            parallel_threshold: self.parallel_threshold,
        }
    }

    /// Validated in [`load_config`], so parsing cannot fail afterwards.
    pub fn field(&self) -> Result<Field> {
        self.default_field.parse()
    }
}

impl BrowseConfig {
    pub fn sort_field(&self) -> Result<Field> {
        self.default_sort.parse()
    }
}

/// Read and validate a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` if it exists; otherwise fall back to [`Config::default`]
/// unless the caller insisted on this exact file.
pub fn load_or_default(path: &Path, explicit: bool) -> Result<Config> {
    if !explicit && !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    load_config(path)
}

pub fn validate(config: &Config) -> Result<()> {
    // Validate search
    let ratio = config.search.tolerance_ratio;
    if !ratio.is_finite() || ratio < 0.0 {
        bail!("search.tolerance_ratio must be a finite number >= 0.0, got {}", ratio);
    }
    if config.search.parallel_threshold == 0 {
        bail!("search.parallel_threshold must be >= 1");
    }
    config
        .search
        .field()
        .with_context(|| "Invalid search.default_field")?;

    // Validate browse
    config
        .browse
        .sort_field()
        .with_context(|| "Invalid browse.default_sort")?;

    // Validate columns
    let columns = &config.catalog.columns;
    let mut seen: Vec<&str> = Vec::new();
    for field in Field::ALL {
        let name = columns.column(field).trim();
        if name.is_empty() {
            bail!("catalog.columns.{} must not be empty", field);
        }
        if seen.contains(&name) {
            bail!("catalog.columns.{} duplicates another column: '{}'", field, name);
        }
        seen.push(name);
    }

    Ok(())
}
