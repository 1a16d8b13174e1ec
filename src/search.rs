//! Fuzzy search over the catalog.
//!
//! This module provides the application-level entry point for search. The
//! matcher and ranking live in `bookshelf-core::search` and operate on an
//! in-memory slice; this wrapper handles catalog loading, the empty-keyword
//! prompt, and output formatting.

use anyhow::Result;
use std::io::Write;

use bookshelf_core::models::{Field, MatchResult};

use crate::library::Library;
use crate::output::{self, OutputFormat};

pub const EMPTY_KEYWORD_PROMPT: &str = "Please enter a search keyword.";
pub const NO_RESULTS: &str = "No matching books found.";
pub const NO_RESULTS_TIP: &str =
    "Tip: try fewer keywords or check the spelling; small typos are tolerated.";

/// CLI entry point: runs the search and prints ranked results.
pub fn run_search<W: Write>(
    library: &mut Library,
    keyword: &str,
    field: Option<Field>,
    limit: Option<usize>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    // An empty keyword is a prompt, not a search; don't touch the catalog.
    if keyword.trim().is_empty() {
        match format {
            OutputFormat::Json => output::write_json(out, &Vec::<MatchResult>::new())?,
            OutputFormat::Text => writeln!(out, "{}", EMPTY_KEYWORD_PROMPT)?,
        }
        return Ok(());
    }

    let (field, mut results) = library.search(keyword, field)?;
    let total = results.len();
    if let Some(limit) = limit {
        results.truncate(limit);
    }

    match format {
        OutputFormat::Json => output::write_json(out, &results)?,
        OutputFormat::Text => {
            if total == 0 {
                writeln!(out, "{}", NO_RESULTS)?;
                writeln!(out, "{}", NO_RESULTS_TIP)?;
                return Ok(());
            }
            let noun = if total == 1 { "book" } else { "books" };
            writeln!(out, "Found {} matching {} in {}.", total, noun, field)?;
            writeln!(out)?;
            output::write_matches(out, &results)?;
        }
    }

    Ok(())
}
