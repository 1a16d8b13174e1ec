//! Catalog browsing: the sorted book list.

use anyhow::Result;
use std::io::Write;

use bookshelf_core::models::Field;

use crate::library::Library;
use crate::output::{self, OutputFormat};

/// CLI entry point: sorts the catalog and prints it.
pub fn run_list<W: Write>(
    library: &mut Library,
    field: Option<Field>,
    limit: Option<usize>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let (field, mut books) = library.list(field)?;
    let total = books.len();
    if let Some(limit) = limit {
        books.truncate(limit);
    }

    match format {
        OutputFormat::Json => output::write_json(out, &books)?,
        OutputFormat::Text => {
            if total == 0 {
                writeln!(out, "The catalog is empty.")?;
                return Ok(());
            }
            if books.len() < total {
                writeln!(
                    out,
                    "Showing {} of {} books sorted by {}.",
                    books.len(),
                    total,
                    field
                )?;
            } else {
                writeln!(out, "Showing {} books sorted by {}.", total, field)?;
            }
            writeln!(out)?;
            output::write_books(out, &books)?;
        }
    }

    Ok(())
}
