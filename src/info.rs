//! Catalog overview.
//!
//! Prints where the catalog lives, which version is loaded, how many records
//! it holds, and the active column mapping and search settings. Used by
//! `shelf info` to confirm a config points at the right file before
//! browsing or searching.

use anyhow::Result;
use std::io::Write;

use bookshelf_core::models::Field;
use bookshelf_core::store::{RecordStore, VersionMarker};

use crate::library::Library;

/// Run the info command: load the catalog and print a summary.
pub fn run_info<W: Write>(library: &mut Library, out: &mut W) -> Result<()> {
    let version = library.store().version()?;
    let catalog = library.catalog()?;
    let missing_publishers = catalog.iter().filter(|b| b.publisher == "-").count();

    writeln!(out, "Bookshelf — Catalog Info")?;
    writeln!(out, "========================")?;
    writeln!(out)?;
    writeln!(out, "  Catalog:     {}", library.store().path().display())?;
    if let VersionMarker::File { modified_ns, len } = version {
        writeln!(out, "  Modified:    {}", format_ns_iso(modified_ns))?;
        writeln!(out, "  Size:        {}", format_bytes(len))?;
    }
    writeln!(out, "  Version:     {}", version)?;
    writeln!(out)?;
    writeln!(out, "  Records:     {}", catalog.len())?;
    writeln!(out, "  Publisher \"-\": {}", missing_publishers)?;
    writeln!(out)?;

    writeln!(out, "  {:<12} COLUMN", "FIELD")?;
    let columns = library.store().columns();
    for field in Field::ALL {
        writeln!(out, "  {:<12} {}", field, columns.column(field))?;
    }
    writeln!(out)?;

    let search = &library.config().search;
    writeln!(out, "  Default sort:     {}", library.config().browse.default_sort)?;
    writeln!(out, "  Search field:     {}", search.default_field)?;
    writeln!(out, "  Tolerance ratio:  {:.2}", search.tolerance_ratio)?;

    Ok(())
}

/// Format nanoseconds since the Unix epoch as ISO 8601.
fn format_ns_iso(ns: i128) -> String {
    let secs = ns.div_euclid(1_000_000_000) as i64;
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| secs.to_string())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
