//! Plain-text tables and JSON rendering for CLI output.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use bookshelf_core::models::{BookRecord, MatchResult};

/// Output format for `list` and `search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_books<W: Write>(out: &mut W, books: &[BookRecord]) -> Result<()> {
    let rows: Vec<[String; 4]> = books
        .iter()
        .map(|b| {
            [
                b.code.clone(),
                b.title.clone(),
                b.author.clone(),
                b.publisher.clone(),
            ]
        })
        .collect();
    write_table(out, &["CODE", "TITLE", "AUTHOR", "PUBLISHER"], &rows)
}

pub fn write_matches<W: Write>(out: &mut W, matches: &[MatchResult]) -> Result<()> {
    let rows: Vec<[String; 5]> = matches
        .iter()
        .map(|m| {
            [
                m.code.clone(),
                m.title.clone(),
                m.author.clone(),
                m.publisher.clone(),
                format_score(m.score),
            ]
        })
        .collect();
    write_table(out, &["CODE", "TITLE", "AUTHOR", "PUBLISHER", "SCORE"], &rows)
}

/// Scores are integral sums of edit distances; print them without decimals.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.2}", score)
    }
}

fn write_table<W: Write, const N: usize>(
    out: &mut W,
    headers: &[&str; N],
    rows: &[[String; N]],
) -> Result<()> {
    let mut widths = [0usize; N];
    for (w, h) in widths.iter_mut().zip(headers.iter()) {
        *w = h.chars().count();
    }
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header_cells: Vec<&str> = headers.to_vec();
    write_row(out, &header_cells, &widths)?;
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        write_row(out, &cells, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[&str], widths: &[usize]) -> Result<()> {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            line.push_str(cell);
        } else {
            line.push_str(&format!("{:<width$}  ", cell, width = width));
        }
    }
    writeln!(out, "{}", line)?;
    Ok(())
}
