//! Interactive catalog shell.
//!
//! Reads one command per line and answers it against a single [`Library`],
//! so the catalog file is parsed once and re-read only when its version
//! marker changes (or on an explicit `reload`).
//!
//! ```text
//! shelf> list title
//! shelf> search sytem programing
//! shelf> search author:tanenbaum
//! shelf> reload
//! shelf> quit
//! ```

use anyhow::Result;
use std::io::{BufRead, Write};

use bookshelf_core::models::Field;

use crate::browse::run_list;
use crate::library::Library;
use crate::output::OutputFormat;
use crate::search::run_search;

const PROMPT: &str = "shelf> ";

const HELP: &str = "\
Commands:
  list [field]                  browse the catalog sorted by field
  search [field:]<keywords>     fuzzy search (default field from config)
  reload                        re-read the catalog file
  help                          show this help
  quit                          leave the shell
Fields: code, title, author, publisher";

#[derive(Debug, PartialEq)]
enum Command {
    List(Option<Field>),
    Search(Option<Field>, String),
    Reload,
    Help,
    Quit,
    Empty,
}

fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "" => Command::Empty,
        "list" | "ls" => {
            if rest.is_empty() {
                Command::List(None)
            } else {
                Command::List(Some(rest.parse()?))
            }
        }
        "search" | "find" => {
            let (field, keyword) = split_field_prefix(rest)?;
            Command::Search(field, keyword.to_string())
        }
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => anyhow::bail!("Unknown command: '{}'. Type 'help' for commands.", other),
    };
    Ok(command)
}

/// Split an optional `field:` prefix off a search line.
fn split_field_prefix(rest: &str) -> Result<(Option<Field>, &str)> {
    if let Some((prefix, keyword)) = rest.split_once(':') {
        if !prefix.is_empty() && !prefix.contains(char::is_whitespace) {
            return Ok((Some(prefix.parse()?), keyword.trim()));
        }
    }
    Ok((None, rest))
}

/// Run the shell until `quit` or end of input.
pub fn run_shell<R: BufRead, W: Write>(
    library: &mut Library,
    input: R,
    out: &mut W,
    show_prompt: bool,
) -> Result<()> {
    let mut lines = input.lines();
    loop {
        if show_prompt {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let outcome = parse_command(&line).and_then(|command| match command {
            Command::Empty => Ok(true),
            Command::Quit => Ok(false),
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                Ok(true)
            }
            Command::Reload => {
                let catalog = library.reload()?;
                writeln!(out, "Reloaded {} books.", catalog.len())?;
                Ok(true)
            }
            Command::List(field) => {
                run_list(library, field, None, OutputFormat::Text, out)?;
                Ok(true)
            }
            Command::Search(field, keyword) => {
                run_search(library, &keyword, field, None, OutputFormat::Text, out)?;
                Ok(true)
            }
        });

        match outcome {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                tracing::debug!(error = %e, "shell command failed");
                writeln!(out, "error: {:#}", e)?;
            }
        }
    }
    Ok(())
}
