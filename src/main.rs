//! # Bookshelf CLI (`shelf`)
//!
//! The `shelf` binary browses and searches a CSV book catalog.
//!
//! ## Usage
//!
//! ```bash
//! shelf --config ./config/shelf.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `shelf list` | Print the catalog sorted by a field |
//! | `shelf search <keywords>` | Typo-tolerant search on one field |
//! | `shelf distance <a> <b>` | Edit distance between two words |
//! | `shelf info` | Catalog file, version, record count, settings |
//! | `shelf shell` | Interactive browse/search session |
//! | `shelf completions <shell>` | Generate shell completions |
//!
//! ## Examples
//!
//! ```bash
//! # Browse by author
//! shelf list --sort author
//!
//! # Search titles, tolerating typos
//! shelf search sytem programing
//!
//! # Search another file's publisher column, as JSON
//! shelf --catalog ./other.csv search gramedia --field publisher --format json
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bookshelf::config;
use bookshelf::models::Field;
use bookshelf::output::OutputFormat;
use bookshelf::{browse, info, search, shell, Library};

const DEFAULT_CONFIG: &str = "./config/shelf.toml";

/// Bookshelf CLI — browse and fuzzy-search a library book catalog.
///
/// Settings are read from a TOML file. When the default config file does
/// not exist, built-in defaults are used (catalog `./FP_buku.csv`).
#[derive(Parser)]
#[command(
    name = "shelf",
    about = "Bookshelf — browse and fuzzy-search a library book catalog",
    version,
    long_about = "Bookshelf loads a CSV book catalog and lets you browse it sorted by any \
    field (stable, case-insensitive merge sort) or search it with typo-tolerant token \
    matching based on Levenshtein edit distance."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/shelf.toml`; if that file is absent the
    /// built-in defaults apply.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog CSV file, overriding `catalog.path` from the config.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog sorted by a field.
    ///
    /// Sorting is stable and case-insensitive: books with equal values keep
    /// their order from the catalog file.
    List {
        /// Field to sort by: code, title, author, or publisher.
        /// Defaults to `browse.default_sort` (code).
        #[arg(long, value_parser = parse_field)]
        sort: Option<Field>,

        /// Maximum number of books to print.
        #[arg(long)]
        limit: Option<usize>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Search the catalog, tolerating typos.
    ///
    /// Each keyword is matched against the closest word of the chosen field.
    /// A book matches when the summed edit distance stays within
    /// `tolerance_ratio` × the keyword length (spaces excluded).
    Search {
        /// Search keywords.
        keyword: Vec<String>,

        /// Field to search: code, title, author, or publisher.
        /// Defaults to `search.default_field` (title).
        #[arg(long, value_parser = parse_field)]
        field: Option<Field>,

        /// Maximum number of results to print.
        #[arg(long)]
        limit: Option<usize>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the edit distance between two words.
    Distance { a: String, b: String },

    /// Show catalog file, version, record count, and active settings.
    Info,

    /// Start an interactive browse/search session.
    ///
    /// The catalog is cached for the whole session and re-read only when
    /// the file changes.
    Shell,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

/// Parse a field name for `--sort` / `--field`.
fn parse_field(s: &str) -> Result<Field, String> {
    s.parse::<Field>().map_err(|e| e.to_string())
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,bookshelf=info,bookshelf_core=info",
        1 => "info,bookshelf=debug,bookshelf_core=debug",
        _ => "debug,bookshelf=trace,bookshelf_core=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Commands that don't require a catalog
    match &cli.command {
        Commands::Distance { a, b } => {
            println!("{}", bookshelf_core::distance(a, b));
            return Ok(());
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "shelf", &mut io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let explicit = cli.config.is_some();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut cfg = config::load_or_default(&config_path, explicit)?;
    if let Some(catalog) = cli.catalog.clone() {
        cfg.catalog.path = catalog;
    }
    tracing::debug!(catalog = %cfg.catalog.path.display(), "configuration loaded");

    let mut library = Library::open(cfg);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List {
            sort,
            limit,
            format,
        } => {
            browse::run_list(&mut library, sort, limit, format, &mut out)?;
        }
        Commands::Search {
            keyword,
            field,
            limit,
            format,
        } => {
            let keyword = keyword.join(" ");
            search::run_search(&mut library, &keyword, field, limit, format, &mut out)?;
        }
        Commands::Info => {
            info::run_info(&mut library, &mut out)?;
        }
        Commands::Shell => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            shell::run_shell(&mut library, stdin.lock(), &mut out, interactive)?;
        }
        Commands::Distance { .. } | Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
