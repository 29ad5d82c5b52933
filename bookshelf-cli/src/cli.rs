//! Command-line interface definition.
//!
//! Parsing only; `main.rs` turns the parsed arguments into library
//! configurations and runs them. The same module is compiled into the build
//! script to render the man page.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use bookshelf::config::{CompressionLevel, ConsolidateConfig, ListConfig, SortField};
use bookshelf::error::{BookshelfError, Result};
use bookshelf::ordering::OrderingStrategy;

/// Consolidate scattered PDF files into an ordered bookshelf.
///
/// Root-level PDFs of the source are copied as they are. Every subdirectory
/// is treated as one book: its parts are put into reading order according to
/// the publisher's naming convention and merged into a single PDF.
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version)]
#[command(about = "Consolidate scattered PDF files into an ordered bookshelf", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Show detailed progress and decisions
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy single PDFs and merge every subdirectory into one book
    Consolidate(ConsolidateArgs),

    /// List the books on a shelf
    List(ListArgs),

    /// Print the reading order of one directory without writing anything
    Order(OrderArgs),

    /// List the known naming patterns in detection order
    Patterns,
}

/// Arguments of `bookshelf consolidate`.
#[derive(Args, Debug)]
pub struct ConsolidateArgs {
    /// Directory with the downloaded PDFs
    #[arg(value_name = "SOURCE", env = "BOOKSHELF_SOURCE")]
    pub source: PathBuf,

    /// Shelf directory the books are written to
    #[arg(value_name = "TARGET", env = "BOOKSHELF_TARGET")]
    pub target: PathBuf,

    /// How the parts of a collection are ordered
    ///
    /// - auto: detect the publisher naming pattern (default)
    /// - semantic: cover, preface, chapters, appendix, index
    /// - alphabetic: natural file-name order
    /// - timestamp: modification time, oldest first
    #[arg(short, long, value_enum, default_value_t = OrderingStrategy::Auto)]
    pub strategy: OrderingStrategy,

    /// Use this naming pattern instead of detecting one
    ///
    /// Only valid with the auto strategy. See `bookshelf patterns`.
    #[arg(short, long, value_name = "NAME")]
    pub pattern: Option<String>,

    /// Show what would be copied and merged without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Compression level for merged books
    #[arg(short, long, value_enum, default_value_t = CompressionLevel::Standard)]
    pub compression: CompressionLevel,

    /// Number of PDFs loaded concurrently per collection
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments of `bookshelf list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Shelf directory
    #[arg(value_name = "BOOKSHELF", env = "BOOKSHELF_DIR")]
    pub shelf: PathBuf,

    /// Only show titles containing this text (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Show creation date and page count
    #[arg(short, long)]
    pub details: bool,

    /// Sort field
    #[arg(short, long, value_enum, default_value_t = SortField::Title)]
    pub sort: SortField,

    /// Sort descending
    #[arg(short, long)]
    pub reverse: bool,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments of `bookshelf order`.
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Directory holding the parts of one book
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Ordering strategy
    #[arg(short, long, value_enum, default_value_t = OrderingStrategy::Auto)]
    pub strategy: OrderingStrategy,

    /// Use this naming pattern instead of detecting one
    #[arg(short, long, value_name = "NAME")]
    pub pattern: Option<String>,

    /// Print the order as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Default `env_logger` filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

impl ConsolidateArgs {
    /// Build a validated consolidation config.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::InvalidConfig`] if the arguments do not
    /// form a valid configuration.
    pub fn to_config(&self, verbose: bool, quiet: bool) -> Result<ConsolidateConfig> {
        let config = ConsolidateConfig {
            source: self.source.clone(),
            target: self.target.clone(),
            strategy: self.strategy,
            pattern: self.pattern.clone(),
            dry_run: self.dry_run,
            verbose,
            quiet,
            compression: self.compression,
            jobs: self.jobs,
        };

        config.validate().map_err(|e| {
            BookshelfError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}

impl ListArgs {
    /// Build a validated listing config.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::InvalidConfig`] if the arguments do not
    /// form a valid configuration.
    pub fn to_config(&self, verbose: bool, quiet: bool) -> Result<ListConfig> {
        let config = ListConfig {
            shelf: self.shelf.clone(),
            filter: self.filter.clone(),
            details: self.details,
            sort: self.sort,
            reverse: self.reverse,
            verbose,
            quiet,
        };

        config.validate().map_err(|e| {
            BookshelfError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}
