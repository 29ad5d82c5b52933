//! Validated run configuration.
//!
//! The CLI turns its arguments into a [`ConsolidateConfig`] or a
//! [`ListConfig`]; both are checked with `validate()` before any file is
//! touched.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::BookshelfError;
use crate::ordering::OrderingStrategy;

/// Compression level for merged books.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// Write streams as they were read.
    None,
    /// Compress streams.
    #[default]
    Standard,
    /// Compress streams and drop unreferenced objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = BookshelfError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(BookshelfError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Field a bookshelf listing is sorted by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Book title, natural order.
    #[default]
    Title,
    /// File size.
    Size,
    /// Creation time.
    Date,
    /// Page count.
    Pages,
}

impl FromStr for SortField {
    type Err = BookshelfError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" | "name" => Ok(Self::Title),
            "size" => Ok(Self::Size),
            "date" => Ok(Self::Date),
            "pages" => Ok(Self::Pages),
            _ => Err(BookshelfError::invalid_config(format!(
                "Invalid sort field: {s}. Must be one of: title, size, date, pages"
            ))),
        }
    }
}

/// Document information written to, or read from, a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    /// Document title.
    pub title: Option<String>,
    /// Document author.
    pub author: Option<String>,
    /// Raw `CreationDate` string.
    pub creation_date: Option<String>,
}

impl BookMetadata {
    /// Create metadata from optional strings, trimming whitespace.
    /// Blank values become `None`.
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        creation_date: Option<String>,
    ) -> Self {
        let clean = |opt: Option<String>| {
            opt.filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
        };

        Self {
            title: clean(title),
            author: clean(author),
            creation_date: clean(creation_date),
        }
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.creation_date.is_none()
    }

    /// Use `title` when no title is set.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        if self.title.is_none() {
            self.title = Some(title.into());
        }
        self
    }
}

fn is_blank(path: &std::path::Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}

/// Configuration of a consolidation run.
#[derive(Debug, Clone, Default)]
pub struct ConsolidateConfig {
    /// Directory holding the scattered PDFs.
    pub source: PathBuf,

    /// Bookshelf directory the books are written to.
    pub target: PathBuf,

    /// How collections are put into reading order.
    pub strategy: OrderingStrategy,

    /// Naming pattern forced on every collection instead of detection.
    pub pattern: Option<String>,

    /// Plan every action without writing anything.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode, errors only.
    pub quiet: bool,

    /// Compression of merged books.
    pub compression: CompressionLevel,

    /// Parallel PDF loads per merge (None = auto-detect).
    pub jobs: Option<usize>,
}

impl ConsolidateConfig {
    /// Create a configuration with defaults for everything but the paths.
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Default::default()
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Source or target is blank
    /// - Source and target are the same directory
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - A pattern override is blank or combined with a non-`auto` strategy
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.source) {
            bail!("Source directory must not be empty");
        }
        if is_blank(&self.target) {
            bail!("Target directory must not be empty");
        }

        if self.source == self.target {
            bail!(
                "Source and target must be different directories: {}",
                self.source.display()
            );
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        if let Some(pattern) = &self.pattern {
            if pattern.trim().is_empty() {
                bail!("Pattern name must not be empty");
            }
            if self.strategy != OrderingStrategy::Auto {
                bail!(
                    "--pattern only applies to the 'auto' strategy, not '{}'",
                    self.strategy
                );
            }
        }

        Ok(())
    }

    /// Get the effective number of parallel jobs.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Configuration of a bookshelf listing.
#[derive(Debug, Clone, Default)]
pub struct ListConfig {
    /// Bookshelf directory.
    pub shelf: PathBuf,

    /// Case-insensitive title substring.
    pub filter: Option<String>,

    /// Read page counts.
    pub details: bool,

    /// Sort field.
    pub sort: SortField,

    /// Descending instead of ascending.
    pub reverse: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode, errors only.
    pub quiet: bool,
}

impl ListConfig {
    /// Create a listing configuration with defaults.
    pub fn new(shelf: impl Into<PathBuf>) -> Self {
        Self {
            shelf: shelf.into(),
            ..Default::default()
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the shelf path is blank or verbose and quiet
    /// are both enabled.
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.shelf) {
            bail!("Bookshelf directory must not be empty");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        Ok(())
    }

    /// Whether page counts have to be read.
    pub fn needs_page_counts(&self) -> bool {
        self.details || self.sort == SortField::Pages
    }
}
