//! Building a bookshelf from a directory of scattered PDFs.
//!
//! Every PDF directly inside the source directory is a book of its own and
//! is copied. Every subdirectory is a collection: its PDFs (at any depth)
//! are put into reading order and merged into `<collection name>.pdf`. A
//! collection holding a single PDF is copied instead.
//!
//! # Examples
//!
//! ```no_run
//! use bookshelf::config::ConsolidateConfig;
//! use bookshelf::consolidate::Consolidator;
//!
//! # async fn example() -> bookshelf::Result<()> {
//! let config = ConsolidateConfig::new("downloads/books", "shelf");
//! let result = Consolidator::local(&config)
//!     .consolidate(&config, |event| println!("{event}"))
//!     .await?;
//! println!("{} book(s) on the shelf", result.total_books);
//! # Ok(())
//! # }
//! ```

use log::{error, info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{BookMetadata, ConsolidateConfig};
use crate::error::{BookshelfError, Result};
use crate::io::{FileSystem, LocalFileSystem};
use crate::merge::{Merger, PdfBackend};
use crate::naming::PatternRegistry;
use crate::naming::util::file_name;
use crate::ordering::CollectionOrderer;

/// Progress notification emitted while consolidating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The run started.
    Started {
        /// Source directory.
        source: PathBuf,
        /// Bookshelf directory.
        target: PathBuf,
        /// Whether nothing will be written.
        dry_run: bool,
    },
    /// A single PDF is about to be copied.
    CopyingFile {
        /// File name of the PDF.
        name: String,
    },
    /// A collection directory is being looked at.
    ProcessingCollection {
        /// Collection name.
        name: String,
        /// PDFs found in the collection.
        files: usize,
    },
    /// The ordering of a collection has been decided.
    PatternDetected {
        /// Collection name.
        collection: String,
        /// Naming pattern or strategy used.
        pattern: String,
    },
    /// A collection is about to be merged.
    MergingCollection {
        /// Collection name.
        name: String,
        /// Files going into the book.
        files: usize,
    },
    /// A collection produced no book.
    SkippedCollection {
        /// Collection name.
        name: String,
        /// Why it was skipped.
        reason: String,
    },
    /// The run finished.
    Finished {
        /// Books placed on the shelf.
        total_books: usize,
    },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { dry_run: true, .. } => write!(f, "Planning consolidation (dry run)..."),
            Self::Started { .. } => write!(f, "Starting consolidation..."),
            Self::CopyingFile { name } => write!(f, "Copying individual PDF: {name}"),
            Self::ProcessingCollection { name, files } => {
                write!(f, "Processing collection: {name} ({files} PDF(s))")
            }
            Self::PatternDetected { pattern, .. } => write!(f, "Detected {pattern} naming pattern"),
            Self::MergingCollection { name, files } => {
                write!(f, "Merging collection: {name} ({files} file(s))")
            }
            Self::SkippedCollection { name, reason } => {
                write!(f, "Skipping collection {name}: {reason}")
            }
            Self::Finished { total_books } => {
                write!(f, "Consolidation complete! Total books: {total_books}")
            }
        }
    }
}

/// A destination that was taken and had to be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingConflict {
    /// File name that was wanted.
    pub requested: String,
    /// Path actually used.
    pub resolved: PathBuf,
}

/// One step of a consolidation, as planned by a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PlannedAction {
    /// Copy a single PDF.
    Copy {
        /// Source file.
        from: PathBuf,
        /// Destination on the shelf.
        to: PathBuf,
    },
    /// Merge a collection.
    Merge {
        /// Collection name.
        collection: String,
        /// Naming pattern or strategy used for the order.
        ordered_by: String,
        /// Files in merge order.
        files: Vec<PathBuf>,
        /// Destination on the shelf.
        to: PathBuf,
    },
}

/// Summary of a consolidation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsolidationResult {
    /// Whether the run completed.
    pub success: bool,
    /// Books placed on the shelf.
    pub total_books: usize,
    /// Books that were copied unchanged.
    pub individual_copied: usize,
    /// Books that were merged from a collection.
    pub merged: usize,
    /// Paths of all books on the shelf from this run.
    pub consolidated: Vec<PathBuf>,
    /// Destinations that had to be renamed.
    pub naming_conflicts: Vec<NamingConflict>,
    /// Files left out: duplicate copies and unreadable PDFs.
    pub skipped_files: Vec<PathBuf>,
    /// Steps a dry run would perform.
    pub planned_actions: Vec<PlannedAction>,
    /// Why the run failed.
    pub error: Option<String>,
}

impl ConsolidationResult {
    /// A run that could not start.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Consolidates a source directory into a bookshelf.
#[derive(Debug)]
pub struct Consolidator<F = LocalFileSystem, B = Merger> {
    fs: F,
    backend: B,
    registry: PatternRegistry,
}

impl Consolidator {
    /// Consolidator working on the local disk with lopdf, set up from `config`.
    pub fn local(config: &ConsolidateConfig) -> Self {
        let backend = Merger::new()
            .with_compression(config.compression)
            .with_workers(config.effective_jobs());
        Self::new(LocalFileSystem::new(), backend)
    }
}

impl<F: FileSystem, B: PdfBackend> Consolidator<F, B> {
    /// Create a consolidator over the given file system and PDF backend.
    pub fn new(fs: F, backend: B) -> Self {
        Self {
            fs,
            backend,
            registry: PatternRegistry::new(),
        }
    }

    /// Use a custom naming pattern registry.
    pub fn with_registry(mut self, registry: PatternRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Run a consolidation.
    ///
    /// A missing source directory yields an unsuccessful result rather than
    /// an error. A collection whose merge fails is skipped and the run goes
    /// on.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the pattern
    /// override is unknown, or the shelf cannot be written.
    pub async fn consolidate<P>(
        &self,
        config: &ConsolidateConfig,
        mut on_progress: P,
    ) -> Result<ConsolidationResult>
    where
        P: FnMut(&ProgressEvent),
    {
        config
            .validate()
            .map_err(|e| BookshelfError::invalid_config(e.to_string()))?;

        let orderer =
            CollectionOrderer::new(&self.registry, config.strategy, config.pattern.as_deref())?;

        if !self.fs.dir_exists(&config.source).await {
            warn!("Source directory does not exist: {}", config.source.display());
            return Ok(ConsolidationResult::failure(format!(
                "Source directory does not exist: {}",
                config.source.display()
            )));
        }

        info!(
            "Consolidating {} into {}",
            config.source.display(),
            config.target.display()
        );
        on_progress(&ProgressEvent::Started {
            source: config.source.clone(),
            target: config.target.clone(),
            dry_run: config.dry_run,
        });

        if !config.dry_run {
            self.fs.ensure_dir(&config.target).await?;
        }

        let mut run = Run {
            config,
            result: ConsolidationResult {
                success: true,
                ..Default::default()
            },
            reserved: HashSet::new(),
        };

        for file in self.fs.list_pdf_files(&config.source).await? {
            on_progress(&ProgressEvent::CopyingFile {
                name: file_name(&file),
            });
            self.copy_book(&mut run, &file).await?;
        }

        for dir in self.fs.list_subdirectories(&config.source).await? {
            self.process_collection(&mut run, &orderer, &dir, &mut on_progress)
                .await?;
        }

        let mut result = run.result;
        result.total_books = result.individual_copied + result.merged;

        info!(
            "Consolidation finished: {} book(s), {} copied, {} merged, {} conflict(s)",
            result.total_books,
            result.individual_copied,
            result.merged,
            result.naming_conflicts.len()
        );
        on_progress(&ProgressEvent::Finished {
            total_books: result.total_books,
        });

        Ok(result)
    }

    async fn process_collection<P>(
        &self,
        run: &mut Run<'_>,
        orderer: &CollectionOrderer<'_>,
        dir: &Path,
        on_progress: &mut P,
    ) -> Result<()>
    where
        P: FnMut(&ProgressEvent),
    {
        let name = file_name(dir);
        let files = self.fs.list_pdf_files_recursive(dir).await?;

        on_progress(&ProgressEvent::ProcessingCollection {
            name: name.clone(),
            files: files.len(),
        });

        match files.as_slice() {
            [] => {
                warn!("No PDFs found in collection: {name}");
                on_progress(&ProgressEvent::SkippedCollection {
                    name,
                    reason: "no PDF files".to_string(),
                });
                Ok(())
            }
            [single] => self.copy_book(run, single).await,
            _ => self.merge_collection(run, orderer, name, &files, on_progress).await,
        }
    }

    async fn merge_collection<P>(
        &self,
        run: &mut Run<'_>,
        orderer: &CollectionOrderer<'_>,
        name: String,
        files: &[PathBuf],
        on_progress: &mut P,
    ) -> Result<()>
    where
        P: FnMut(&ProgressEvent),
    {
        let ordered = orderer.order_async(files).await;
        info!(
            "Using '{}' ordering for collection {} ({} file(s))",
            ordered.ordered_by,
            name,
            ordered.files.len()
        );
        on_progress(&ProgressEvent::PatternDetected {
            collection: name.clone(),
            pattern: ordered.ordered_by.clone(),
        });
        run.result.skipped_files.extend(ordered.dropped.iter().cloned());

        if ordered.files.is_empty() {
            warn!("No files remaining after filtering for collection: {name}");
            on_progress(&ProgressEvent::SkippedCollection {
                name,
                reason: "no files left after filtering".to_string(),
            });
            return Ok(());
        }

        let destination = self.destination(run, &format!("{name}.pdf")).await;

        if run.config.dry_run {
            run.result.planned_actions.push(PlannedAction::Merge {
                collection: name,
                ordered_by: ordered.ordered_by,
                files: ordered.files,
                to: destination.clone(),
            });
            run.result.consolidated.push(destination);
            run.result.merged += 1;
            return Ok(());
        }

        let metadata = self.collection_metadata(&ordered.files, &name).await;

        on_progress(&ProgressEvent::MergingCollection {
            name: name.clone(),
            files: ordered.files.len(),
        });

        match self
            .backend
            .merge(&ordered.files, &destination, &metadata)
            .await
        {
            Ok(report) => {
                info!(
                    "Merged collection {} with {} PDF(s) into {}",
                    name,
                    report.files_merged,
                    report.output.display()
                );
                run.result.skipped_files.extend(report.skipped);
                run.result.consolidated.push(report.output);
                run.result.merged += 1;
            }
            Err(e) if !e.is_fatal() => {
                error!("Failed to merge collection {name}: {e}");
                run.reserved.remove(&destination);
                run.result.skipped_files.extend(ordered.files);
                on_progress(&ProgressEvent::SkippedCollection {
                    name,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Metadata of the first file that has any, titled after the
    /// collection when no title was found.
    async fn collection_metadata(&self, ordered: &[PathBuf], name: &str) -> BookMetadata {
        for file in ordered {
            let metadata = self.backend.extract_metadata(file).await;
            if !metadata.is_empty() {
                return metadata.with_fallback_title(name);
            }
        }
        BookMetadata::default().with_fallback_title(name)
    }

    async fn copy_book(&self, run: &mut Run<'_>, file: &Path) -> Result<()> {
        let destination = self.destination(run, &file_name(file)).await;

        if run.config.dry_run {
            run.result.planned_actions.push(PlannedAction::Copy {
                from: file.to_path_buf(),
                to: destination.clone(),
            });
        } else {
            self.fs.copy_file(file, &destination, false).await?;
        }

        run.result.consolidated.push(destination);
        run.result.individual_copied += 1;
        Ok(())
    }

    /// Free shelf path for `name`, numbered `stem_N.ext` when taken on
    /// disk or earlier in this run.
    async fn destination(&self, run: &mut Run<'_>, name: &str) -> PathBuf {
        let wanted = run.config.target.join(name);
        let candidate = self.fs.unique_file_name(&wanted, &run.reserved).await;

        if candidate != wanted {
            warn!(
                "Naming conflict for {}, using {}",
                name,
                candidate.display()
            );
            run.result.naming_conflicts.push(NamingConflict {
                requested: name.to_string(),
                resolved: candidate.clone(),
            });
        }

        run.reserved.insert(candidate.clone());
        candidate
    }
}

/// Mutable state of one consolidation run.
struct Run<'a> {
    config: &'a ConsolidateConfig,
    result: ConsolidationResult,
    reserved: HashSet<PathBuf>,
}
