//! PDF loading.
//!
//! Parsing is CPU bound and done on tokio's blocking pool; batches are
//! loaded concurrently and handed back in input order.
//!
//! # Examples
//!
//! ```no_run
//! use bookshelf::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("Kapitel_1.pdf"), PathBuf::from("Kapitel_2.pdf")];
//! for result in reader.load_all(&paths, 4).await {
//!     match result {
//!         Ok(loaded) => println!("{}: {} pages", loaded.path.display(), loaded.page_count),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! # }
//! ```

use futures::stream::{self, StreamExt};
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{BookshelfError, Result};

/// A loaded PDF document.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The parsed document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// Result of loading one file.
pub type LoadResult = Result<LoadedPdf>;

/// PDF reader.
#[derive(Debug, Clone, Copy)]
pub struct PdfReader {
    /// Reject documents without pages.
    verify: bool,
}

impl PdfReader {
    /// Create a reader that rejects page-less documents.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that accepts any parseable document.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File cannot be read or parsed
    /// - PDF is encrypted
    /// - PDF has no pages (when verifying)
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let verify = self.verify;

        task::spawn_blocking(move || Self::load_blocking(path_buf, verify))
            .await
            .map_err(|e| BookshelfError::other(format!("Load task failed: {e}")))?
    }

    fn load_blocking(path: PathBuf, verify: bool) -> Result<LoadedPdf> {
        let start = Instant::now();

        let document = Document::load(&path).map_err(|e| {
            let err_msg = e.to_string();
            let lower = err_msg.to_lowercase();
            if lower.contains("encrypt") || lower.contains("password") {
                BookshelfError::encrypted_pdf(path.clone())
            } else {
                BookshelfError::failed_to_load_pdf(path.clone(), err_msg)
            }
        })?;

        let page_count = document.get_pages().len();
        if verify && page_count == 0 {
            return Err(BookshelfError::corrupted_pdf(path, "PDF has no pages"));
        }

        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Ok(LoadedPdf {
            document,
            path,
            page_count,
            load_time: start.elapsed(),
            file_size,
        })
    }

    /// Number of pages of a PDF.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be loaded.
    pub async fn page_count(&self, path: &Path) -> Result<usize> {
        Ok(Self::without_verification().load(path).await?.page_count)
    }

    /// Load several PDFs with at most `workers` loads in flight.
    ///
    /// Results are returned in the order of `paths`.
    pub async fn load_all(&self, paths: &[PathBuf], workers: usize) -> Vec<LoadResult> {
        let workers = workers.max(1);
        let reader = *self;

        let tasks = paths
            .to_vec()
            .into_iter()
            .enumerate()
            .map(move |(idx, path)| async move { (idx, reader.load(&path).await) });

        let mut indexed: Vec<(usize, LoadResult)> = stream::iter(tasks)
            .buffer_unordered(workers)
            .collect()
            .await;

        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, result)| result).collect()
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
