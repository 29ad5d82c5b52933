//! Combining the parts of a book into one PDF.

pub mod merger;
pub mod metadata;

pub use merger::Merger;
pub use metadata::{MetadataManager, format_pdf_date};

use serde::Serialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::BookMetadata;
use crate::error::Result;
use crate::utils::format_file_size;

/// Outcome of merging one collection.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Written book.
    pub output: PathBuf,

    /// Number of source files that made it into the book.
    pub files_merged: usize,

    /// Pages of the written book.
    pub total_pages: usize,

    /// Sources that could not be opened and were left out.
    pub skipped: Vec<PathBuf>,

    /// Size of the written book in bytes.
    pub file_size: u64,

    /// Time from first load to finished write.
    pub merge_time: Duration,
}

impl MergeReport {
    /// Format output size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF operations needed by consolidation and listing.
pub trait PdfBackend: Send + Sync {
    /// Merge `sources` in the given order into `output`.
    ///
    /// Unreadable sources are skipped and reported; the merge only fails
    /// when none of them can be read or the output cannot be written.
    fn merge(
        &self,
        sources: &[PathBuf],
        output: &Path,
        metadata: &BookMetadata,
    ) -> impl Future<Output = Result<MergeReport>> + Send;

    /// Title, author and creation date of a PDF; empty when unreadable.
    fn extract_metadata(&self, path: &Path) -> impl Future<Output = BookMetadata> + Send;

    /// Page count of a PDF; `None` when unreadable.
    fn page_count(&self, path: &Path) -> impl Future<Output = Option<usize>> + Send;
}
