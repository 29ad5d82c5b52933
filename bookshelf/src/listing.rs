//! Listing the books on a shelf.

use chrono::{DateTime, Local};
use futures::stream::{self, StreamExt};
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::PathBuf;

use crate::config::{ListConfig, SortField};
use crate::error::{BookshelfError, Result};
use crate::io::{FileSystem, LocalFileSystem};
use crate::merge::{Merger, PdfBackend};
use crate::naming::natural_cmp;
use crate::utils::format_size_short;

/// Concurrent page count reads.
const PAGE_COUNT_WORKERS: usize = 8;

/// One book on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInfo {
    /// File name without extension.
    pub title: String,
    /// Full path.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Human readable size, e.g. `"2.4 MB"`.
    pub formatted_size: String,
    /// Creation time.
    pub created: DateTime<Local>,
    /// Page count, read only when details are requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,
}

/// Total size of the listed books.
pub fn total_size(books: &[BookInfo]) -> u64 {
    books.iter().map(|b| b.size).sum()
}

/// Compare two books by `field`, ascending unless `reverse`.
///
/// Unknown page counts go last either way. Ties fall back to the title.
pub fn compare_books(a: &BookInfo, b: &BookInfo, field: SortField, reverse: bool) -> Ordering {
    let directed = |ord: Ordering| if reverse { ord.reverse() } else { ord };

    let primary = match field {
        SortField::Title => directed(natural_cmp(&a.title, &b.title)),
        SortField::Size => directed(a.size.cmp(&b.size)),
        SortField::Date => directed(a.created.cmp(&b.created)),
        SortField::Pages => match (a.page_count, b.page_count) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };

    primary.then_with(|| natural_cmp(&a.title, &b.title))
}

/// Lists the PDFs of a bookshelf directory.
#[derive(Debug)]
pub struct Lister<F = LocalFileSystem, B = Merger> {
    fs: F,
    backend: B,
}

impl Lister {
    /// Lister over the local disk.
    pub fn local() -> Self {
        Self::new(LocalFileSystem::new(), Merger::new())
    }
}

impl<F: FileSystem, B: PdfBackend> Lister<F, B> {
    /// Create a lister over the given file system and PDF backend.
    pub fn new(fs: F, backend: B) -> Self {
        Self { fs, backend }
    }

    /// List, filter and sort the books of `config.shelf`.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::SourceNotFound`] if the shelf does not
    /// exist, or an error if the configuration is invalid.
    pub async fn list(&self, config: &ListConfig) -> Result<Vec<BookInfo>> {
        config
            .validate()
            .map_err(|e| BookshelfError::invalid_config(e.to_string()))?;

        let filter = config
            .filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase);

        let mut books = Vec::new();
        for path in self.fs.list_pdf_files(&config.shelf).await? {
            let title = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            if let Some(filter) = &filter
                && !title.to_lowercase().contains(filter.as_str())
            {
                continue;
            }

            let info = self.fs.file_info(&path).await?;
            books.push(BookInfo {
                title,
                formatted_size: format_size_short(info.size),
                size: info.size,
                created: info.created,
                path,
                page_count: None,
            });
        }

        if config.needs_page_counts() {
            self.fill_page_counts(&mut books).await;
        }

        books.sort_by(|a, b| compare_books(a, b, config.sort, config.reverse));
        debug!("Listed {} book(s) in {}", books.len(), config.shelf.display());

        Ok(books)
    }

    async fn fill_page_counts(&self, books: &mut [BookInfo]) {
        let tasks = books.iter().enumerate().map(|(idx, book)| async move {
            (idx, self.backend.page_count(&book.path).await)
        });

        let counts: Vec<(usize, Option<usize>)> = stream::iter(tasks)
            .buffer_unordered(PAGE_COUNT_WORKERS)
            .collect()
            .await;

        for (idx, count) in counts {
            books[idx].page_count = count;
        }
    }
}
