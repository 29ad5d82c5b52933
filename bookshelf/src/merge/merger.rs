//! lopdf based merging.
//!
//! The first readable document becomes the base. Every further document is
//! renumbered past the highest object id seen so far, its objects are moved
//! into the base and its pages are appended to the base page tree.

use log::{debug, warn};
use lopdf::{Document, Object, ObjectId};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;

use super::{MergeReport, MetadataManager, PdfBackend};
use crate::config::{BookMetadata, CompressionLevel};
use crate::error::{BookshelfError, Result};
use crate::io::{PdfReader, PdfWriter, WriteOptions};

/// PDF merger.
#[derive(Debug, Clone)]
pub struct Merger {
    reader: PdfReader,
    writer: PdfWriter,
    metadata_manager: MetadataManager,
    workers: usize,
}

impl Merger {
    /// Create a merger with standard compression and one load worker per
    /// CPU core.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            writer: PdfWriter::new(),
            metadata_manager: MetadataManager::new(),
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }

    /// Use `level` when writing merged books.
    pub fn with_compression(mut self, level: CompressionLevel) -> Self {
        self.writer = PdfWriter::with_options(WriteOptions::from(level));
        self
    }

    /// Load at most `workers` sources concurrently.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Combine documents into the first one, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if `documents` is empty or a page tree is malformed.
    pub fn merge_documents(documents: Vec<Document>) -> Result<Document> {
        let mut documents = documents.into_iter();
        let mut merged = documents.next().ok_or(BookshelfError::NoFilesToMerge)?;
        let mut max_id = merged.max_id;

        for mut doc in documents {
            doc.renumber_objects_with(max_id + 1);
            max_id = doc.max_id;

            let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
            merged.objects.extend(doc.objects);

            Self::add_pages_to_tree(&mut merged, &doc_pages)?;
        }

        merged.max_id = max_id;
        Ok(merged)
    }

    /// Append page references to the root `Pages` node.
    fn add_pages_to_tree(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
        let pages_id = merged
            .catalog()
            .and_then(|catalog| catalog.get(b"Pages"))
            .and_then(Object::as_reference)
            .map_err(|e| BookshelfError::merge_failed(format!("Failed to get pages reference: {e}")))?;

        let pages = merged
            .get_dictionary_mut(pages_id)
            .map_err(|e| BookshelfError::merge_failed(format!("Failed to get pages object: {e}")))?;

        match pages.get_mut(b"Kids") {
            Ok(Object::Array(kids)) => {
                kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));
            }
            Ok(_) => return Err(BookshelfError::merge_failed("Kids is not an array")),
            Err(_) => {
                return Err(BookshelfError::merge_failed(
                    "Pages dictionary missing Kids array",
                ));
            }
        }

        let current_count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        pages.set("Count", Object::Integer(current_count + page_ids.len() as i64));

        Ok(())
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBackend for Merger {
    async fn merge(
        &self,
        sources: &[PathBuf],
        output: &Path,
        metadata: &BookMetadata,
    ) -> Result<MergeReport> {
        let start = Instant::now();

        let mut documents = Vec::with_capacity(sources.len());
        let mut skipped = Vec::new();
        for result in self.reader.load_all(sources, self.workers).await {
            match result {
                Ok(loaded) => documents.push(loaded.document),
                Err(e) if e.is_recoverable() => {
                    warn!("Skipping unreadable file: {e}");
                    if let Some(path) = failed_path(&e) {
                        skipped.push(path);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        if documents.is_empty() {
            return Err(BookshelfError::NoFilesToMerge);
        }
        let files_merged = documents.len();

        let mut merged = task::spawn_blocking(move || Self::merge_documents(documents))
            .await
            .map_err(|e| BookshelfError::merge_failed(format!("Merge task failed: {e}")))??;

        self.metadata_manager.set_metadata(&mut merged, metadata)?;
        let total_pages = merged.get_pages().len();

        let stats = self.writer.save(merged, output).await?;
        debug!(
            "Merged {} file(s), {} page(s) into {} ({})",
            files_merged,
            total_pages,
            output.display(),
            stats.format_file_size()
        );

        Ok(MergeReport {
            output: stats.output_path,
            files_merged,
            total_pages,
            skipped,
            file_size: stats.file_size,
            merge_time: start.elapsed(),
        })
    }

    async fn extract_metadata(&self, path: &Path) -> BookMetadata {
        match PdfReader::without_verification().load(path).await {
            Ok(loaded) => self.metadata_manager.get_metadata(&loaded.document),
            Err(e) => {
                debug!("No metadata for {}: {}", path.display(), e);
                BookMetadata::default()
            }
        }
    }

    async fn page_count(&self, path: &Path) -> Option<usize> {
        self.reader.page_count(path).await.ok()
    }
}

fn failed_path(err: &BookshelfError) -> Option<PathBuf> {
    match err {
        BookshelfError::FailedToLoadPdf { path, .. }
        | BookshelfError::CorruptedPdf { path, .. }
        | BookshelfError::EncryptedPdf { path } => Some(path.clone()),
        _ => None,
    }
}
