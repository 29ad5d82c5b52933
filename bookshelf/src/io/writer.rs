//! PDF writing.
//!
//! Books are written to a uniquely named temporary file next to the
//! destination and then renamed into place, so an interrupted run never
//! leaves a half-written book on the shelf.

use lopdf::Document;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::Builder;
use tokio::task;

use crate::config::CompressionLevel;
use crate::error::{BookshelfError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write to a temp file, then rename.
    pub atomic: bool,

    /// Stream compression applied before saving.
    pub compression: CompressionLevel,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compression: CompressionLevel::Standard,
            buffer_size: 8192,
        }
    }
}

impl From<CompressionLevel> for WriteOptions {
    fn from(compression: CompressionLevel) -> Self {
        Self {
            compression,
            ..Default::default()
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Save a document to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be created or written.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        task::spawn_blocking(move || Self::save_blocking(doc, path_buf, &options))
            .await
            .map_err(|e| BookshelfError::other(format!("Write task failed: {e}")))?
    }

    fn save_blocking(
        mut doc: Document,
        path: PathBuf,
        options: &WriteOptions,
    ) -> Result<WriteStatistics> {
        let start = Instant::now();

        match options.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => doc.compress(),
            CompressionLevel::Maximum => {
                doc.prune_objects();
                doc.compress();
            }
        }
        doc.renumber_objects();

        if options.atomic {
            Self::write_atomic(&mut doc, &path, options.buffer_size)?;
        } else {
            let file = File::create(&path).map_err(|e| BookshelfError::FailedToCreateOutput {
                path: path.clone(),
                source: e,
            })?;
            Self::write_document(&mut doc, &file, &path, options.buffer_size)?;
        }

        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path,
        })
    }

    /// The temp file is removed when dropped, so a failed save leaves
    /// nothing behind.
    fn write_atomic(doc: &mut Document, path: &Path, buffer_size: usize) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let temp = Builder::new()
            .prefix(".bookshelf-")
            .suffix(".part")
            .tempfile_in(dir)
            .map_err(|e| BookshelfError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::write_document(doc, temp.as_file(), path, buffer_size)?;

        temp.persist(path)
            .map_err(|e| BookshelfError::FailedToWrite {
                path: path.to_path_buf(),
                source: e.error,
            })?;
        Ok(())
    }

    fn write_document(
        doc: &mut Document,
        file: &File,
        path: &Path,
        buffer_size: usize,
    ) -> Result<()> {
        let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);

        doc.save_to(&mut writer)
            .map_err(|e| BookshelfError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;

        writer.flush().map_err(|e| BookshelfError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
