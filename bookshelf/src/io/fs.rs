//! File system access used by consolidation and listing.
//!
//! [`FileSystem`] is the seam between the orchestration logic and the disk;
//! [`LocalFileSystem`] is the real implementation.

use chrono::{DateTime, Local};
use glob::MatchOptions;
use log::debug;
use serde::Serialize;
use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::task;
use walkdir::WalkDir;

use crate::error::{BookshelfError, Result};

/// `path` with `_n` appended to its stem: `Book.pdf` becomes `Book_2.pdf`.
pub fn numbered_path(path: &Path, n: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{n}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{n}"),
    };
    path.with_file_name(name)
}

/// Basic facts about a file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// File name including extension.
    pub name: String,
    /// Full path.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Creation time, or modification time where the platform has none.
    pub created: DateTime<Local>,
}

/// File operations needed to build and read a bookshelf.
pub trait FileSystem: Send + Sync {
    /// PDFs directly inside `dir`, matched case-insensitively, sorted by
    /// name ignoring case.
    fn list_pdf_files(&self, dir: &Path) -> impl Future<Output = Result<Vec<PathBuf>>> + Send;

    /// PDFs anywhere below `dir`, sorted by path ignoring case.
    fn list_pdf_files_recursive(
        &self,
        dir: &Path,
    ) -> impl Future<Output = Result<Vec<PathBuf>>> + Send;

    /// Direct subdirectories of `dir`, sorted by name ignoring case.
    fn list_subdirectories(&self, dir: &Path)
    -> impl Future<Output = Result<Vec<PathBuf>>> + Send;

    /// Copy `src` to `dst`.
    ///
    /// Fails with [`BookshelfError::OutputExists`] when `dst` exists and
    /// `overwrite` is false.
    fn copy_file(
        &self,
        src: &Path,
        dst: &Path,
        overwrite: bool,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Whether `path` is an existing file.
    fn file_exists(&self, path: &Path) -> impl Future<Output = bool> + Send;

    /// Whether `path` is an existing directory.
    fn dir_exists(&self, path: &Path) -> impl Future<Output = bool> + Send;

    /// Create `dir` and its parents if missing.
    fn ensure_dir(&self, dir: &Path) -> impl Future<Output = Result<()>> + Send;

    /// `path` itself if free, otherwise the first free `stem_N.ext` with
    /// `N` counting from 1. Paths in `reserved` count as taken.
    fn unique_file_name(
        &self,
        path: &Path,
        reserved: &HashSet<PathBuf>,
    ) -> impl Future<Output = PathBuf> + Send;

    /// Size and creation time of a file.
    fn file_info(&self, path: &Path) -> impl Future<Output = Result<FileInfo>> + Send;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a new local file system handle.
    pub fn new() -> Self {
        Self
    }

    fn sort_ignoring_case(paths: &mut [PathBuf]) {
        paths.sort_by_cached_key(|p| p.to_string_lossy().to_lowercase());
    }

    fn is_pdf(path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }

    fn glob_pdfs(dir: PathBuf) -> Result<Vec<PathBuf>> {
        let pattern = format!(
            "{}{}*.pdf",
            glob::Pattern::escape(&dir.to_string_lossy()),
            std::path::MAIN_SEPARATOR
        );

        let options = MatchOptions {
            case_sensitive: false,
            ..Default::default()
        };

        let mut files = Vec::new();
        for entry in glob::glob_with(&pattern, options)
            .map_err(|e| BookshelfError::other(format!("Invalid search pattern: {e}")))?
        {
            let path = entry.map_err(|e| BookshelfError::other(e.to_string()))?;
            if path.is_file() {
                files.push(path);
            }
        }

        Self::sort_ignoring_case(&mut files);
        Ok(files)
    }

    fn walk_pdfs(dir: PathBuf) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry below {}: {}", dir.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && Self::is_pdf(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        Self::sort_ignoring_case(&mut files);
        files
    }

    fn require_dir(dir: &Path) -> Result<()> {
        if !dir.exists() {
            return Err(BookshelfError::source_not_found(dir));
        }
        if !dir.is_dir() {
            return Err(BookshelfError::not_a_directory(dir));
        }
        Ok(())
    }
}

impl FileSystem for LocalFileSystem {
    async fn list_pdf_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        Self::require_dir(dir)?;
        let dir = dir.to_path_buf();
        task::spawn_blocking(move || Self::glob_pdfs(dir))
            .await
            .map_err(|e| BookshelfError::other(format!("Directory scan failed: {e}")))?
    }

    async fn list_pdf_files_recursive(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        Self::require_dir(dir)?;
        let dir = dir.to_path_buf();
        task::spawn_blocking(move || Self::walk_pdfs(dir))
            .await
            .map_err(|e| BookshelfError::other(format!("Directory walk failed: {e}")))
    }

    async fn list_subdirectories(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        Self::require_dir(dir)?;

        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut dirs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                dirs.push(entry.path());
            }
        }

        Self::sort_ignoring_case(&mut dirs);
        Ok(dirs)
    }

    async fn copy_file(&self, src: &Path, dst: &Path, overwrite: bool) -> Result<()> {
        if !overwrite && self.file_exists(dst).await {
            return Err(BookshelfError::output_exists(dst.to_path_buf()));
        }

        tokio::fs::copy(src, dst)
            .await
            .map_err(|e| BookshelfError::CopyFailed {
                from: src.to_path_buf(),
                to: dst.to_path_buf(),
                source: e,
            })?;

        debug!("Copied {} -> {}", src.display(), dst.display());
        Ok(())
    }

    async fn file_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn dir_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    async fn ensure_dir(&self, dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| BookshelfError::FailedToCreateOutput {
                path: dir.to_path_buf(),
                source: e,
            })
    }

    async fn unique_file_name(&self, path: &Path, reserved: &HashSet<PathBuf>) -> PathBuf {
        let mut candidate = path.to_path_buf();
        let mut n = 0;
        while reserved.contains(&candidate) || tokio::fs::metadata(&candidate).await.is_ok() {
            n += 1;
            candidate = numbered_path(path, n);
        }
        candidate
    }

    async fn file_info(&self, path: &Path) -> Result<FileInfo> {
        let meta = tokio::fs::metadata(path).await?;
        let created = meta
            .created()
            .or_else(|_| meta.modified())
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now());

        Ok(FileInfo {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            size: meta.len(),
            created,
        })
    }
}
