//! Ordering by last modification time.

use futures::future::join_all;
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::FileOrderer;
use crate::naming::file_name_cmp;

/// Oldest file first; equal timestamps fall back to natural file-name order.
///
/// A file whose timestamp cannot be read is treated as older than any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampOrderer;

impl TimestampOrderer {
    fn modified(path: &Path) -> Option<SystemTime> {
        Self::log_missing(path, std::fs::metadata(path).and_then(|meta| meta.modified()))
    }

    fn log_missing(path: &Path, time: std::io::Result<SystemTime>) -> Option<SystemTime> {
        match time {
            Ok(time) => Some(time),
            Err(e) => {
                debug!("No modification time for {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Modification times of `files`, read without blocking the runtime.
    /// Files whose time cannot be read are absent from the map.
    pub async fn modification_times(files: &[PathBuf]) -> HashMap<PathBuf, SystemTime> {
        let lookups = files.iter().map(|path| async move {
            let time = tokio::fs::metadata(path).await.and_then(|meta| meta.modified());
            Self::log_missing(path, time).map(|time| (path.clone(), time))
        });

        join_all(lookups).await.into_iter().flatten().collect()
    }

    /// Order `files` by times gathered with
    /// [`modification_times`](Self::modification_times).
    pub fn order_by_times(
        files: &[PathBuf],
        times: &HashMap<PathBuf, SystemTime>,
    ) -> Vec<PathBuf> {
        Self::sort(files, |path| times.get(path).copied())
    }

    fn sort(files: &[PathBuf], time: impl Fn(&PathBuf) -> Option<SystemTime>) -> Vec<PathBuf> {
        // None < Some(_): unreadable timestamps sort first
        let mut keyed: Vec<(Option<SystemTime>, &PathBuf)> =
            files.iter().map(|path| (time(path), path)).collect();

        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| file_name_cmp(a.1, b.1)));

        keyed.into_iter().map(|(_, path)| path.clone()).collect()
    }
}

impl FileOrderer for TimestampOrderer {
    fn name(&self) -> &'static str {
        "timestamp"
    }

    fn order_files(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        Self::sort(files, |path| Self::modified(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::test_support::names;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str, age: Duration) -> PathBuf {
        let path = dir.path().join(name);
        let file = File::create(&path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
        path
    }

    #[test]
    fn test_oldest_first() {
        let dir = TempDir::new().unwrap();
        let newest = touch(&dir, "a.pdf", Duration::from_secs(10));
        let oldest = touch(&dir, "b.pdf", Duration::from_secs(3_000));
        let middle = touch(&dir, "c.pdf", Duration::from_secs(600));

        let ordered = TimestampOrderer.order_files(&[newest, oldest, middle]);
        assert_eq!(names(&ordered), vec!["b.pdf", "c.pdf", "a.pdf"]);
    }

    #[test]
    fn test_missing_files_sort_first_by_name() {
        let dir = TempDir::new().unwrap();
        let existing = touch(&dir, "a.pdf", Duration::from_secs(60));
        let missing_10 = dir.path().join("missing10.pdf");
        let missing_2 = dir.path().join("missing2.pdf");

        let ordered = TimestampOrderer.order_files(&[existing, missing_10, missing_2]);
        assert_eq!(names(&ordered), vec!["missing2.pdf", "missing10.pdf", "a.pdf"]);
    }

    #[test]
    fn test_equal_timestamps_use_natural_names() {
        let dir = TempDir::new().unwrap();
        let stamp = SystemTime::now() - Duration::from_secs(100);
        let mut paths = Vec::new();
        for name in ["part10.pdf", "part9.pdf", "part1.pdf"] {
            let path = dir.path().join(name);
            File::create(&path).unwrap().set_modified(stamp).unwrap();
            paths.push(path);
        }

        let ordered = TimestampOrderer.order_files(&paths);
        assert_eq!(names(&ordered), vec!["part1.pdf", "part9.pdf", "part10.pdf"]);
    }

    #[tokio::test]
    async fn test_prefetched_times_match_sync_order() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            touch(&dir, "new.pdf", Duration::from_secs(5)),
            touch(&dir, "old.pdf", Duration::from_secs(9_000)),
            dir.path().join("gone.pdf"),
        ];

        let times = TimestampOrderer::modification_times(&files).await;
        assert_eq!(times.len(), 2);
        assert!(!times.contains_key(&files[2]));

        let ordered = TimestampOrderer::order_by_times(&files, &times);
        assert_eq!(names(&ordered), vec!["gone.pdf", "old.pdf", "new.pdf"]);
        assert_eq!(ordered, TimestampOrderer.order_files(&files));
    }
}
