//! Reading order of collections listed from disk.

use bookshelf::io::{FileSystem, LocalFileSystem};
use bookshelf::naming::PatternRegistry;
use bookshelf::ordering::{CollectionOrderer, OrderingStrategy};
use rstest::rstest;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap();
    path
}

fn names(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

async fn listed(dir: &Path) -> Vec<PathBuf> {
    LocalFileSystem::new()
        .list_pdf_files_recursive(dir)
        .await
        .unwrap()
}

#[rstest]
#[case::hanser(
    &["9783446123456.bm.pdf", "9783446123456.010.pdf", "9783446123456.fm.pdf", "9783446123456.002.pdf"],
    "Hanser Verlag",
    &["9783446123456.fm.pdf", "9783446123456.002.pdf", "9783446123456.010.pdf", "9783446123456.bm.pdf"]
)]
#[case::oreilly(
    &["Index.pdf", "Kapitel_10_Makros.pdf", "Anhang.pdf", "Kapitel_2_Ownership.pdf", "BEGINN.pdf"],
    "O'Reilly",
    &["BEGINN.pdf", "Kapitel_2_Ownership.pdf", "Kapitel_10_Makros.pdf", "Anhang.pdf", "Index.pdf"]
)]
#[case::wichmann(
    &["Stichwortverzeichnis.pdf", "GIS_11_Ausblick.pdf", "Vorwort.pdf", "GIS_2_Karten.pdf"],
    "Wichmann Verlag",
    &["Vorwort.pdf", "GIS_2_Karten.pdf", "GIS_11_Ausblick.pdf", "Stichwortverzeichnis.pdf"]
)]
#[case::fallback(
    &["Teil 10.pdf", "Teil 9.pdf", "teil 1.pdf"],
    "Default",
    &["teil 1.pdf", "Teil 9.pdf", "Teil 10.pdf"]
)]
#[tokio::test]
async fn test_detected_reading_order(
    #[case] on_disk: &[&str],
    #[case] pattern: &str,
    #[case] expected: &[&str],
) {
    let temp_dir = TempDir::new().unwrap();
    for name in on_disk {
        touch(temp_dir.path(), name);
    }

    let registry = PatternRegistry::new();
    let orderer = CollectionOrderer::new(&registry, OrderingStrategy::Auto, None).unwrap();
    let ordered = orderer.order(&listed(temp_dir.path()).await);

    assert_eq!(ordered.ordered_by, pattern);
    assert_eq!(names(&ordered.files), expected);
    assert!(ordered.dropped.is_empty());
}

#[tokio::test]
async fn test_duplicates_are_dropped_by_every_strategy() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["Vorwort.pdf", "Kapitel 1.pdf", "Kapitel 1 (2).pdf"] {
        touch(temp_dir.path(), name);
    }
    let files = listed(temp_dir.path()).await;
    let registry = PatternRegistry::new();

    for strategy in [
        OrderingStrategy::Auto,
        OrderingStrategy::Semantic,
        OrderingStrategy::Alphabetic,
        OrderingStrategy::Timestamp,
    ] {
        let ordered = CollectionOrderer::new(&registry, strategy, None)
            .unwrap()
            .order(&files);
        assert_eq!(ordered.files.len(), 2, "{strategy}");
        assert_eq!(names(&ordered.dropped), vec!["Kapitel 1 (2).pdf"], "{strategy}");
    }
}

#[tokio::test]
async fn test_semantic_sections() {
    let temp_dir = TempDir::new().unwrap();
    for name in [
        "Glossary.pdf",
        "Chapter 2.pdf",
        "Appendix A.pdf",
        "Preface.pdf",
        "Chapter 10.pdf",
        "Cover.pdf",
    ] {
        touch(temp_dir.path(), name);
    }

    let registry = PatternRegistry::new();
    let ordered = CollectionOrderer::new(&registry, OrderingStrategy::Semantic, None)
        .unwrap()
        .order(&listed(temp_dir.path()).await);

    assert_eq!(ordered.ordered_by, "semantic");
    assert_eq!(
        names(&ordered.files),
        vec![
            "Cover.pdf",
            "Preface.pdf",
            "Chapter 2.pdf",
            "Chapter 10.pdf",
            "Appendix A.pdf",
            "Glossary.pdf",
        ]
    );
}

#[tokio::test]
async fn test_timestamp_order() {
    let temp_dir = TempDir::new().unwrap();
    let now = SystemTime::now();
    for (name, age) in [("b.pdf", 10), ("c.pdf", 300), ("a.pdf", 60)] {
        let path = touch(temp_dir.path(), name);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(now - Duration::from_secs(age))
            .unwrap();
    }

    touch(temp_dir.path(), "a(1).pdf");

    let registry = PatternRegistry::new();
    let orderer = CollectionOrderer::new(&registry, OrderingStrategy::Timestamp, None).unwrap();
    let files = listed(temp_dir.path()).await;
    let ordered = orderer.order_async(&files).await;

    assert_eq!(ordered.ordered_by, "timestamp");
    assert_eq!(names(&ordered.files), vec!["c.pdf", "a.pdf", "b.pdf"]);
    assert_eq!(names(&ordered.dropped), vec!["a(1).pdf"]);
    assert_eq!(ordered, orderer.order(&files));
}

#[tokio::test]
async fn test_pattern_override_skips_detection() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["BEGINN.pdf", "Kapitel_2_B.pdf", "Kapitel_1_A.pdf", "Index.pdf"] {
        touch(temp_dir.path(), name);
    }

    let registry = PatternRegistry::new();
    let ordered = CollectionOrderer::new(&registry, OrderingStrategy::Auto, Some("default"))
        .unwrap()
        .order(&listed(temp_dir.path()).await);

    assert_eq!(ordered.ordered_by, "Default");
    assert_eq!(
        names(&ordered.files),
        vec!["BEGINN.pdf", "Index.pdf", "Kapitel_1_A.pdf", "Kapitel_2_B.pdf"]
    );
}
