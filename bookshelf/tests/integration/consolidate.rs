//! End-to-end consolidation of source trees into a shelf.

use bookshelf::config::ConsolidateConfig;
use bookshelf::consolidate::{Consolidator, PlannedAction, ProgressEvent};
use bookshelf::merge::{Merger, MetadataManager, PdfBackend};
use bookshelf::ordering::OrderingStrategy;
use bookshelf::{BookshelfError, ConsolidationResult};
use std::path::Path;
use tempfile::TempDir;

use crate::common::{file_names, page_markers, write_marked_pdf, write_titled_pdf};

async fn run(config: &ConsolidateConfig) -> (ConsolidationResult, Vec<ProgressEvent>) {
    let mut events = Vec::new();
    let result = Consolidator::local(config)
        .consolidate(config, |event| events.push(event.clone()))
        .await
        .unwrap();
    (result, events)
}

/// A Teil book, written out of order.
fn write_teil_book(dir: &Path) {
    write_marked_pdf(dir, "Index.pdf", 90);
    write_marked_pdf(dir, "Teil_II_Kapitel_3_Betrieb.pdf", 60);
    write_marked_pdf(dir, "Teil_I_Grundlagen.pdf", 30);
    write_marked_pdf(dir, "Vorwort.pdf", 20);
    write_marked_pdf(dir, "Teil_I_Kapitel_1_Einstieg.pdf", 40);
    write_marked_pdf(dir, "Anhang_A_Quellen.pdf", 70);
    write_marked_pdf(dir, "BEGINN.pdf", 10);
    write_marked_pdf(dir, "Teil_II_Praxis.pdf", 50);
}

#[tokio::test]
async fn test_consolidate_mixed_source() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("downloads");
    let target = temp_dir.path().join("shelf");

    write_marked_pdf(&source, "Standalone.pdf", 100);
    write_teil_book(&source.join("Architektur"));
    write_marked_pdf(&source.join("Einzeln"), "Nur ein Teil.pdf", 200);
    std::fs::create_dir_all(source.join("Leer")).unwrap();

    let config = ConsolidateConfig::new(&source, &target);
    let (result, events) = run(&config).await;

    assert!(result.success);
    assert_eq!(result.individual_copied, 2);
    assert_eq!(result.merged, 1);
    assert_eq!(result.total_books, 3);
    assert!(result.naming_conflicts.is_empty());
    assert_eq!(
        file_names(&target),
        vec!["Architektur.pdf", "Nur ein Teil.pdf", "Standalone.pdf"]
    );

    assert_eq!(
        page_markers(&target.join("Architektur.pdf")),
        vec![10, 20, 30, 40, 50, 60, 70, 90]
    );

    assert!(events.contains(&ProgressEvent::PatternDetected {
        collection: "Architektur".to_string(),
        pattern: "Teil-based".to_string(),
    }));
    assert!(events.iter().any(|e| matches!(
        e,
        ProgressEvent::SkippedCollection { name, .. } if name == "Leer"
    )));
    assert_eq!(events.last(), Some(&ProgressEvent::Finished { total_books: 3 }));
}

#[tokio::test]
async fn test_merged_book_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    let target = temp_dir.path().join("shelf");
    let book = source.join("Rust");

    write_marked_pdf(&book, "Cover.pdf", 10);
    write_titled_pdf(&book, "Kapitel_1_Start.pdf", 20, "Rust in der Praxis");
    write_marked_pdf(&book, "Kapitel_2_Ende.pdf", 30);

    let config = ConsolidateConfig::new(&source, &target);
    let (result, _) = run(&config).await;
    assert_eq!(result.merged, 1);

    let merger = Merger::new();
    let metadata = merger.extract_metadata(&target.join("Rust.pdf")).await;
    assert_eq!(metadata.title.as_deref(), Some("Rust in der Praxis"));
    assert!(metadata.creation_date.is_some());
    assert_eq!(merger.page_count(&target.join("Rust.pdf")).await, Some(3));

    let doc = lopdf::Document::load(target.join("Rust.pdf")).unwrap();
    assert!(MetadataManager::new().has_metadata(&doc));
}

#[tokio::test]
async fn test_second_run_resolves_conflicts() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    let target = temp_dir.path().join("shelf");

    write_marked_pdf(&source, "Notes.pdf", 10);
    write_teil_book(&source.join("Book"));

    let config = ConsolidateConfig::new(&source, &target);
    run(&config).await;
    let (result, _) = run(&config).await;

    assert_eq!(result.naming_conflicts.len(), 2);
    assert_eq!(
        file_names(&target),
        vec!["Book.pdf", "Book_1.pdf", "Notes.pdf", "Notes_1.pdf"]
    );
    assert!(
        result
            .naming_conflicts
            .iter()
            .any(|c| c.requested == "Book.pdf" && c.resolved == target.join("Book_1.pdf"))
    );
}

#[tokio::test]
async fn test_dry_run_plans_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    let target = temp_dir.path().join("shelf");

    write_marked_pdf(&source, "Single.pdf", 10);
    let book = source.join("Handbuch");
    write_marked_pdf(&book, "b.pdf", 20);
    write_marked_pdf(&book, "a.pdf", 30);
    write_marked_pdf(&book, "a (1).pdf", 40);

    let mut config = ConsolidateConfig::new(&source, &target);
    config.dry_run = true;
    config.strategy = OrderingStrategy::Alphabetic;
    let (result, _) = run(&config).await;

    assert!(result.success);
    assert!(!target.exists());
    assert_eq!(result.planned_actions.len(), 2);
    assert_eq!(result.skipped_files, vec![book.join("a (1).pdf")]);

    let Some(PlannedAction::Merge {
        ordered_by, files, ..
    }) = result
        .planned_actions
        .iter()
        .find(|a| matches!(a, PlannedAction::Merge { .. }))
    else {
        panic!("no merge planned");
    };
    assert_eq!(ordered_by, "alphabetic");
    assert_eq!(files, &vec![book.join("a.pdf"), book.join("b.pdf")]);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["planned_actions"][0]["action"], "copy");
}

#[tokio::test]
async fn test_nested_collection_and_uppercase_extension() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    let target = temp_dir.path().join("shelf");
    let book = source.join("Netzwerke");

    write_marked_pdf(&book.join("Teil 2"), "Kapitel_2_Routing.PDF", 20);
    write_marked_pdf(&book.join("Teil 1"), "Kapitel_1_Grundlagen.pdf", 10);

    let config = ConsolidateConfig::new(&source, &target);
    let (result, _) = run(&config).await;

    assert_eq!(result.merged, 1);
    assert_eq!(page_markers(&target.join("Netzwerke.pdf")), vec![10, 20]);
}

#[tokio::test]
async fn test_unreadable_collection_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    let target = temp_dir.path().join("shelf");
    let broken = source.join("Kaputt");

    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("a.pdf"), b"not a pdf").unwrap();
    std::fs::write(broken.join("b.pdf"), b"not a pdf either").unwrap();
    write_marked_pdf(&source, "Ok.pdf", 10);

    let config = ConsolidateConfig::new(&source, &target);
    let (result, events) = run(&config).await;

    assert!(result.success);
    assert_eq!(result.merged, 0);
    assert_eq!(result.individual_copied, 1);
    assert_eq!(result.skipped_files.len(), 2);
    assert!(events.iter().any(|e| matches!(
        e,
        ProgressEvent::SkippedCollection { name, .. } if name == "Kaputt"
    )));
    assert_eq!(file_names(&target), vec!["Ok.pdf"]);
}

#[tokio::test]
async fn test_missing_source_is_reported_not_raised() {
    let temp_dir = TempDir::new().unwrap();
    let config =
        ConsolidateConfig::new(temp_dir.path().join("nope"), temp_dir.path().join("shelf"));

    let (result, _) = run(&config).await;
    assert!(!result.success);
    assert!(result.error.unwrap().contains("does not exist"));
}

#[tokio::test]
async fn test_unknown_pattern_override() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    std::fs::create_dir_all(&source).unwrap();

    let mut config = ConsolidateConfig::new(&source, temp_dir.path().join("shelf"));
    config.pattern = Some("Springer".to_string());

    let err = Consolidator::local(&config)
        .consolidate(&config, |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, BookshelfError::UnknownPattern { .. }));
}
