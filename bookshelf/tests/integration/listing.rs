//! Listing a shelf produced by a consolidation run.

use bookshelf::config::{ConsolidateConfig, ListConfig, SortField};
use bookshelf::consolidate::Consolidator;
use bookshelf::listing::Lister;
use bookshelf::output::{OutputFormatter, display_book_list};
use tempfile::TempDir;

use crate::common::write_marked_pdf;

#[tokio::test]
async fn test_list_consolidated_shelf_by_pages() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    let target = temp_dir.path().join("shelf");

    write_marked_pdf(&source, "Kurz.pdf", 10);
    let book = source.join("Lang");
    for n in 1..=3 {
        write_marked_pdf(&book, &format!("Kapitel_{n}_Teil.pdf"), 10 * n);
    }

    let config = ConsolidateConfig::new(&source, &target);
    Consolidator::local(&config)
        .consolidate(&config, |_| {})
        .await
        .unwrap();

    let mut list_config = ListConfig::new(&target);
    list_config.sort = SortField::Pages;
    list_config.reverse = true;

    let books = Lister::local().list(&list_config).await.unwrap();
    let summary: Vec<(&str, Option<usize>)> = books
        .iter()
        .map(|b| (b.title.as_str(), b.page_count))
        .collect();
    assert_eq!(summary, vec![("Lang", Some(3)), ("Kurz", Some(1))]);

    display_book_list(&OutputFormatter::quiet(), &books, true);
}

#[tokio::test]
async fn test_list_json_shape() {
    let temp_dir = TempDir::new().unwrap();
    write_marked_pdf(temp_dir.path(), "Alpha.pdf", 10);
    write_marked_pdf(temp_dir.path(), "Beta.pdf", 10);

    let mut config = ListConfig::new(temp_dir.path());
    config.filter = Some("alp".to_string());

    let books = Lister::local().list(&config).await.unwrap();
    let json = serde_json::to_value(&books).unwrap();

    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Alpha");
    assert!(json[0].get("page_count").is_none());
    assert!(json[0]["formatted_size"].as_str().unwrap().ends_with('B'));
}

#[tokio::test]
async fn test_list_rejects_file_as_shelf() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_marked_pdf(temp_dir.path(), "Alpha.pdf", 10);

    let err = Lister::local()
        .list(&ListConfig::new(&file))
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
