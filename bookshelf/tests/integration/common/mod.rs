//! Shared fixtures for the integration tests.
//!
//! Every fixture PDF has one page whose MediaBox width is a marker, so the
//! order of parts in a merged book can be read back from its pages.

#![allow(dead_code)]

use lopdf::{Document, Object, StringFormat, dictionary};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a one-page PDF whose page is `marker` points wide.
pub fn write_marked_pdf(dir: &Path, name: &str, marker: i64) -> PathBuf {
    write_pdf(dir, name, marker, None)
}

/// Write a one-page PDF with a document title.
pub fn write_titled_pdf(dir: &Path, name: &str, marker: i64, title: &str) -> PathBuf {
    write_pdf(dir, name, marker, Some(title))
}

fn write_pdf(dir: &Path, name: &str, marker: i64, title: Option<&str>) -> PathBuf {
    fs::create_dir_all(dir).unwrap();

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), marker.into(), 792.into()],
    });
    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(title.as_bytes().to_vec(), StringFormat::Literal),
        });
        doc.trailer.set("Info", info_id);
    }

    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// Page markers of a PDF, in page order.
pub fn page_markers(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let page = doc.get_dictionary(page_id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
