//! Hanser Verlag ISBN-coded downloads (`9783446123456.001.pdf`).

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::util;
use super::{FileCategory, NamingPattern};

static ISBN_CHAPTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)97834\d{8}\.\d{3}\.pdf").expect("valid ISBN regex"));
static CHAPTER_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(\d{3})\.").expect("valid chapter number regex"));

const FRONT_MARKER: &str = ".fm.";
const BACK_MARKER: &str = ".bm.";

/// Hanser Verlag convention, priority 15.
#[derive(Debug, Clone, Copy, Default)]
pub struct HanserPattern;

impl NamingPattern for HanserPattern {
    fn name(&self) -> &'static str {
        "Hanser Verlag"
    }

    fn priority(&self) -> i32 {
        15
    }

    fn can_handle(&self, files: &[PathBuf]) -> bool {
        let names = util::file_names(files);

        let has_isbn_chapter = names.iter().any(|name| ISBN_CHAPTER.is_match(name));
        let has_matter = names.iter().any(|name| {
            util::contains_ignore_case(name, FRONT_MARKER)
                || util::contains_ignore_case(name, BACK_MARKER)
        });

        has_isbn_chapter && has_matter
    }

    fn classify(&self, file_name: &str) -> FileCategory {
        if util::contains_ignore_case(file_name, FRONT_MARKER) {
            FileCategory::FrontMatter
        } else if util::contains_ignore_case(file_name, BACK_MARKER) {
            FileCategory::BackMatter
        } else if CHAPTER_NUMBER.is_match(file_name) {
            FileCategory::Chapter
        } else {
            FileCategory::Unknown
        }
    }

    fn key_for(&self, file_name: &str, category: FileCategory) -> String {
        match category {
            FileCategory::FrontMatter => "0000".to_string(),
            FileCategory::BackMatter => "9999".to_string(),
            FileCategory::Chapter => util::pad(util::capture_number(&CHAPTER_NUMBER, file_name)),
            _ => file_name.to_string(),
        }
    }
}
