//! O'Reilly (German and English editions): `BEGINN.pdf`, `Kapitel_1_...` or
//! `Chapter_1_...`, `Anhang`, `Index`.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::util::{self, SENTINEL};
use super::{FileCategory, NamingPattern};

const FRONT_MATTER: &[&str] = &["BEGINN", "Inhalt", "Vorwort"];
const APPENDIX: &[&str] = &["Anhang"];
const BACK_MATTER: &[&str] = &["Index"];

static KAPITEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Kapitel_(\d+)_").expect("valid Kapitel regex"));
static CHAPTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Chapter_(\d+)_").expect("valid Chapter regex"));
static ANHANG_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Anhang_([A-Z])_").expect("valid Anhang regex"));

/// O'Reilly convention, priority 8.
#[derive(Debug, Clone, Copy, Default)]
pub struct OreillyPattern;

impl OreillyPattern {
    fn is_chapter(file_name: &str) -> bool {
        KAPITEL.is_match(file_name) || CHAPTER.is_match(file_name)
    }

    fn chapter_number(file_name: &str) -> u32 {
        match util::capture_number(&KAPITEL, file_name) {
            SENTINEL => util::capture_number(&CHAPTER, file_name),
            number => number,
        }
    }
}

impl NamingPattern for OreillyPattern {
    fn name(&self) -> &'static str {
        "O'Reilly"
    }

    fn priority(&self) -> i32 {
        8
    }

    fn can_handle(&self, files: &[PathBuf]) -> bool {
        let names = util::file_names(files);

        let has_beginn = names
            .iter()
            .any(|name| util::contains_ignore_case(name, "BEGINN"));
        let has_chapters = names.iter().any(|name| Self::is_chapter(name));
        let has_index = names
            .iter()
            .any(|name| util::contains_ignore_case(name, "Index"));

        has_beginn && (has_chapters || has_index)
    }

    fn classify(&self, file_name: &str) -> FileCategory {
        if util::contains_any(file_name, FRONT_MATTER) {
            FileCategory::FrontMatter
        } else if Self::is_chapter(file_name) {
            FileCategory::Chapter
        } else if util::contains_any(file_name, APPENDIX) {
            FileCategory::Appendix
        } else if util::contains_any(file_name, BACK_MATTER) {
            FileCategory::BackMatter
        } else {
            FileCategory::Unknown
        }
    }

    fn key_for(&self, file_name: &str, category: FileCategory) -> String {
        match category {
            FileCategory::FrontMatter => util::list_position(file_name, FRONT_MATTER),
            FileCategory::Chapter => util::pad(Self::chapter_number(file_name)),
            FileCategory::Appendix => util::capture_letter(&ANHANG_LETTER, file_name)
                .unwrap_or_else(|| "A".to_string()),
            FileCategory::BackMatter => util::list_position(file_name, BACK_MATTER),
            _ => file_name.to_string(),
        }
    }
}
