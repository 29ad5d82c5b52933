//! Part-structured books (`Teil_I_...`, `Teil_II_...`).
//!
//! Files carrying a `Teil_<n>_` token are parts. A part divider and the
//! chapters filed under it share the part's numeral, so the secondary key is
//! `PPPP.CCCC` where the divider itself uses chapter `0000`. Chapters outside
//! any part are keyed by chapter number alone.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::util::{self, SENTINEL};
use super::{FileCategory, NamingPattern};

const FRONT_MATTER: &[&str] = &["BEGINN", "Vorwort", "Inhaltsverzeichnis"];
const APPENDIX: &[&str] = &["Anhang"];
const BACK_MATTER: &[&str] = &["Index"];

// The prefix ignores case, the numeral does not: `Teil_Mix_` is no part.
static TEIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:Teil)_([IVXLCDM]+|\d+)_").expect("valid Teil regex")
});
static KAPITEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Kapitel_(\d+)_").expect("valid Kapitel regex"));
static ANHANG_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Anhang_([A-Z])_").expect("valid Anhang regex"));

/// Part-structured convention, priority 12.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeilPattern;

impl TeilPattern {
    fn part_number(file_name: &str) -> u32 {
        TEIL.captures(file_name)
            .and_then(|caps| caps.get(1))
            .map(|m| util::parse_numeral(m.as_str()))
            .unwrap_or(SENTINEL)
    }

    fn chapter_number(file_name: &str) -> Option<u32> {
        KAPITEL
            .is_match(file_name)
            .then(|| util::capture_number(&KAPITEL, file_name))
    }
}

impl NamingPattern for TeilPattern {
    fn name(&self) -> &'static str {
        "Teil-based"
    }

    fn priority(&self) -> i32 {
        12
    }

    fn can_handle(&self, files: &[PathBuf]) -> bool {
        util::file_names(files).iter().any(|name| TEIL.is_match(name))
    }

    fn classify(&self, file_name: &str) -> FileCategory {
        if util::contains_any(file_name, FRONT_MATTER) {
            FileCategory::FrontMatter
        } else if TEIL.is_match(file_name) {
            FileCategory::Part
        } else if KAPITEL.is_match(file_name) {
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
            FileCategory::Part => {
                let part = util::pad(Self::part_number(file_name));
                let chapter = util::pad(Self::chapter_number(file_name).unwrap_or(0));
                format!("{part}.{chapter}")
            }
            FileCategory::Chapter => util::pad(util::capture_number(&KAPITEL, file_name)),
            FileCategory::Appendix => {
                util::capture_letter(&ANHANG_LETTER, file_name).unwrap_or_else(|| "A".to_string())
            }
            FileCategory::BackMatter => util::list_position(file_name, BACK_MATTER),
            FileCategory::Unknown => file_name.to_string(),
        }
    }
}
