//! Wichmann Verlag: bare numbered files (`Buch_3_Netze.pdf`) plus
//! `Vorwort`, `Inhalt`, a single `Anhänge` file and `Stichwortverzeichnis`.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::util;
use super::{FileCategory, NamingPattern};

const FRONT_MATTER: &[&str] = &["Vorwort", "Inhalt"];
// Some downloads drop the umlaut entirely.
const APPENDIX: &[&str] = &["Anhnge", "Anhänge"];
const BACK_MATTER: &[&str] = &["Stichwortverzeichnis"];

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(\d+)_").expect("valid numbered regex"));
static KAPITEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Kapitel_\d+_").expect("valid Kapitel regex"));

/// Wichmann Verlag convention, priority 5.
#[derive(Debug, Clone, Copy, Default)]
pub struct WichmannPattern;

impl NamingPattern for WichmannPattern {
    fn name(&self) -> &'static str {
        "Wichmann Verlag"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn can_handle(&self, files: &[PathBuf]) -> bool {
        let names = util::file_names(files);

        let has_numbers = names.iter().any(|name| NUMBERED.is_match(name));
        let has_front_matter = names.iter().any(|name| util::contains_any(name, FRONT_MATTER));
        let has_appendix = names.iter().any(|name| util::contains_any(name, APPENDIX));
        // Kapitel_ tokens belong to mitp.
        let has_kapitel = names.iter().any(|name| KAPITEL.is_match(name));

        has_numbers && (has_front_matter || has_appendix) && !has_kapitel
    }

    fn classify(&self, file_name: &str) -> FileCategory {
        let is_appendix = util::contains_any(file_name, APPENDIX);

        if util::contains_any(file_name, FRONT_MATTER) {
            FileCategory::FrontMatter
        } else if NUMBERED.is_match(file_name) && !is_appendix {
            FileCategory::Chapter
        } else if is_appendix {
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
            FileCategory::Chapter => util::pad(util::capture_number(&NUMBERED, file_name)),
            FileCategory::Appendix => "0000".to_string(),
            FileCategory::BackMatter => util::list_position(file_name, BACK_MATTER),
            _ => file_name.to_string(),
        }
    }
}
