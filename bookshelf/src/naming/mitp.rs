//! mitp Verlag (`Kapitel_3_Titel.pdf`, `Anhang_A_...`, `Glossar.pdf`).

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::util;
use super::{FileCategory, NamingPattern};

const FRONT_MATTER: &[&str] = &[
    "Cover",
    "Titel",
    "Inhaltsverzeichnis",
    "Einleitung",
    "über den Autor",
];
const BACK_MATTER: &[&str] = &["Glossar", "Stichwortverzeichnis"];

static KAPITEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Kapitel_(\d+)_").expect("valid Kapitel regex"));
static ANHANG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Anhang_([A-Z])_").expect("valid Anhang regex"));

/// mitp convention, priority 10.
#[derive(Debug, Clone, Copy, Default)]
pub struct MitpPattern;

impl NamingPattern for MitpPattern {
    fn name(&self) -> &'static str {
        "mitp"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn can_handle(&self, files: &[PathBuf]) -> bool {
        let names = util::file_names(files);

        let has_chapters = names.iter().any(|name| KAPITEL.is_match(name));
        let has_front_matter = names.iter().any(|name| util::contains_any(name, FRONT_MATTER));
        let has_appendix = names.iter().any(|name| ANHANG.is_match(name));

        has_chapters && (has_front_matter || has_appendix)
    }

    fn classify(&self, file_name: &str) -> FileCategory {
        if util::contains_any(file_name, FRONT_MATTER) {
            FileCategory::FrontMatter
        } else if KAPITEL.is_match(file_name) {
            FileCategory::Chapter
        } else if ANHANG.is_match(file_name) {
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
            FileCategory::Chapter => util::pad(util::capture_number(&KAPITEL, file_name)),
            FileCategory::Appendix => {
                util::capture_letter(&ANHANG, file_name).unwrap_or_else(|| "Z".to_string())
            }
            FileCategory::BackMatter => util::list_position(file_name, BACK_MATTER),
            _ => file_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::test_support::{names, paths};
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case(&["Kapitel_1_Intro.pdf", "Cover.pdf"], true)]
    #[case(&["Kapitel_1_Intro.pdf", "Anhang_A_Extras.pdf"], true)]
    #[case(&["Kapitel_1_Intro.pdf", "Kapitel_2_Mehr.pdf"], false)]
    #[case(&["Cover.pdf", "Anhang_A_Extras.pdf"], false)]
    fn test_can_handle(#[case] files: &[&str], #[case] expected: bool) {
        assert_eq!(MitpPattern.can_handle(&paths(files)), expected);
    }

    #[test]
    fn test_duplicate_copy_is_filtered() {
        let input = paths(&["Kapitel_2_Foo.pdf", "Kapitel_2_Foo(1).pdf", "Cover.pdf"]);
        let filtered = names(&MitpPattern.filter_files(&input));
        assert_eq!(filtered, vec!["Kapitel_2_Foo.pdf", "Cover.pdf"]);

        let ordered = names(&MitpPattern.order_files(&input));
        assert!(!ordered.iter().any(|name| name.contains("(1)")));
    }

    #[test]
    fn test_reading_order() {
        let input = paths(&[
            "Stichwortverzeichnis.pdf",
            "Kapitel_10_Ende.pdf",
            "Anhang_B_Tabellen.pdf",
            "Einleitung.pdf",
            "Kapitel_2_Grundlagen.pdf",
            "Glossar.pdf",
            "Cover.pdf",
            "Anhang_A_Loesungen.pdf",
            "Inhaltsverzeichnis.pdf",
            "Kapitel_1_Start.pdf",
            "Titel.pdf",
        ]);

        assert_eq!(
            names(&MitpPattern.order_files(&input)),
            vec![
                "Cover.pdf",
                "Titel.pdf",
                "Inhaltsverzeichnis.pdf",
                "Einleitung.pdf",
                "Kapitel_1_Start.pdf",
                "Kapitel_2_Grundlagen.pdf",
                "Kapitel_10_Ende.pdf",
                "Anhang_A_Loesungen.pdf",
                "Anhang_B_Tabellen.pdf",
                "Glossar.pdf",
                "Stichwortverzeichnis.pdf",
            ]
        );
    }

    #[test]
    fn test_author_page_is_front_matter() {
        let pattern = MitpPattern;
        let path = Path::new("Über den Autor.pdf");
        assert_eq!(pattern.categorize(path), FileCategory::FrontMatter);
        assert_eq!(pattern.sort_key(path).secondary, "0004");
    }
}
