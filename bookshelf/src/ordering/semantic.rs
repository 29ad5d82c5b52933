//! Convention-independent ordering by structural keywords.
//!
//! Each file stem is matched against bilingual (German / English) keyword
//! sets and placed into one of six sections. Files are ordered naturally
//! within a section.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::FileOrderer;
use crate::naming::file_name_cmp;

static COVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(cover|deckblatt|titel|title)").expect("valid cover regex")
});
static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(inhaltsverzeichnis|contents|table.?of.?contents|toc|vorwort|preface|introduction|einleitung|einführung)",
    )
    .expect("valid front matter regex")
});
static CHAPTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(kapitel|chapter|teil|part|abschnitt|section)").expect("valid chapter regex")
});
static APPENDIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(anhang|appendix|appendices|annex)").expect("valid appendix regex")
});
static BACK_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(glossar|glossary|index|literatur|bibliography|references|quellenverzeichnis|nachwort|epilogue|afterword)",
    )
    .expect("valid back matter regex")
});

/// Document section recognised by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    /// Cover and title pages.
    Cover,
    /// Contents, prefaces, introductions.
    FrontMatter,
    /// Chapters, parts, sections.
    Chapters,
    /// Appendices.
    Appendices,
    /// Glossary, index, bibliography, epilogue.
    BackMatter,
    /// No keyword matched.
    Unknown,
}

impl Section {
    /// Section of a file, judged by its stem. The first matching section
    /// in document order wins.
    pub fn of(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();

        [
            (&*COVER, Self::Cover),
            (&*FRONT_MATTER, Self::FrontMatter),
            (&*CHAPTER, Self::Chapters),
            (&*APPENDIX, Self::Appendices),
            (&*BACK_MATTER, Self::BackMatter),
        ]
        .into_iter()
        .find(|(pattern, _)| pattern.is_match(&stem))
        .map(|(_, section)| section)
        .unwrap_or(Self::Unknown)
    }
}

/// Keyword-based orderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticOrderer;

impl FileOrderer for SemanticOrderer {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn order_files(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        let mut keyed: Vec<(Section, &PathBuf)> =
            files.iter().map(|path| (Section::of(path), path)).collect();

        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| file_name_cmp(a.1, b.1)));

        keyed.into_iter().map(|(_, path)| path.clone()).collect()
    }
}
