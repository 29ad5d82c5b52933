//! Structural roles of a file inside a book.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Role a file plays in a document's structure.
///
/// Ordered by [`FileCategory::ordinal`]; this is the primary sort dimension
/// of every classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileCategory {
    /// Cover, title pages, table of contents, prefaces.
    FrontMatter,
    /// Part ("Teil") dividers.
    Part,
    /// Regular chapters.
    Chapter,
    /// Appendices.
    Appendix,
    /// Index, glossary and the like.
    BackMatter,
    /// Anything a classifier could not place.
    Unknown,
}

impl FileCategory {
    /// Numeric rank used for ordering.
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::FrontMatter => 0,
            Self::Part => 1,
            Self::Chapter => 2,
            Self::Appendix => 3,
            Self::BackMatter => 4,
            Self::Unknown => 99,
        }
    }
}

impl PartialOrd for FileCategory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FileCategory {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FrontMatter => "front matter",
            Self::Part => "part",
            Self::Chapter => "chapter",
            Self::Appendix => "appendix",
            Self::BackMatter => "back matter",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        let mut categories = vec![
            FileCategory::Unknown,
            FileCategory::BackMatter,
            FileCategory::Chapter,
            FileCategory::FrontMatter,
            FileCategory::Appendix,
            FileCategory::Part,
        ];
        categories.sort();
        assert_eq!(
            categories,
            vec![
                FileCategory::FrontMatter,
                FileCategory::Part,
                FileCategory::Chapter,
                FileCategory::Appendix,
                FileCategory::BackMatter,
                FileCategory::Unknown,
            ]
        );
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(FileCategory::FrontMatter.ordinal(), 0);
        assert_eq!(FileCategory::BackMatter.ordinal(), 4);
        assert_eq!(FileCategory::Unknown.ordinal(), 99);
    }
}
