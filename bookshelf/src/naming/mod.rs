//! Publisher naming-pattern detection and reading-order computation.
//!
//! A [`NamingPattern`] recognises one publisher's file-naming convention,
//! assigns every file a [`FileCategory`] and a secondary key, and orders a
//! collection by `(category, secondary key)`. The [`PatternRegistry`] picks the
//! most specific pattern for a collection and falls back to
//! [`DefaultPattern`], which orders naturally by file name.
//!
//! # Examples
//!
//! ```
//! use bookshelf::naming::PatternRegistry;
//! use std::path::PathBuf;
//!
//! let files: Vec<PathBuf> = [
//!     "9783446123456.fm.pdf",
//!     "9783446123456.002.pdf",
//!     "9783446123456.001.pdf",
//!     "9783446123456.bm.pdf",
//! ]
//! .iter()
//! .map(PathBuf::from)
//! .collect();
//!
//! let registry = PatternRegistry::new();
//! let pattern = registry.detect(&files);
//! assert_eq!(pattern.name(), "Hanser Verlag");
//!
//! let ordered = pattern.order_files(&files);
//! assert_eq!(ordered[1], PathBuf::from("9783446123456.001.pdf"));
//! ```

pub mod category;
pub mod default;
pub mod hanser;
pub mod mitp;
pub mod natural;
pub mod oreilly;
pub mod registry;
pub mod teil;
pub mod util;
pub mod wichmann;

pub use category::FileCategory;
pub use default::DefaultPattern;
pub use hanser::HanserPattern;
pub use mitp::MitpPattern;
pub use natural::{compare_natural, compare_natural_sign, file_name_cmp, natural_cmp};
pub use oreilly::OreillyPattern;
pub use registry::PatternRegistry;
pub use teil::TeilPattern;
pub use wichmann::WichmannPattern;

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// Composite ordering key of a single file.
///
/// The secondary part is compared naturally; zero-padded keys therefore order
/// the same way they would lexicographically, and plain file names (used by
/// the default pattern) order like a human would expect.
#[derive(Debug, Clone)]
pub struct SortKey {
    /// Structural role, the primary dimension.
    pub category: FileCategory,
    /// Convention-specific key within the category.
    pub secondary: String,
}

impl SortKey {
    /// Create a new key.
    pub fn new(category: FileCategory, secondary: impl Into<String>) -> Self {
        Self {
            category,
            secondary: secondary.into(),
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| natural_cmp(&self.secondary, &other.secondary))
    }
}

/// A publisher file-naming convention.
///
/// Implementations are stateless and shared between threads. Only
/// [`classify`](NamingPattern::classify) and
/// [`key_for`](NamingPattern::key_for) carry convention-specific rules; the
/// provided methods derive categorization, keys and ordering from them so a
/// key is always computed from the category the same file was assigned.
pub trait NamingPattern: Send + Sync + fmt::Debug {
    /// Human-readable identifier, e.g. `"Hanser Verlag"`.
    fn name(&self) -> &'static str;

    /// Higher values are checked first during detection.
    fn priority(&self) -> i32;

    /// Whether this convention explains the given collection.
    fn can_handle(&self, files: &[PathBuf]) -> bool;

    /// Structural role of a file, given its file name.
    fn classify(&self, file_name: &str) -> FileCategory;

    /// Secondary key of a file within `category`.
    fn key_for(&self, file_name: &str, category: FileCategory) -> String;

    /// Remove files that should not be merged (duplicate downloads).
    fn filter_files(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        util::filter_duplicates(files)
    }

    /// Structural role of a file.
    fn categorize(&self, path: &Path) -> FileCategory {
        self.classify(&util::file_name(path))
    }

    /// Full ordering key of a file.
    fn sort_key(&self, path: &Path) -> SortKey {
        let name = util::file_name(path);
        let category = self.classify(&name);
        let secondary = self.key_for(&name, category);
        SortKey::new(category, secondary)
    }

    /// Filter, then stable-sort by [`SortKey`].
    fn order_files(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        let mut keyed: Vec<(SortKey, PathBuf)> = self
            .filter_files(files)
            .into_iter()
            .map(|path| (self.sort_key(&path), path))
            .collect();

        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        keyed.into_iter().map(|(_, path)| path).collect()
    }
}
