//! Plain natural file-name ordering.
//!
//! Ignores publisher conventions; `Chapter_2.pdf` still comes before
//! `Chapter_10.pdf`.

use std::path::PathBuf;

use super::FileOrderer;
use crate::naming::file_name_cmp;

/// Natural file-name order, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphabeticOrderer;

impl FileOrderer for AlphabeticOrderer {
    fn name(&self) -> &'static str {
        "alphabetic"
    }

    fn order_files(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        let mut ordered = files.to_vec();
        ordered.sort_by(|a, b| file_name_cmp(a, b));
        ordered
    }
}
