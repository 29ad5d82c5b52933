//! Fallback used when no publisher convention matches.

use std::path::PathBuf;

use super::{FileCategory, NamingPattern};

/// Every file is a chapter keyed by its own name, which reduces ordering to
/// natural file-name order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPattern;

impl NamingPattern for DefaultPattern {
    fn name(&self) -> &'static str {
        "Default"
    }

    fn priority(&self) -> i32 {
        -1
    }

    fn can_handle(&self, _files: &[PathBuf]) -> bool {
        true
    }

    fn classify(&self, _file_name: &str) -> FileCategory {
        FileCategory::Chapter
    }

    fn key_for(&self, file_name: &str, _category: FileCategory) -> String {
        file_name.to_string()
    }
}
