//! Priority-ranked selection of naming patterns.

use log::debug;
use std::fmt;
use std::path::PathBuf;

use super::{
    DefaultPattern, HanserPattern, MitpPattern, NamingPattern, OreillyPattern, TeilPattern,
    WichmannPattern,
};
use crate::error::{BookshelfError, Result};

/// Holds every known naming pattern, checked in descending priority.
///
/// Built once and only read afterwards, so a single registry can serve any
/// number of concurrent orderings.
pub struct PatternRegistry {
    patterns: Vec<Box<dyn NamingPattern>>,
    fallback: DefaultPattern,
}

impl PatternRegistry {
    /// Registry with all built-in publisher conventions.
    pub fn new() -> Self {
        Self::with_patterns(vec![
            Box::new(TeilPattern),
            Box::new(HanserPattern),
            Box::new(MitpPattern),
            Box::new(OreillyPattern),
            Box::new(WichmannPattern),
        ])
    }

    /// Registry over a custom set of patterns.
    ///
    /// Patterns are ranked by priority, highest first; equal priorities keep
    /// the order they were given in. The default pattern is always appended
    /// as the final fallback and must not be part of `patterns`.
    pub fn with_patterns(mut patterns: Vec<Box<dyn NamingPattern>>) -> Self {
        // stable: ties stay in registration order
        patterns.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Self {
            patterns,
            fallback: DefaultPattern,
        }
    }

    /// Select the pattern for a collection.
    ///
    /// Never fails: when no convention claims the files the default pattern
    /// is returned.
    pub fn detect(&self, files: &[PathBuf]) -> &dyn NamingPattern {
        for pattern in &self.patterns {
            if pattern.can_handle(files) {
                debug!(
                    "Detected '{}' naming pattern for {} file(s)",
                    pattern.name(),
                    files.len()
                );
                return pattern.as_ref();
            }
        }

        debug!(
            "No specific naming pattern matched {} file(s), using '{}'",
            files.len(),
            self.fallback.name()
        );
        &self.fallback
    }

    /// Look up a pattern by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::InvalidInput`] if `name` is blank.
    pub fn get_by_name(&self, name: &str) -> Result<Option<&dyn NamingPattern>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookshelfError::invalid_input("pattern name must not be blank"));
        }

        Ok(self
            .patterns()
            .find(|pattern| pattern.name().eq_ignore_ascii_case(name)))
    }

    /// All patterns in detection order, the default pattern last.
    pub fn patterns(&self) -> impl Iterator<Item = &dyn NamingPattern> {
        self.patterns
            .iter()
            .map(|pattern| pattern.as_ref())
            .chain(std::iter::once(&self.fallback as &dyn NamingPattern))
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.patterns().map(|pattern| pattern.name()))
            .finish()
    }
}
