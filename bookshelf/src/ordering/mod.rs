//! Turning a collection of PDF paths into a reading order.
//!
//! The default [`OrderingStrategy::Auto`] asks the
//! [`PatternRegistry`](crate::naming::PatternRegistry) which publisher
//! convention the files follow. The other strategies ignore publisher
//! conventions entirely and are selected explicitly.

pub mod alphabetic;
pub mod semantic;
pub mod timestamp;

pub use alphabetic::AlphabeticOrderer;
pub use semantic::{Section, SemanticOrderer};
pub use timestamp::TimestampOrderer;

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{BookshelfError, Result};
use crate::naming::{NamingPattern, PatternRegistry, util};

/// A convention-independent ordering of files.
pub trait FileOrderer: Send + Sync + fmt::Debug {
    /// Short identifier (`"semantic"`, `"alphabetic"`, `"timestamp"`).
    fn name(&self) -> &'static str;

    /// Return `files` in reading order. Never adds or drops files.
    fn order_files(&self, files: &[PathBuf]) -> Vec<PathBuf>;
}

/// How a collection is put into reading order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderingStrategy {
    /// Detect the publisher naming pattern.
    #[default]
    Auto,
    /// Keyword-based sections.
    Semantic,
    /// Natural file-name order.
    Alphabetic,
    /// Modification time, oldest first.
    Timestamp,
}

impl OrderingStrategy {
    /// Orderer behind a convention-independent strategy; `None` for `Auto`.
    pub fn orderer(self) -> Option<Box<dyn FileOrderer>> {
        match self {
            Self::Auto => None,
            Self::Semantic => Some(Box::new(SemanticOrderer)),
            Self::Alphabetic => Some(Box::new(AlphabeticOrderer)),
            Self::Timestamp => Some(Box::new(TimestampOrderer)),
        }
    }
}

impl FromStr for OrderingStrategy {
    type Err = BookshelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "semantic" => Ok(Self::Semantic),
            "alphabetic" => Ok(Self::Alphabetic),
            "timestamp" => Ok(Self::Timestamp),
            _ => Err(BookshelfError::invalid_config(format!(
                "Invalid ordering strategy: {s}. Must be one of: auto, semantic, alphabetic, timestamp"
            ))),
        }
    }
}

impl fmt::Display for OrderingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Semantic => "semantic",
            Self::Alphabetic => "alphabetic",
            Self::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A collection in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedCollection {
    /// Naming pattern or strategy that produced the order.
    pub ordered_by: String,
    /// Files to merge, in order.
    pub files: Vec<PathBuf>,
    /// Files removed as duplicate copies.
    pub dropped: Vec<PathBuf>,
}

/// Orders collections according to a strategy.
#[derive(Debug)]
pub struct CollectionOrderer<'a> {
    registry: &'a PatternRegistry,
    strategy: OrderingStrategy,
    pattern: Option<&'a dyn NamingPattern>,
}

impl<'a> CollectionOrderer<'a> {
    /// Create an orderer.
    ///
    /// `pattern_name` forces a specific naming pattern instead of detection
    /// and is only meaningful with [`OrderingStrategy::Auto`].
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern_name` is blank or names no known pattern.
    pub fn new(
        registry: &'a PatternRegistry,
        strategy: OrderingStrategy,
        pattern_name: Option<&str>,
    ) -> Result<Self> {
        let pattern = match pattern_name {
            Some(name) => Some(
                registry
                    .get_by_name(name)?
                    .ok_or_else(|| BookshelfError::unknown_pattern(name))?,
            ),
            None => None,
        };

        Ok(Self {
            registry,
            strategy,
            pattern,
        })
    }

    /// Put one collection into reading order.
    ///
    /// The timestamp strategy reads file metadata synchronously here; use
    /// [`order_async`](Self::order_async) from async code.
    pub fn order(&self, files: &[PathBuf]) -> OrderedCollection {
        let (ordered_by, ordered) = match self.strategy.orderer() {
            None => {
                let pattern = self
                    .pattern
                    .unwrap_or_else(|| self.registry.detect(files));
                (pattern.name().to_string(), pattern.order_files(files))
            }
            Some(orderer) => {
                let kept = util::filter_duplicates(files);
                (orderer.name().to_string(), orderer.order_files(&kept))
            }
        };

        Self::collect(files, ordered_by, ordered)
    }

    /// Same as [`order`](Self::order), with modification times read
    /// through `tokio::fs`.
    pub async fn order_async(&self, files: &[PathBuf]) -> OrderedCollection {
        if self.strategy != OrderingStrategy::Timestamp {
            return self.order(files);
        }

        let kept = util::filter_duplicates(files);
        let times = TimestampOrderer::modification_times(&kept).await;
        let ordered = TimestampOrderer::order_by_times(&kept, &times);
        Self::collect(files, self.strategy.to_string(), ordered)
    }

    fn collect(files: &[PathBuf], ordered_by: String, ordered: Vec<PathBuf>) -> OrderedCollection {
        let dropped: Vec<PathBuf> = files
            .iter()
            .filter(|path| !ordered.contains(*path))
            .cloned()
            .collect();

        debug!(
            "Ordered {} file(s) by '{}', dropped {}",
            ordered.len(),
            ordered_by,
            dropped.len()
        );

        OrderedCollection {
            ordered_by,
            files: ordered,
            dropped,
        }
    }
}
