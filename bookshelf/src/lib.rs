//! bookshelf - Consolidate scattered PDF files into an ordered bookshelf.
//!
//! Books downloaded chapter by chapter arrive as directories full of PDFs
//! whose names follow a publisher's convention. This library recognises
//! those conventions, puts the parts into reading order and merges each
//! collection into a single book:
//!
//! - Publisher naming-pattern detection ([`naming`])
//! - Convention-independent ordering strategies ([`ordering`])
//! - Consolidation of a source tree into a shelf ([`consolidate`])
//! - Shelf listings ([`listing`])
//!
//! # Examples
//!
//! ## Ordering a collection
//!
//! ```
//! use bookshelf::naming::PatternRegistry;
//! use bookshelf::ordering::{CollectionOrderer, OrderingStrategy};
//! use std::path::PathBuf;
//!
//! let files: Vec<PathBuf> = ["Kapitel_10_Ende.pdf", "Cover.pdf", "Kapitel_2_Mitte.pdf"]
//!     .iter()
//!     .map(PathBuf::from)
//!     .collect();
//!
//! let registry = PatternRegistry::new();
//! let orderer = CollectionOrderer::new(&registry, OrderingStrategy::Auto, None).unwrap();
//! let ordered = orderer.order(&files);
//!
//! assert_eq!(ordered.ordered_by, "mitp");
//! assert_eq!(ordered.files[0], PathBuf::from("Cover.pdf"));
//! assert_eq!(ordered.files[2], PathBuf::from("Kapitel_10_Ende.pdf"));
//! ```
//!
//! ## Consolidating a directory
//!
//! ```no_run
//! use bookshelf::config::ConsolidateConfig;
//! use bookshelf::consolidate::Consolidator;
//!
//! # async fn example() -> bookshelf::Result<()> {
//! let config = ConsolidateConfig::new("downloads", "shelf");
//! let result = Consolidator::local(&config)
//!     .consolidate(&config, |_| {})
//!     .await?;
//! println!("{} merged, {} copied", result.merged, result.individual_copied);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod consolidate;
pub mod error;
pub mod io;
pub mod listing;
pub mod merge;
pub mod naming;
pub mod ordering;
pub mod output;
pub mod utils;

// Re-export commonly used types
pub use config::{BookMetadata, CompressionLevel, ConsolidateConfig, ListConfig, SortField};
pub use consolidate::{ConsolidationResult, Consolidator, ProgressEvent};
pub use error::{BookshelfError, Result};
pub use listing::{BookInfo, Lister};
pub use naming::{FileCategory, NamingPattern, PatternRegistry};
pub use ordering::{CollectionOrderer, OrderingStrategy};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
