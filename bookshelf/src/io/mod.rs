//! File system and PDF input/output.

pub mod fs;
pub mod reader;
pub mod writer;

pub use fs::{FileInfo, FileSystem, LocalFileSystem};
pub use reader::{LoadResult, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
