//! Error types for bookshelf.
//!
//! Errors fall into a few broad groups:
//!
//! - **Input errors**: missing source directories, blank names, bad configuration
//! - **PDF errors**: files that cannot be loaded, encrypted or empty documents
//! - **Output errors**: destination conflicts, failed writes
//! - **Merge errors**: problems while assembling a collection
//!
//! Unrecognized naming conventions and unparseable numbers inside file names
//! are never errors; they resolve to the default classifier or to a sentinel.

use std::io;
use std::path::PathBuf;

/// Result type alias for bookshelf operations.
pub type Result<T> = std::result::Result<T, BookshelfError>;

/// Main error type for bookshelf operations.
#[derive(Debug, thiserror::Error)]
pub enum BookshelfError {
    /// Source directory (or shelf) does not exist.
    #[error("Source directory not found: {}", path.display())]
    SourceNotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// A path that should be a directory is something else.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },

    /// The caller violated an input contract (blank identifier, empty path).
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong.
        message: String,
    },

    /// A naming pattern was requested by a name no classifier carries.
    #[error("Unknown naming pattern: {name}\n  Run 'bookshelf patterns' to list the available ones")]
    UnknownPattern {
        /// Requested name.
        name: String,
    },

    /// Failed to load a PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF has an invalid structure (e.g. no pages).
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Nothing could be merged for a collection.
    #[error("No readable PDF files to merge")]
    NoFilesToMerge,

    /// Destination already exists and overwriting was not requested.
    #[error("Output file already exists: {}", path.display())]
    OutputExists {
        /// Existing destination.
        path: PathBuf,
    },

    /// Copying a file into the shelf failed.
    #[error("Failed to copy {} to {}\n  Reason: {source}", from.display(), to.display())]
    CopyFailed {
        /// Source file.
        from: PathBuf,
        /// Destination file.
        to: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to create an output file or directory.
    #[error("Failed to create output: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to an output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Merge operation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Metadata operation failed.
    #[error("Failed to set metadata: {reason}")]
    MetadataFailed {
        /// Details about the failure.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for BookshelfError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for BookshelfError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl BookshelfError {
    /// Create a SourceNotFound error.
    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    /// Create a NotADirectory error.
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an UnknownPattern error.
    pub fn unknown_pattern(name: impl Into<String>) -> Self {
        Self::UnknownPattern { name: name.into() }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error only affects a single file.
    ///
    /// Recoverable errors are logged and the file is skipped; the rest of the
    /// collection (and the rest of the shelf) is still processed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::MetadataFailed { .. }
        )
    }

    /// Check if this error should stop all processing immediately.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. }
                | Self::InvalidConfig { .. }
                | Self::FailedToCreateOutput { .. }
                | Self::Cancelled
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SourceNotFound { .. } => 2,
            Self::NotADirectory { .. } => 2,
            Self::InvalidInput { .. } => 1,
            Self::UnknownPattern { .. } => 1,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::NoFilesToMerge => 1,
            Self::OutputExists { .. } => 4,
            Self::CopyFailed { .. } => 5,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::MetadataFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_source_not_found_display() {
        let err = BookshelfError::source_not_found("/tmp/missing");
        let msg = format!("{err}");
        assert!(msg.contains("Source directory not found"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_failed_to_load_pdf_display() {
        let err = BookshelfError::failed_to_load_pdf(PathBuf::from("bad.pdf"), "Invalid PDF header");
        let msg = format!("{err}");
        assert!(msg.contains("Failed to load PDF"));
        assert!(msg.contains("bad.pdf"));
        assert!(msg.contains("Invalid PDF header"));
    }

    #[test]
    fn test_encrypted_pdf_display() {
        let err = BookshelfError::encrypted_pdf(PathBuf::from("secret.pdf"));
        let msg = format!("{err}");
        assert!(msg.contains("encrypted"));
        assert!(msg.contains("Decrypt"));
    }

    #[test]
    fn test_unknown_pattern_display() {
        let err = BookshelfError::unknown_pattern("Springer");
        let msg = format!("{err}");
        assert!(msg.contains("Springer"));
        assert!(msg.contains("bookshelf patterns"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(
            BookshelfError::failed_to_load_pdf(PathBuf::from("bad.pdf"), "error").is_recoverable()
        );
        assert!(BookshelfError::corrupted_pdf(PathBuf::from("bad.pdf"), "error").is_recoverable());
        assert!(BookshelfError::encrypted_pdf(PathBuf::from("secret.pdf")).is_recoverable());

        assert!(!BookshelfError::NoFilesToMerge.is_recoverable());
        assert!(!BookshelfError::Cancelled.is_recoverable());
    }

    #[test]
    fn test_is_fatal() {
        assert!(BookshelfError::source_not_found("x").is_fatal());
        assert!(BookshelfError::Cancelled.is_fatal());
        assert!(
            BookshelfError::FailedToCreateOutput {
                path: PathBuf::from("shelf"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            }
            .is_fatal()
        );

        assert!(!BookshelfError::failed_to_load_pdf(PathBuf::from("bad.pdf"), "error").is_fatal());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BookshelfError::source_not_found("x").exit_code(), 2);
        assert_eq!(
            BookshelfError::failed_to_load_pdf(PathBuf::from("x"), "error").exit_code(),
            3
        );
        assert_eq!(BookshelfError::NoFilesToMerge.exit_code(), 1);
        assert_eq!(BookshelfError::output_exists(PathBuf::from("x")).exit_code(), 4);
        assert_eq!(BookshelfError::invalid_input("blank").exit_code(), 1);
        assert_eq!(BookshelfError::Cancelled.exit_code(), 130);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let err: BookshelfError = io_err.into();
        assert!(matches!(err, BookshelfError::Io { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source() {
        let err = BookshelfError::CopyFailed {
            from: PathBuf::from("a.pdf"),
            to: PathBuf::from("b.pdf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());

        let err = BookshelfError::NoFilesToMerge;
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_anyhow() {
        let err: BookshelfError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, BookshelfError::Other { .. }));
        assert_eq!(err.to_string(), "boom");
    }
}
