//! Error types for pdfreorg.
//!
//! Every failure carries enough context (paths, page indices) to be shown to
//! the user as-is. Errors are grouped into a small set of [`ErrorKind`]s so the
//! batch driver can decide what is contained per file and what aborts a run.
//!
//! # Error Categories
//!
//! - **Not found**: input roots or files that do not exist
//! - **Page index**: a page order that reaches past the end of a document
//! - **Malformed**: documents that cannot be parsed or have a broken page tree
//! - **I/O**: directory creation, output writes and tree traversal
//! - **Config**: invalid page orders, crop margins or argument combinations

use serde::Serialize;
use std::io;
use std::path::PathBuf;

/// Result type alias for pdfreorg operations.
pub type Result<T> = std::result::Result<T, ReorgError>;

/// Coarse classification of a [`ReorgError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An input root or file does not exist (or is the wrong kind of entry).
    FileNotFound,
    /// A page order index is past the end of the source document.
    PageIndexOutOfRange,
    /// The source document cannot be parsed or its structure is unusable.
    MalformedDocument,
    /// Creating directories, writing output or walking the tree failed.
    IoFailure,
    /// The run configuration itself is invalid.
    Config,
}

/// Main error type for pdfreorg operations.
#[derive(Debug, thiserror::Error)]
pub enum ReorgError {
    /// Input file or directory was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path that does not exist.
        path: PathBuf,
    },

    /// Expected a file but found something else.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// Expected a directory but found something else.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },

    /// The file could not be parsed as a PDF document.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    MalformedDocument {
        /// Path to the PDF file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// The document is encrypted and cannot be rewritten.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedDocument {
        /// Path to the PDF file.
        path: PathBuf,
    },

    /// A page order index does not exist in the source document.
    #[error(
        "Page index {index} is out of range (max {})",
        max_index_label(*page_count)
    )]
    PageIndexOutOfRange {
        /// The offending zero-based index.
        index: usize,
        /// Number of pages in the source document.
        page_count: usize,
    },

    /// A single page object is unusable (missing or invalid media box, ...).
    #[error("Invalid page at index {page}: {reason}")]
    MalformedPage {
        /// Zero-based index of the page in the source document.
        page: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// The document's catalog or page tree could not be rewritten.
    #[error("Invalid page tree: {reason}")]
    PageTree {
        /// What is wrong with it.
        reason: String,
    },

    /// An output directory could not be created.
    #[error("Failed to create directory: {}\n  Reason: {source}", path.display())]
    FailedToCreateDirectory {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The output file could not be created.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Serializing or flushing the output document failed.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A directory entry could not be read while walking the input tree.
    #[error("Failed to read directory entry under: {}\n  Reason: {source}", path.display())]
    Traversal {
        /// Path being visited when the error occurred.
        path: PathBuf,
        /// Underlying walkdir error.
        source: walkdir::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// An input glob pattern could not be parsed or expanded.
    #[error("Invalid input pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as given.
        pattern: String,
        /// Parser message.
        reason: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

fn max_index_label(page_count: usize) -> String {
    match page_count.checked_sub(1) {
        Some(max) => max.to_string(),
        None => "none, document has no pages".to_string(),
    }
}

impl From<anyhow::Error> for ReorgError {
    fn from(err: anyhow::Error) -> Self {
        Self::invalid_config(format!("{err:#}"))
    }
}

impl ReorgError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// Create a NotADirectory error.
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create a MalformedDocument error.
    pub fn malformed_document(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a MalformedPage error.
    pub fn malformed_page(page: usize, reason: impl Into<String>) -> Self {
        Self::MalformedPage {
            page,
            reason: reason.into(),
        }
    }

    /// Create a PageTree error.
    pub fn page_tree(reason: impl Into<String>) -> Self {
        Self::PageTree {
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

    /// Largest valid page index when this is a `PageIndexOutOfRange` error.
    ///
    /// `None` for any other error, and for a document without pages.
    pub fn max_index(&self) -> Option<usize> {
        match self {
            Self::PageIndexOutOfRange { page_count, .. } => page_count.checked_sub(1),
            _ => None,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } | Self::NotAFile { .. } | Self::NotADirectory { .. } => {
                ErrorKind::FileNotFound
            }
            Self::PageIndexOutOfRange { .. } => ErrorKind::PageIndexOutOfRange,
            Self::MalformedDocument { .. }
            | Self::EncryptedDocument { .. }
            | Self::MalformedPage { .. }
            | Self::PageTree { .. } => ErrorKind::MalformedDocument,
            Self::FailedToCreateDirectory { .. }
            | Self::FailedToCreateOutput { .. }
            | Self::FailedToWrite { .. }
            | Self::Traversal { .. }
            | Self::Io(_) => ErrorKind::IoFailure,
            Self::InvalidConfig { .. } | Self::InvalidPattern { .. } | Self::Other { .. } => {
                ErrorKind::Config
            }
        }
    }

    /// Check if this error only concerns a single file.
    ///
    /// Recoverable errors are recorded by the batch driver and processing moves
    /// on to the next file. Configuration errors apply to every file and are
    /// not recoverable.
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::Config
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Config => 1,
            ErrorKind::FileNotFound => 2,
            ErrorKind::MalformedDocument => 3,
            ErrorKind::PageIndexOutOfRange => 4,
            ErrorKind::IoFailure => 5,
        }
    }
}
