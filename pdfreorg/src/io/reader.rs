//! PDF reading and loading operations.
//!
//! # Examples
//!
//! ```no_run
//! use pdfreorg::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("ballot0001.pdf"))?;
//! println!("{} pages in {:?}", loaded.page_count, loaded.load_time);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::error::{ReorgError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// Loads PDF documents from disk.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist (`FileNotFound`) or is a directory (`NotAFile`)
    /// - The file is not a parseable PDF (`MalformedDocument`)
    /// - The PDF is encrypted (`EncryptedDocument`)
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_path_exists(path)?;

        let start = Instant::now();
        let path_buf = path.to_path_buf();

        let document = Document::load(path).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                ReorgError::EncryptedDocument {
                    path: path_buf.clone(),
                }
            } else {
                ReorgError::malformed_document(path_buf.clone(), err_msg)
            }
        })?;

        if document.trailer.has(b"Encrypt") {
            return Err(ReorgError::EncryptedDocument { path: path_buf });
        }

        let loaded = LoadedPdf::new(document, path_buf, start.elapsed());
        debug!(
            pages = loaded.page_count,
            bytes = loaded.file_size,
            "Loaded document"
        );

        Ok(loaded)
    }

    /// Check that `path` names an existing regular file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` or `NotAFile`.
    pub fn check_path_exists(path: &Path) -> Result<()> {
        if !path.try_exists()? {
            return Err(ReorgError::file_not_found(path));
        }

        if path.is_dir() {
            return Err(ReorgError::not_a_file(path));
        }

        Ok(())
    }
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
