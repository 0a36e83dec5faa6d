//! PDF writing and saving operations.
//!
//! Writes are atomic by default: the document is serialized to a `.tmp`
//! sibling of the target and renamed into place once fully flushed, so an
//! interrupted or failed write never leaves a truncated PDF at the target.
//!
//! # Examples
//!
//! ```no_run
//! use pdfreorg::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let stats = PdfWriter::new().save_with_stats(doc, Path::new("out/a/ballot0001.pdf"))?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::error::{ReorgError, Result};
use crate::io::reader::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compress streams before writing.
    pub compress: bool,

    /// Renumber objects sequentially before writing.
    pub renumber: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            renumber: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without atomic writes.
    pub fn non_atomic() -> Self {
        Self {
            options: WriteOptions {
                atomic: false,
                ..Default::default()
            },
        }
    }

    /// Save a PDF document to a file, overwriting any existing file.
    ///
    /// # Errors
    ///
    /// See [`PdfWriter::save_with_stats`].
    pub fn save(&self, document: Document, path: &Path) -> Result<()> {
        self.save_with_stats(document, path).map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// Missing parent directories are created first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A parent directory cannot be created (`FailedToCreateDirectory`)
    /// - The file cannot be created (`FailedToCreateOutput`)
    /// - Serialization, flushing or the final rename fails (`FailedToWrite`)
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn save_with_stats(&self, mut document: Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();
        let options = &self.options;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }

        if options.compress {
            document.compress();
        }

        if options.renumber {
            document.renumber_objects();
        }

        let write_path = if options.atomic {
            temp_path_for(path)
        } else {
            path.to_path_buf()
        };

        let result = write_document(&mut document, &write_path, options.buffer_size);
        if let Err(err) = result {
            if options.atomic {
                let _ = std::fs::remove_file(&write_path);
            }
            return Err(err);
        }

        if options.atomic {
            std::fs::rename(&write_path, path).map_err(|e| {
                let _ = std::fs::remove_file(&write_path);
                ReorgError::FailedToWrite {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let stats = WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path.to_path_buf(),
            compressed: options.compress,
        };
        debug!(bytes = stats.file_size, "Wrote document");

        Ok(stats)
    }
}

/// Create `dir` and all missing ancestors. Succeeds if it already exists.
///
/// # Errors
///
/// Returns `FailedToCreateDirectory` if creation fails or `dir` is a file.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| ReorgError::FailedToCreateDirectory {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// `<name>.tmp` next to `path`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_document(document: &mut Document, path: &Path, buffer_size: usize) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| ReorgError::FailedToCreateOutput {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);

    document
        .save_to(&mut writer)
        .map_err(|e| ReorgError::FailedToWrite {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;

    writer.flush().map_err(|e| ReorgError::FailedToWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
