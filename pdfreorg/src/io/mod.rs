//! I/O operations for pdfreorg.
//!
//! This module handles loading PDF documents from disk and writing
//! transformed documents back out.
//!
//! # Examples
//!
//! ```no_run
//! use pdfreorg::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("input.pdf"))?;
//! PdfWriter::new().save(loaded.document, Path::new("output.pdf"))?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader, format_file_size};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics, ensure_dir};
