//! pdfreorg - Reorder and crop the pages of PDF documents in bulk.
//!
//! Every document in a batch gets the same treatment: its pages are selected
//! and reordered by a fixed page order, and a fixed margin is cropped from the
//! top and bottom of each page's media box. Batch runs mirror an input
//! directory tree into an output tree; a file that fails is reported and
//! skipped without stopping the run.
//!
//! # Examples
//!
//! ## Batch Run
//!
//! ```no_run
//! use pdfreorg::batch::BatchProcessor;
//! use pdfreorg::config::{Config, Target};
//! use pdfreorg::output::{OutputFormatter, display_batch_report};
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new(Target::Tree {
//!     input_root: PathBuf::from("scans"),
//!     output_root: PathBuf::from("reorganized"),
//! });
//!
//! let formatter = OutputFormatter::from_config(&config);
//! let processor = BatchProcessor::new(formatter.clone());
//! let report = processor.run(&config)?;
//! display_batch_report(&formatter, &report);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use pdfreorg::config::{CropMargins, Layout, PageOrder};
//! use pdfreorg::io::{PdfReader, PdfWriter};
//! use pdfreorg::transform::reorder_and_crop;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let layout = Layout::new(PageOrder::parse("4,0,2")?, CropMargins::new(54.0, 39.0)?);
//!
//! let loaded = PdfReader::new().load(Path::new("input.pdf"))?;
//! let output = reorder_and_crop(&loaded.document, &layout)?;
//! PdfWriter::new().save(output, Path::new("output.pdf"))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod error;
pub mod io;
pub mod output;
pub mod transform;
pub mod walker;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use batch::{BatchProcessor, BatchReport};
pub use config::{Config, CropMargins, Layout, PageOrder};
pub use error::{ErrorKind, ReorgError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
