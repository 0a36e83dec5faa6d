//! Page transformation.
//!
//! Turns one loaded document into a new one whose pages are the selected
//! source pages, in the configured order, with top and bottom margins cropped
//! from each page's media box. Nothing here touches the filesystem.
//!
//! # Examples
//!
//! ```no_run
//! use pdfreorg::config::Layout;
//! use pdfreorg::io::PdfReader;
//! use pdfreorg::transform::reorder_and_crop;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("ballot0001.pdf"))?;
//! let output = reorder_and_crop(&loaded.document, &Layout::default())?;
//! println!("{} pages", output.get_pages().len());
//! # Ok(())
//! # }
//! ```

pub mod media_box;
pub mod reorder;

pub use media_box::MediaBox;
pub use reorder::{media_boxes, reorder_and_crop};
