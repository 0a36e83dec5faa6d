//! Configuration module for pdfreorg.
//!
//! The page order and crop margins of a run are plain values, built once from
//! defaults, an optional JSON config file and command-line overrides, then
//! handed to the transformer and the batch driver explicitly.
//!
//! - [`PageOrder`]: which source pages appear in the output, and in what order
//! - [`CropMargins`]: points removed from the top and bottom of every page
//! - [`Layout`]: the two together
//! - [`Config`]: a validated description of one complete run

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ReorgError, Result};
use crate::walker::same_directory;

/// Longest page order [`PageOrder::parse`] accepts.
pub const MAX_PAGE_ORDER_LEN: usize = 100_000;

/// Page order used when none is configured.
///
/// Sized for a 13-page source folded as a booklet: the odd half ascending,
/// then the even half descending.
pub const DEFAULT_PAGE_ORDER: [usize; 13] = [0, 1, 2, 4, 6, 8, 10, 12, 11, 9, 7, 5, 3];

/// Zero-based indices into a source document's pages.
///
/// Indices may repeat or be omitted. Range checking against a concrete
/// document happens in the transformer, since page counts vary per file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageOrder(Vec<usize>);

impl PageOrder {
    /// Create a page order from explicit indices.
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Parse a page order string.
    ///
    /// Items are separated by commas. Each item is either a single zero-based
    /// index or an inclusive range `a-b`. A range whose start is greater than
    /// its end expands in descending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty or an item is not a number or
    /// a well-formed range.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfreorg::config::PageOrder;
    ///
    /// let order = PageOrder::parse("0-2,4,12-10").unwrap();
    /// assert_eq!(order.as_slice(), &[0, 1, 2, 4, 12, 11, 10]);
    /// ```
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        if s.trim().is_empty() {
            bail!("Page order cannot be empty");
        }

        let mut indices = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                bail!("Empty item in page order: '{s}'");
            }

            if part.contains('-') {
                let parts: Vec<&str> = part.split('-').collect();
                if parts.len() != 2 {
                    bail!("Invalid page range format: {part}. Expected format like '2-5'");
                }

                let start: usize = parts[0]
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page index: {}", parts[0]))?;
                let end: usize = parts[1]
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page index: {}", parts[1]))?;

                let span = start.abs_diff(end);
                if span >= MAX_PAGE_ORDER_LEN.saturating_sub(indices.len()) {
                    bail!("Page order is longer than {MAX_PAGE_ORDER_LEN} pages");
                }

                if start <= end {
                    indices.extend(start..=end);
                } else {
                    indices.extend((end..=start).rev());
                }
            } else {
                let index: usize = part
                    .parse()
                    .with_context(|| format!("Invalid page index: {part}"))?;
                indices.push(index);
            }
        }

        Ok(Self(indices))
    }

    /// The indices in output order.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Number of pages the output will have.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the order selects no pages at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest index referenced, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.0.iter().copied().max()
    }

    /// Check whether this order uses every index in `0..page_count` exactly once.
    pub fn is_permutation_of(&self, page_count: usize) -> bool {
        if self.0.len() != page_count {
            return false;
        }
        let mut seen = vec![false; page_count];
        for &index in &self.0 {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

impl Default for PageOrder {
    fn default() -> Self {
        Self(DEFAULT_PAGE_ORDER.to_vec())
    }
}

impl fmt::Display for PageOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        f.write_str(&items.join(","))
    }
}

/// Amounts, in points, removed from the top and bottom edge of each page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropMargins {
    /// Points removed from the top edge.
    pub top: f32,
    /// Points removed from the bottom edge.
    pub bottom: f32,
}

impl CropMargins {
    /// Margins used for batch runs when nothing else is configured.
    pub const BATCH_DEFAULT: Self = Self {
        top: 54.0,
        bottom: 39.0,
    };

    /// Create validated crop margins.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either value is negative, NaN or infinite.
    /// Margins larger than the page are accepted; see
    /// [`MediaBox::is_degenerate`](crate::transform::MediaBox::is_degenerate).
    pub fn new(top: f32, bottom: f32) -> Result<Self> {
        for (edge, value) in [("top", top), ("bottom", bottom)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ReorgError::invalid_config(format!(
                    "Crop {edge} must be a non-negative number of points, got {value}"
                )));
            }
        }
        Ok(Self { top, bottom })
    }

    /// No cropping at all.
    pub fn none() -> Self {
        Self {
            top: 0.0,
            bottom: 0.0,
        }
    }
}

impl Default for CropMargins {
    /// Half an inch top and bottom.
    fn default() -> Self {
        Self {
            top: 36.0,
            bottom: 36.0,
        }
    }
}

/// How every document in a run is transformed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Source pages to emit, in output order.
    pub page_order: PageOrder,
    /// Margins cropped from every emitted page.
    pub crop: CropMargins,
}

impl Layout {
    /// Create a layout from an order and margins.
    pub fn new(page_order: PageOrder, crop: CropMargins) -> Self {
        Self { page_order, crop }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            page_order: PageOrder::default(),
            crop: CropMargins::BATCH_DEFAULT,
        }
    }
}

/// Optional settings read from a JSON config file.
///
/// Every field is optional; missing fields fall back to the built-in defaults
/// and command-line flags override whatever the file sets.
///
/// ```json
/// { "page_order": [0, 1, 2, 4, 6, 8, 10, 12, 11, 9, 7, 5, 3],
///   "crop_top": 54, "crop_bottom": 39, "expected_pages": 13 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutFile {
    /// Page order override.
    pub page_order: Option<PageOrder>,
    /// Top crop override, in points.
    pub crop_top: Option<f32>,
    /// Bottom crop override, in points.
    pub crop_bottom: Option<f32>,
    /// Number of pages the order must cover.
    pub expected_pages: Option<usize>,
}

impl LayoutFile {
    /// Parse a config file from its JSON text.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("Config file is not valid JSON for pdfreorg")
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist and `InvalidConfig`
    /// if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.try_exists()? {
            return Err(ReorgError::file_not_found(path));
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let file = Self::from_json(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(file)
    }

    /// Apply this file on top of a base layout.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the resulting crop margins are invalid.
    pub fn apply(&self, base: Layout) -> Result<Layout> {
        let page_order = self.page_order.clone().unwrap_or(base.page_order);
        let crop = CropMargins::new(
            self.crop_top.unwrap_or(base.crop.top),
            self.crop_bottom.unwrap_or(base.crop.bottom),
        )?;
        Ok(Layout { page_order, crop })
    }
}

/// What a run operates on.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// Mirror every PDF under `input_root` into `output_root`.
    Tree {
        /// Directory to walk.
        input_root: PathBuf,
        /// Directory receiving the mirrored tree.
        output_root: PathBuf,
    },
    /// Transform individual files; the first failure ends the run.
    Files {
        /// Input files, in processing order.
        inputs: Vec<PathBuf>,
        /// Explicit output path, only valid with a single input.
        output: Option<PathBuf>,
    },
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Files or tree to process.
    pub target: Target,

    /// Page order and crop margins.
    pub layout: Layout,

    /// If set, the page order must select exactly this many pages.
    pub expected_pages: Option<usize>,

    /// Load and transform, but write nothing.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,
}

impl Config {
    /// Create a configuration with default layout and output settings.
    pub fn new(target: Target) -> Self {
        Self {
            target,
            layout: Layout::default(),
            expected_pages: None,
            dry_run: false,
            verbose: false,
            quiet: false,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The page order is empty
    /// - The page order length differs from `expected_pages`
    /// - Input and output roots are the same directory
    /// - An explicit output is combined with several inputs, or equals the input
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.layout.page_order.is_empty() {
            bail!("Page order must select at least one page");
        }

        if let Some(expected) = self.expected_pages
            && self.layout.page_order.len() != expected
        {
            bail!(
                "Page order lists {} pages, but documents are expected to have {expected}",
                self.layout.page_order.len()
            );
        }

        match &self.target {
            Target::Tree {
                input_root,
                output_root,
            } => {
                if input_root == output_root || same_directory(input_root, output_root) {
                    bail!(
                        "Output directory cannot be the same as the input directory: {}",
                        input_root.display()
                    );
                }
            }
            Target::Files { inputs, output } => {
                if inputs.is_empty() {
                    bail!("No input files specified");
                }
                if let Some(output) = output {
                    if inputs.len() > 1 {
                        bail!("--output can only be used with a single input file");
                    }
                    if inputs.iter().any(|input| input == output) {
                        bail!(
                            "Output file cannot be the same as the input file: {}",
                            output.display()
                        );
                    }
                }
            }
        }

        Ok(())
    }

    /// Check if progress output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
