//! CLI argument parsing for pdfreorg.
//!
//! Settings are layered: built-in defaults, then a JSON layout file
//! (`--config`), then individual flags or their environment variables.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdfreorg::config::{Config, CropMargins, Layout, LayoutFile, PageOrder, Target};
use pdfreorg::error::Result;

/// Reorder and crop the pages of PDF documents in bulk.
///
/// Every document gets the same page order and the same top and bottom crop.
/// The default order suits 13-page documents printed as booklets.
#[derive(Parser, Debug)]
#[command(name = "pdfreorg")]
#[command(version)]
#[command(about = "Reorder and crop the pages of PDF documents in bulk", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Operating modes.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mirror every PDF under INPUT_ROOT into OUTPUT_ROOT
    ///
    /// Directory structure is kept. Only files ending in `.pdf` (lowercase)
    /// are processed; anything else is left alone. A file that fails is
    /// reported and skipped, and the exit status is 1 if any file failed.
    ///
    /// Example:
    ///   pdfreorg batch scans/ reorganized/
    Batch(BatchArgs),

    /// Transform individual files
    ///
    /// Each FILE is written to FILE_reorganized.pdf next to it unless
    /// --output is given. The first failure ends the run.
    ///
    /// Examples:
    ///   pdfreorg file ballot0001.pdf -o out.pdf
    ///   pdfreorg file 'scans/*.pdf'
    File(FileArgs),
}

/// Arguments of `pdfreorg batch`.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory to walk
    #[arg(value_name = "INPUT_ROOT")]
    pub input_root: PathBuf,

    /// Directory receiving the mirrored tree
    #[arg(value_name = "OUTPUT_ROOT")]
    pub output_root: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments of `pdfreorg file`.
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Input PDF files or glob patterns
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Output file path (single input only)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// Page order as zero-based indices, e.g. "0,1,2,4-12" or "12-0"
    ///
    /// Indices may repeat or be omitted. Defaults to
    /// 0,1,2,4,6,8,10,12,11,9,7,5,3.
    #[arg(long, value_name = "ORDER", env = "PDFREORG_ORDER")]
    pub order: Option<String>,

    /// Points to crop from the top of every page [default: 54]
    #[arg(long, value_name = "POINTS", env = "PDFREORG_CROP_TOP")]
    pub crop_top: Option<f32>,

    /// Points to crop from the bottom of every page [default: 39]
    #[arg(long, value_name = "POINTS", env = "PDFREORG_CROP_BOTTOM")]
    pub crop_bottom: Option<f32>,

    /// JSON layout file with page_order, crop_top, crop_bottom, expected_pages
    ///
    /// Flags given on the command line override values from the file.
    #[arg(long, value_name = "FILE", env = "PDFREORG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Require the page order to select exactly N pages
    #[arg(long, value_name = "N")]
    pub expect_pages: Option<usize>,

    /// Load and transform, but write nothing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the run report as JSON on stdout instead of status lines
    #[arg(long)]
    pub json: bool,

    /// Show per-file details; also enables debug logs for pdfreorg
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Options shared by every subcommand.
    pub fn common(&self) -> &CommonArgs {
        match &self.command {
            Command::Batch(args) => &args.common,
            Command::File(args) => &args.common,
        }
    }

    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The layout file is missing or invalid
    /// - The page order cannot be parsed
    /// - A crop margin is negative or not finite
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<Config> {
        let common = self.common();

        let mut layout = Layout::default();
        let mut expected_pages = None;

        if let Some(path) = &common.config {
            let file = LayoutFile::load(path)?;
            layout = file.apply(layout)?;
            expected_pages = file.expected_pages;
        }

        if let Some(order) = &common.order {
            layout.page_order = PageOrder::parse(order)?;
        }

        if common.crop_top.is_some() || common.crop_bottom.is_some() {
            layout.crop = CropMargins::new(
                common.crop_top.unwrap_or(layout.crop.top),
                common.crop_bottom.unwrap_or(layout.crop.bottom),
            )?;
        }

        let target = match &self.command {
            Command::Batch(args) => Target::Tree {
                input_root: args.input_root.clone(),
                output_root: args.output_root.clone(),
            },
            Command::File(args) => Target::Files {
                inputs: args.inputs.clone(),
                output: args.output.clone(),
            },
        };

        let config = Config {
            target,
            layout,
            expected_pages: common.expect_pages.or(expected_pages),
            dry_run: common.dry_run,
            verbose: common.verbose,
            quiet: common.quiet,
        };

        config.validate()?;

        Ok(config)
    }
}
