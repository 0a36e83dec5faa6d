//! Batch driver.
//!
//! [`BatchProcessor::process_all`] mirrors an input tree into an output tree,
//! one file at a time. A failure on one file is reported and recorded, then
//! the run moves on. [`BatchProcessor::process_file`] handles a single file
//! and returns its error to the caller instead.
//!
//! # Examples
//!
//! ```no_run
//! use pdfreorg::batch::BatchProcessor;
//! use pdfreorg::config::Layout;
//! use pdfreorg::output::OutputFormatter;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let processor = BatchProcessor::new(OutputFormatter::default());
//! let report = processor.process_all(
//!     Path::new("scans"),
//!     Path::new("reorganized"),
//!     &Layout::default(),
//!     false,
//! )?;
//! std::process::exit(report.exit_code());
//! # }
//! ```

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

use crate::config::{Config, Layout, Target};
use crate::error::{ErrorKind, ReorgError, Result};
use crate::io::{PdfReader, PdfWriter, format_file_size};
use crate::output::OutputFormatter;
use crate::transform::reorder_and_crop;
use crate::walker::{discover, resolve_patterns};

/// Suffix appended to the file stem of single-file outputs.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_reorganized";

/// A file that was transformed.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// Source file.
    pub input: PathBuf,
    /// Destination file.
    pub output: PathBuf,
    /// Pages in the transformed document.
    pub pages: usize,
    /// Bytes written, zero on a dry run.
    pub bytes: u64,
    /// False when the run was a dry run.
    pub written: bool,
}

/// A file that could not be transformed.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    /// File, or directory entry, that failed.
    pub path: PathBuf,
    /// Error classification.
    pub kind: ErrorKind,
    /// Rendered error message.
    pub message: String,
}

impl FileFailure {
    fn new(path: impl Into<PathBuf>, err: &ReorgError) -> Self {
        Self {
            path: path.into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Summary of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// PDF files discovered.
    pub files_found: usize,
    /// Files transformed (and written, unless dry run).
    pub succeeded: usize,
    /// Files and directory entries that failed.
    pub failed: usize,
    /// Pages across all transformed files.
    pub pages_written: usize,
    /// Wall-clock time of the run.
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// Per-file successes, in processing order.
    pub outcomes: Vec<FileOutcome>,
    /// Per-file failures, in processing order.
    pub failures: Vec<FileFailure>,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl BatchReport {
    fn record_success(&mut self, outcome: FileOutcome) {
        self.succeeded += 1;
        self.pages_written += outcome.pages;
        self.outcomes.push(outcome);
    }

    fn record_failure(&mut self, failure: FileFailure) {
        self.failed += 1;
        self.failures.push(failure);
    }

    /// True when no file failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Process exit status: 0 if every file succeeded, otherwise 1.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}

/// `<stem>_reorganized.pdf` in the input's directory.
pub fn default_output_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}{DEFAULT_OUTPUT_SUFFIX}.pdf"))
}

/// Drives the reader, transformer and writer over one or more files.
#[derive(Debug, Default)]
pub struct BatchProcessor {
    formatter: OutputFormatter,
    reader: PdfReader,
    writer: PdfWriter,
}

impl BatchProcessor {
    /// Create a processor reporting through `formatter`.
    pub fn new(formatter: OutputFormatter) -> Self {
        Self {
            formatter,
            reader: PdfReader::new(),
            writer: PdfWriter::new(),
        }
    }

    /// Replace the writer used for output files.
    pub fn with_writer(mut self, writer: PdfWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Load `input`, transform it with `layout`, and write it to `output`.
    ///
    /// On a dry run the document is loaded and transformed but nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// Any load, transform or write error, unchanged.
    #[instrument(level = "info", skip_all, fields(input = %input.display(), output = %output.display()))]
    pub fn process_file(
        &self,
        input: &Path,
        output: &Path,
        layout: &Layout,
        dry_run: bool,
    ) -> Result<FileOutcome> {
        let loaded = self.reader.load(input)?;
        let document = reorder_and_crop(&loaded.document, layout)?;
        let pages = document.get_pages().len();

        if dry_run {
            info!(pages, "Dry run, not writing");
            return Ok(FileOutcome {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
                pages,
                bytes: 0,
                written: false,
            });
        }

        let stats = self.writer.save_with_stats(document, output)?;
        info!(pages, bytes = stats.file_size, "Saved reorganized document");

        Ok(FileOutcome {
            input: input.to_path_buf(),
            output: stats.output_path,
            pages,
            bytes: stats.file_size,
            written: true,
        })
    }

    /// Mirror every PDF under `input_root` into `output_root`.
    ///
    /// Files are processed sequentially. A failing file is reported and
    /// recorded in the returned report; it never stops the run.
    ///
    /// # Errors
    ///
    /// Only errors about the roots themselves: `input_root` missing or not a
    /// directory, or `output_root` resolving to the same directory.
    #[instrument(level = "info", skip_all, fields(input_root = %input_root.display(), output_root = %output_root.display()))]
    pub fn process_all(
        &self,
        input_root: &Path,
        output_root: &Path,
        layout: &Layout,
        dry_run: bool,
    ) -> Result<BatchReport> {
        let start = Instant::now();
        let discovery = discover(input_root, output_root)?;

        let mut report = BatchReport {
            files_found: discovery.jobs.len(),
            ..Default::default()
        };

        self.formatter.info(&format!(
            "Found {} PDF file(s) under {}",
            report.files_found,
            input_root.display()
        ));

        for err in &discovery.errors {
            let path = match err {
                ReorgError::Traversal { path, .. } => path.as_path(),
                _ => input_root,
            };
            self.report_failure(path, err);
            report.record_failure(FileFailure::new(path, err));
        }

        let total = discovery.jobs.len();
        for (index, job) in discovery.jobs.iter().enumerate() {
            self.formatter.info(&format!(
                "[{}/{total}] Processing {}",
                index + 1,
                job.input.display()
            ));

            match self.process_file(&job.input, &job.output, layout, dry_run) {
                Ok(outcome) => {
                    self.report_success(&outcome);
                    report.record_success(outcome);
                }
                Err(err) => {
                    self.report_failure(&job.input, &err);
                    report.record_failure(FileFailure::new(&job.input, &err));
                }
            }
        }

        report.elapsed = start.elapsed();
        info!(
            found = report.files_found,
            succeeded = report.succeeded,
            failed = report.failed,
            "Batch finished"
        );
        Ok(report)
    }

    /// Process explicit input files, stopping at the first failure.
    ///
    /// Patterns are glob-expanded. Without `output`, each file is written to
    /// [`default_output_for`] its input.
    ///
    /// # Errors
    ///
    /// The first error encountered, unchanged.
    pub fn process_inputs(
        &self,
        patterns: &[PathBuf],
        output: Option<&Path>,
        layout: &Layout,
        dry_run: bool,
    ) -> Result<BatchReport> {
        let start = Instant::now();
        let inputs = resolve_patterns(patterns.iter().map(|p| p.to_string_lossy()))?;

        if output.is_some() && inputs.len() > 1 {
            return Err(ReorgError::invalid_config(format!(
                "--output can only be used with a single input file, but {} files matched",
                inputs.len()
            )));
        }

        let mut report = BatchReport {
            files_found: inputs.len(),
            ..Default::default()
        };

        for input in &inputs {
            let destination = match output {
                Some(path) => path.to_path_buf(),
                None => default_output_for(input),
            };

            self.formatter
                .info(&format!("Processing {}", input.display()));
            let outcome = self.process_file(input, &destination, layout, dry_run)?;
            self.report_success(&outcome);
            report.record_success(outcome);
        }

        report.elapsed = start.elapsed();
        Ok(report)
    }

    /// Validate `config` and run it.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when validation fails, otherwise as
    /// [`process_all`](Self::process_all) or
    /// [`process_inputs`](Self::process_inputs).
    pub fn run(&self, config: &Config) -> Result<BatchReport> {
        config.validate()?;

        match &config.target {
            Target::Tree {
                input_root,
                output_root,
            } => self.process_all(input_root, output_root, &config.layout, config.dry_run),
            Target::Files { inputs, output } => {
                self.process_inputs(inputs, output.as_deref(), &config.layout, config.dry_run)
            }
        }
    }

    fn report_success(&self, outcome: &FileOutcome) {
        if outcome.written {
            self.formatter.success(&format!(
                "Saved {} ({} pages)",
                outcome.output.display(),
                outcome.pages
            ));
            self.formatter.debug(&format!(
                "{} -> {}, {}",
                outcome.input.display(),
                outcome.output.display(),
                format_file_size(outcome.bytes)
            ));
        } else {
            self.formatter.success(&format!(
                "Would write {} ({} pages)",
                outcome.output.display(),
                outcome.pages
            ));
        }
    }

    fn report_failure(&self, path: &Path, err: &ReorgError) {
        warn!(path = %path.display(), kind = ?err.kind(), error = %err, "Failed to process file");
        self.formatter
            .error(&format!("{}: {err}", path.display()));
    }
}
