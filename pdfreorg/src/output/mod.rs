//! Output formatting and display for pdfreorg.
//!
//! This module handles all user-facing output:
//! - Per-file status lines
//! - Error and warning display
//! - The end-of-run summary
//!
//! # Examples
//!
//! ```no_run
//! use pdfreorg::output::OutputFormatter;
//! use pdfreorg::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Processing scans/ballot0001.pdf");
//! formatter.success("Saved reorganized/ballot0001.pdf");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::batch::BatchReport;

/// Summary lines for a finished run.
pub fn summary_lines(report: &BatchReport) -> Vec<String> {
    vec![
        format!("Files found:     {}", report.files_found),
        format!("Succeeded:       {}", report.succeeded),
        format!("Failed:          {}", report.failed),
        format!("Pages written:   {}", report.pages_written),
        format!("Elapsed:         {:.2}s", report.elapsed.as_secs_f64()),
    ]
}

/// One `path: message` line per recorded failure.
pub fn failure_lines(report: &BatchReport) -> Vec<String> {
    report
        .failures
        .iter()
        .map(|failure| format!("{}: {}", failure.path.display(), failure.message))
        .collect()
}

/// The verdict printed after the summary.
pub fn closing_message(report: &BatchReport) -> (MessageLevel, String) {
    if !report.is_success() {
        (
            MessageLevel::Warning,
            format!("{} file(s) failed", report.failed),
        )
    } else if report.files_found > 0 {
        (
            MessageLevel::Success,
            format!("Processed {} file(s) successfully", report.succeeded),
        )
    } else {
        (MessageLevel::Warning, "No PDF files found".to_string())
    }
}

/// Display the end-of-run summary.
///
/// Failures are listed again so they are visible after a long run. In quiet
/// mode only a warning about failures is printed.
pub fn display_batch_report(formatter: &OutputFormatter, report: &BatchReport) {
    if formatter.should_print() {
        formatter.section("Summary");
        for line in summary_lines(report) {
            formatter.info(&format!("  {line}"));
        }
    }

    match closing_message(report) {
        (MessageLevel::Success, message) => formatter.success(&message),
        (_, message) => formatter.warning(&message),
    }
    if report.is_success() {
        return;
    }

    for (index, line) in failure_lines(report).iter().enumerate() {
        formatter.list_item(index + 1, line);
    }

    if formatter.is_verbose() {
        for outcome in &report.outcomes {
            formatter.detail(
                &outcome.input.display().to_string(),
                &outcome.output.display().to_string(),
            );
        }
    }
}
