//! pdfreorg - Reorder and crop the pages of PDF documents in bulk.

mod cli;

use clap::Parser;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use pdfreorg::batch::BatchProcessor;
use pdfreorg::config::{Config, Target};
use pdfreorg::error::{ReorgError, Result};
use pdfreorg::output::{OutputFormatter, display_batch_report};

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.common().verbose);

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(err.exit_code());
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,pdfreorg=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic. Returns the process exit code.
fn run(cli: &Cli) -> Result<i32> {
    let config = cli.to_config()?;
    let json = cli.common().json;
    debug!(
        order = %config.layout.page_order,
        crop_top = config.layout.crop.top,
        crop_bottom = config.layout.crop.bottom,
        dry_run = config.dry_run,
        "Resolved configuration"
    );

    let formatter = if json {
        OutputFormatter::silent()
    } else {
        OutputFormatter::from_config(&config)
    };

    if formatter.should_print() {
        print_header(&formatter, &config);
    }

    let processor = BatchProcessor::new(formatter.clone());
    let report = processor.run(&config)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| ReorgError::other(format!("Failed to render report: {e}")))?;
        println!("{rendered}");
    } else {
        display_batch_report(&formatter, &report);
        if config.dry_run && formatter.should_print() {
            formatter.blank_line();
            formatter.info("Dry run: no files were written");
        }
    }

    Ok(report.exit_code())
}

fn print_header(formatter: &OutputFormatter, config: &Config) {
    formatter.section(&format!("{} v{}", pdfreorg::NAME, pdfreorg::VERSION));
    formatter.blank_line();

    if let Target::Tree {
        input_root,
        output_root,
    } = &config.target
    {
        formatter.detail("Input", &input_root.display().to_string());
        formatter.detail("Output", &output_root.display().to_string());
    }
    formatter.detail("Page order", &config.layout.page_order.to_string());
    formatter.detail(
        "Crop",
        &format!(
            "top {} pt, bottom {} pt",
            config.layout.crop.top, config.layout.crop.bottom
        ),
    );
    if let Some(expected) = config.expected_pages {
        formatter.detail("Expected pages", &expected.to_string());
    }
}
