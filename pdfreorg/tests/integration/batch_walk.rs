//! Directory-tree runs: path mirroring, failure containment and reruns.

use pdfreorg::config::{CropMargins, Layout, PageOrder};
use pdfreorg::error::ErrorKind;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{
    files_under, labels_for, page_labels, quiet_processor, write_bytes, write_pdf,
};

fn two_page_layout() -> Layout {
    Layout::new(PageOrder::new(vec![1, 0]), CropMargins::BATCH_DEFAULT)
}

#[test]
fn test_only_pdfs_are_mirrored() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_pdf(input.path(), "a/x.pdf", 2);
    write_bytes(input.path(), "b/y.txt", b"not a document");

    let report = quiet_processor()
        .process_all(input.path(), output.path(), &two_page_layout(), false)
        .unwrap();

    assert_eq!(report.files_found, 1);
    assert!(report.is_success());
    assert_eq!(files_under(output.path()), vec![PathBuf::from("a/x.pdf")]);
    assert!(!output.path().join("b").exists());
    assert_eq!(
        page_labels(&output.path().join("a/x.pdf")),
        labels_for(&[1, 0])
    );
}

#[test]
fn test_corrupt_files_are_contained() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_pdf(input.path(), "2024/01/one.pdf", 2);
    write_pdf(input.path(), "2024/02/two.pdf", 3);
    write_pdf(input.path(), "three.pdf", 2);
    write_bytes(input.path(), "2024/01/empty.pdf", b"");
    write_bytes(input.path(), "2024/02/noise.pdf", b"\x00\x01\x02 definitely not a pdf");

    let report = quiet_processor()
        .process_all(input.path(), output.path(), &two_page_layout(), false)
        .unwrap();

    assert_eq!(report.files_found, 5);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed, 2);
    assert_eq!(report.pages_written, 6);
    assert_eq!(report.exit_code(), 1);
    assert!(
        report
            .failures
            .iter()
            .all(|f| f.kind == ErrorKind::MalformedDocument)
    );
    assert_eq!(
        files_under(output.path()),
        vec![
            PathBuf::from("2024/01/one.pdf"),
            PathBuf::from("2024/02/two.pdf"),
            PathBuf::from("three.pdf"),
        ]
    );
}

#[test]
fn test_short_document_fails_alone() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_pdf(input.path(), "a.pdf", 1);
    write_pdf(input.path(), "b.pdf", 2);

    let report = quiet_processor()
        .process_all(input.path(), output.path(), &two_page_layout(), false)
        .unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, ErrorKind::PageIndexOutOfRange);
    assert_eq!(report.failures[0].path, input.path().join("a.pdf"));
    assert!(report.failures[0].message.contains("max 0"));
    assert_eq!(files_under(output.path()), vec![PathBuf::from("b.pdf")]);
}

#[test]
fn test_rerun_overwrites_with_same_result() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_pdf(input.path(), "a/x.pdf", 2);
    write_pdf(input.path(), "b/c/y.pdf", 2);
    let processor = quiet_processor();

    let first = processor
        .process_all(input.path(), output.path(), &two_page_layout(), false)
        .unwrap();
    let files_after_first = files_under(output.path());
    let labels_after_first = page_labels(&output.path().join("b/c/y.pdf"));

    let second = processor
        .process_all(input.path(), output.path(), &two_page_layout(), false)
        .unwrap();

    assert_eq!(first.succeeded, 2);
    assert_eq!(second.succeeded, 2);
    assert_eq!(files_under(output.path()), files_after_first);
    assert_eq!(
        page_labels(&output.path().join("b/c/y.pdf")),
        labels_after_first
    );
}

#[test]
fn test_output_inside_input_is_not_reprocessed() {
    let input = TempDir::new().unwrap();
    write_pdf(input.path(), "x.pdf", 2);
    let output_root = input.path().join("reorganized");
    let processor = quiet_processor();

    processor
        .process_all(input.path(), &output_root, &two_page_layout(), false)
        .unwrap();
    let report = processor
        .process_all(input.path(), &output_root, &two_page_layout(), false)
        .unwrap();

    assert_eq!(report.files_found, 1);
    assert_eq!(files_under(&output_root), vec![PathBuf::from("x.pdf")]);
}

#[test]
fn test_dry_run_writes_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let output_root = output.path().join("never");
    write_pdf(input.path(), "a/x.pdf", 2);

    let report = quiet_processor()
        .process_all(input.path(), &output_root, &two_page_layout(), true)
        .unwrap();

    assert_eq!(report.succeeded, 1);
    assert!(!report.outcomes[0].written);
    assert!(!output_root.exists());
}

#[test]
fn test_uppercase_extension_is_ignored() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_pdf(input.path(), "SCAN.PDF", 2);

    let report = quiet_processor()
        .process_all(input.path(), output.path(), &two_page_layout(), false)
        .unwrap();

    assert_eq!(report.files_found, 0);
    assert!(files_under(output.path()).is_empty());
}
