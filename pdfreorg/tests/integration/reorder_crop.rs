//! End-to-end page selection and cropping through the single-file path.

use pdfreorg::config::{CropMargins, DEFAULT_PAGE_ORDER, Layout, PageOrder};
use pdfreorg::transform::MediaBox;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{labels_for, page_boxes, page_labels, quiet_processor, write_pdf};

#[test]
fn test_three_of_five_with_batch_margins() {
    let temp = TempDir::new().unwrap();
    let input = write_pdf(temp.path(), "ballot.pdf", 5);
    let output = temp.path().join("ballot_out.pdf");
    let layout = Layout::new(PageOrder::new(vec![4, 0, 2]), CropMargins::BATCH_DEFAULT);

    quiet_processor()
        .process_file(&input, &output, &layout, false)
        .unwrap();

    assert_eq!(page_labels(&output), labels_for(&[4, 0, 2]));
    assert_eq!(
        page_boxes(&output),
        vec![MediaBox::new(0.0, 39.0, 612.0, 738.0); 3]
    );
}

#[test]
fn test_default_layout_on_thirteen_pages() {
    let temp = TempDir::new().unwrap();
    let input = write_pdf(temp.path(), "ballot.pdf", 13);
    let output = temp.path().join("out.pdf");

    let outcome = quiet_processor()
        .process_file(&input, &output, &Layout::default(), false)
        .unwrap();

    assert_eq!(outcome.pages, 13);
    assert_eq!(page_labels(&output), labels_for(&DEFAULT_PAGE_ORDER));
}

#[rstest]
#[case::reversed(vec![2, 1, 0])]
#[case::subset(vec![1])]
#[case::repeated(vec![0, 0, 2, 0])]
#[case::identity(vec![0, 1, 2])]
fn test_output_follows_page_order(#[case] order: Vec<usize>) {
    let temp = TempDir::new().unwrap();
    let input = write_pdf(temp.path(), "in.pdf", 3);
    let output = temp.path().join("out.pdf");
    let layout = Layout::new(PageOrder::new(order.clone()), CropMargins::none());

    quiet_processor()
        .process_file(&input, &output, &layout, false)
        .unwrap();

    assert_eq!(page_labels(&output), labels_for(&order));
    for media_box in page_boxes(&output) {
        assert_eq!(media_box, MediaBox::letter());
    }
}

#[test]
fn test_repeated_page_is_cropped_once_per_copy() {
    let temp = TempDir::new().unwrap();
    let input = write_pdf(temp.path(), "in.pdf", 2);
    let output = temp.path().join("out.pdf");
    let layout = Layout::new(
        PageOrder::new(vec![1, 1, 1]),
        CropMargins::new(10.0, 20.0).unwrap(),
    );

    quiet_processor()
        .process_file(&input, &output, &layout, false)
        .unwrap();

    assert_eq!(
        page_boxes(&output),
        vec![MediaBox::new(0.0, 20.0, 612.0, 782.0); 3]
    );
}

#[test]
fn test_oversized_crop_is_written_unchanged() {
    let temp = TempDir::new().unwrap();
    let input = write_pdf(temp.path(), "in.pdf", 1);
    let output = temp.path().join("out.pdf");
    let layout = Layout::new(
        PageOrder::new(vec![0]),
        CropMargins::new(500.0, 400.0).unwrap(),
    );

    quiet_processor()
        .process_file(&input, &output, &layout, false)
        .unwrap();

    let boxes = page_boxes(&output);
    assert_eq!(boxes, vec![MediaBox::new(0.0, 400.0, 612.0, 292.0)]);
    assert!(boxes[0].is_degenerate());
}
