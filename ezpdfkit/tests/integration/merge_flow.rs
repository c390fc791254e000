//! Integration tests for merging.

use ezpdfkit::config::{CompressionLevel, Config};
use ezpdfkit::merge::merge_documents;
use ezpdfkit::{EzPdfError, Toolkit, Upload};
use rstest::rstest;

use crate::common::{page_widths, pdf_with_pages, width_of, widths};

#[test]
fn test_merge_two_single_page_documents_keeps_order() {
    let uploads = vec![
        Upload::new("first.pdf", pdf_with_pages(1)),
        Upload::new("second.pdf", pdf_with_pages(2)),
    ];

    let result = merge_documents(&uploads, &Config::default()).unwrap();

    assert_eq!(result.output.name, "merged.pdf");
    assert_eq!(result.output.page_count, 3);
    assert_eq!(
        page_widths(&result.output.bytes),
        vec![width_of(1), width_of(1), width_of(2)]
    );
}

#[test]
fn test_merge_three_documents_in_upload_order() {
    let uploads = vec![
        Upload::new("c.pdf", pdf_with_pages(3)),
        Upload::new("a.pdf", pdf_with_pages(1)),
        Upload::new("b.pdf", pdf_with_pages(2)),
    ];

    let report = Toolkit::new(&Config::default()).merge(&uploads).unwrap();

    let mut expected = widths(1, 3);
    expected.extend(widths(1, 1));
    expected.extend(widths(1, 2));
    assert_eq!(page_widths(&report.output.bytes), expected);
    assert_eq!(report.statistics.files_merged, 3);
    assert_eq!(report.validation.total_pages, 6);
}

#[rstest]
#[case::none(CompressionLevel::None)]
#[case::standard(CompressionLevel::Standard)]
#[case::maximum(CompressionLevel::Maximum)]
fn test_merge_with_each_compression(#[case] compression: CompressionLevel) {
    let config = Config {
        compression,
        ..Config::default()
    };
    let uploads = vec![
        Upload::new("a.pdf", pdf_with_pages(2)),
        Upload::new("b.pdf", pdf_with_pages(2)),
    ];

    let result = merge_documents(&uploads, &config).unwrap();
    assert_eq!(page_widths(&result.output.bytes).len(), 4);
}

#[test]
fn test_merge_needs_two_inputs() {
    let uploads = vec![Upload::new("only.pdf", pdf_with_pages(4))];

    let err = merge_documents(&uploads, &Config::default()).unwrap_err();
    assert!(matches!(err, EzPdfError::NotEnoughInputs { .. }));
    assert_eq!(err.to_string(), "Please upload at least two PDF files.");
}

#[test]
fn test_second_merge_within_cooldown_is_refused() {
    let toolkit = Toolkit::new(&Config::default());
    let uploads = vec![
        Upload::new("a.pdf", pdf_with_pages(1)),
        Upload::new("b.pdf", pdf_with_pages(1)),
    ];

    toolkit.merge(&uploads).unwrap();
    let err = toolkit.merge(&uploads).unwrap_err();

    assert!(matches!(err, EzPdfError::RateLimited { .. }));
    assert!(err.to_string().starts_with("Please wait "));
    assert!(err.is_recoverable());
}
