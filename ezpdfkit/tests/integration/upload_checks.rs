//! Integration tests for upload validation.

use ezpdfkit::config::{Config, Limits};
use ezpdfkit::service::SplitRequest;
use ezpdfkit::validation::{Upload, Validator};
use ezpdfkit::{EzPdfError, Toolkit};
use lopdf::{Document, Object, dictionary};
use rstest::rstest;

use crate::common::pdf_with_pages;

fn empty_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn validation_message(err: EzPdfError) -> String {
    match err {
        EzPdfError::Validation { message, .. } => message,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[rstest]
#[case::wrong_extension("scan.png", pdf_with_pages(1), "Invalid file extension; expected .pdf")]
#[case::bad_header("doc.pdf", b"GIF89a".to_vec(), "File is not a valid PDF (bad header)")]
#[case::corrupted("doc.pdf", b"%PDF-1.7\ngarbage".to_vec(), "Unable to read PDF; file may be corrupted")]
#[case::no_pages("doc.pdf", empty_pdf(), "PDF has no pages")]
fn test_upload_rejections(#[case] name: &str, #[case] bytes: Vec<u8>, #[case] message: &str) {
    let err = Validator::default()
        .validate(&Upload::new(name, bytes))
        .unwrap_err();
    assert_eq!(validation_message(err), message);
}

#[test]
fn test_extension_check_ignores_case() {
    let source = Validator::default()
        .validate(&Upload::new("REPORT.PDF", pdf_with_pages(2)))
        .unwrap();
    assert_eq!(source.page_count, 2);
}

#[test]
fn test_file_size_limit() {
    let validator = Validator::new(Limits {
        max_file_mb: 1,
        max_total_mb: 1,
        ..Limits::default()
    });
    let mut bytes = b"%PDF-1.4\n".to_vec();
    bytes.resize(1024 * 1024 * 3 / 2, b' ');

    let err = validator.validate(&Upload::new("big.pdf", bytes)).unwrap_err();
    assert_eq!(validation_message(err), "File too large (1.5 MB); max 1 MB");
}

#[test]
fn test_total_size_limit_checked_before_each_file() {
    let validator = Validator::new(Limits {
        max_file_mb: 1,
        max_total_mb: 1,
        ..Limits::default()
    });
    let uploads = vec![
        Upload::new("a.pdf", vec![b'x'; 700 * 1024]),
        Upload::new("b.pdf", vec![b'x'; 700 * 1024]),
    ];

    let err = validator.validate_batch(&uploads).unwrap_err();
    assert_eq!(
        validation_message(err),
        "Total upload size too large (1.4 MB); max 1 MB"
    );
}

#[test]
fn test_split_refuses_invalid_upload_before_parsing_ranges() {
    let toolkit = Toolkit::new(&Config::default());
    let err = toolkit
        .split(
            &Upload::new("notes.txt", pdf_with_pages(3)),
            &SplitRequest::Extract {
                pages: String::new(),
            },
        )
        .unwrap_err();

    assert!(matches!(err, EzPdfError::Validation { .. }));
    assert_eq!(err.exit_code(), 2);
}
