//! Integration tests for the split operations.

use ezpdfkit::bundle::SplitOutput;
use ezpdfkit::config::Config;
use ezpdfkit::service::{SplitOutcome, SplitRequest};
use ezpdfkit::{EzPdfError, Toolkit, Upload};
use rstest::rstest;

use crate::common::{page_widths, pdf_with_pages, width_of, widths, zip_entries};

fn split(pages: u32, request: SplitRequest) -> SplitOutcome {
    let toolkit = Toolkit::new(&Config::default());
    toolkit
        .split(&Upload::new("doc.pdf", pdf_with_pages(pages)), &request)
        .unwrap()
}

fn split_err(pages: u32, request: SplitRequest) -> EzPdfError {
    let toolkit = Toolkit::new(&Config::default());
    toolkit
        .split(&Upload::new("doc.pdf", pdf_with_pages(pages)), &request)
        .unwrap_err()
}

fn single_file(outcome: &SplitOutcome) -> (String, Vec<i64>) {
    match outcome {
        SplitOutcome::Split(report) => match &report.output {
            SplitOutput::Single(file) => (file.name.clone(), page_widths(&file.bytes)),
            SplitOutput::Bundle(bundle) => panic!("expected one file, got {}", bundle.name),
        },
        SplitOutcome::Auto(_) => panic!("expected a regular split"),
    }
}

fn archive(outcome: &SplitOutcome) -> (String, Vec<(String, Vec<i64>)>) {
    match outcome {
        SplitOutcome::Split(report) => match &report.output {
            SplitOutput::Bundle(bundle) => (bundle.name.clone(), zip_entries(&bundle.bytes)),
            SplitOutput::Single(file) => panic!("expected an archive, got {}", file.name),
        },
        SplitOutcome::Auto(_) => panic!("expected a regular split"),
    }
}

#[test]
fn test_extract_mixed_tokens() {
    let outcome = split(
        10,
        SplitRequest::Extract {
            pages: "1,3-5,8".to_string(),
        },
    );

    let (name, pages) = single_file(&outcome);
    assert_eq!(name, "split_extract.pdf");
    assert_eq!(
        pages,
        vec![width_of(1), width_of(3), width_of(4), width_of(5), width_of(8)]
    );
    assert!(outcome.rejected().is_empty());
}

#[test]
fn test_extract_reports_rejected_tokens() {
    let outcome = split(
        10,
        SplitRequest::Extract {
            pages: "0,3-5,99".to_string(),
        },
    );

    let (_, pages) = single_file(&outcome);
    assert_eq!(pages, widths(3, 5));
    assert_eq!(outcome.rejected(), &["0".to_string(), "99".to_string()]);
}

#[test]
fn test_extract_dedupes_and_sorts() {
    let outcome = split(
        6,
        SplitRequest::Extract {
            pages: "5, 3-4, 1, 3".to_string(),
        },
    );
    let (_, pages) = single_file(&outcome);
    assert_eq!(pages, vec![width_of(1), width_of(3), width_of(4), width_of(5)]);
    assert!(outcome.rejected().is_empty());
}

#[rstest]
#[case::empty("", "No pages or ranges specified.")]
#[case::only_commas(" , ,", "No pages or ranges specified.")]
#[case::all_invalid("0,abc,50", "No valid pages to extract after filtering invalid entries.")]
fn test_extract_without_pages_fails(#[case] text: &str, #[case] message: &str) {
    let err = split_err(
        5,
        SplitRequest::Extract {
            pages: text.to_string(),
        },
    );
    assert!(matches!(err, EzPdfError::InvalidParameter { .. }));
    assert_eq!(err.to_string(), message);
}

#[test]
fn test_split_at_points() {
    let outcome = split(
        10,
        SplitRequest::At {
            points: "3,7".to_string(),
        },
    );

    let (name, entries) = archive(&outcome);
    assert_eq!(name, "split_segments.zip");
    assert_eq!(
        entries,
        vec![
            ("split_1-2.pdf".to_string(), widths(1, 2)),
            ("split_3-6.pdf".to_string(), widths(3, 6)),
            ("split_7-10.pdf".to_string(), widths(7, 10)),
        ]
    );
}

#[test]
fn test_split_at_without_valid_points() {
    let err = split_err(
        4,
        SplitRequest::At {
            points: "4,9,x".to_string(),
        },
    );
    assert!(matches!(err, EzPdfError::InvalidParameter { .. }));
}

#[test]
fn test_every_n_segments() {
    let outcome = split(10, SplitRequest::EveryN { n: 3 });

    let (name, entries) = archive(&outcome);
    assert_eq!(name, "split_every_n.zip");
    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["split_1-3.pdf", "split_4-6.pdf", "split_7-9.pdf", "split_10-10.pdf"]
    );
}

#[test]
fn test_every_n_equal_to_total_is_one_file() {
    let outcome = split(4, SplitRequest::EveryN { n: 4 });
    let (name, pages) = single_file(&outcome);
    assert_eq!(name, "split_1-4.pdf");
    assert_eq!(pages, widths(1, 4));
}

#[rstest]
#[case::zero(0)]
#[case::too_large(5)]
fn test_every_n_out_of_bounds(#[case] n: u32) {
    let err = split_err(4, SplitRequest::EveryN { n });
    assert!(matches!(err, EzPdfError::InvalidParameter { .. }));
}

#[test]
fn test_each_page() {
    let outcome = split(3, SplitRequest::EachPage);

    let (name, entries) = archive(&outcome);
    assert_eq!(name, "split_individual_pages.zip");
    assert_eq!(
        entries,
        vec![
            ("page_1.pdf".to_string(), widths(1, 1)),
            ("page_2.pdf".to_string(), widths(2, 2)),
            ("page_3.pdf".to_string(), widths(3, 3)),
        ]
    );
}

#[test]
fn test_halves_odd_page_count() {
    let outcome = split(7, SplitRequest::Halves);

    let (name, entries) = archive(&outcome);
    assert_eq!(name, "split_half.zip");
    assert_eq!(
        entries,
        vec![
            ("split_1-3.pdf".to_string(), widths(1, 3)),
            ("split_4-7.pdf".to_string(), widths(4, 7)),
        ]
    );
}

#[test]
fn test_halves_single_page_is_one_file() {
    let outcome = split(1, SplitRequest::Halves);
    let (name, pages) = single_file(&outcome);
    assert_eq!(name, "split_1-1.pdf");
    assert_eq!(pages, widths(1, 1));
}

#[rstest]
#[case::every_two(SplitRequest::EveryN { n: 2 })]
#[case::each_page(SplitRequest::EachPage)]
#[case::halves(SplitRequest::Halves)]
#[case::split_at(SplitRequest::At { points: "2,5".to_string() })]
fn test_segments_reconstruct_document(#[case] request: SplitRequest) {
    let outcome = split(7, request);
    let (_, entries) = archive(&outcome);

    let joined: Vec<i64> = entries.into_iter().flat_map(|(_, pages)| pages).collect();
    assert_eq!(joined, widths(1, 7));
}

#[test]
fn test_auto_single_page_adds_two_way_split() {
    let outcome = split(
        6,
        SplitRequest::Auto {
            pages: "4".to_string(),
        },
    );

    let SplitOutcome::Auto(report) = &outcome else {
        panic!("expected an auto split");
    };
    let two_way = report.two_way.as_ref().unwrap();
    assert_eq!(two_way.name, "split_pages.zip");
    assert_eq!(
        zip_entries(&two_way.bytes),
        vec![
            ("split_1-4.pdf".to_string(), widths(1, 4)),
            ("split_5-6.pdf".to_string(), widths(5, 6)),
        ]
    );
    assert_eq!(report.extract.name, "split.pdf");
    assert_eq!(page_widths(&report.extract.bytes), widths(4, 4));
}

#[rstest]
#[case::last_page("6")]
#[case::range("2-3")]
#[case::two_pages("1,2")]
fn test_auto_without_two_way_split(#[case] text: &str) {
    let outcome = split(
        6,
        SplitRequest::Auto {
            pages: text.to_string(),
        },
    );
    let SplitOutcome::Auto(report) = &outcome else {
        panic!("expected an auto split");
    };
    assert!(report.two_way.is_none());
    assert_eq!(outcome.files().len(), 1);
}
