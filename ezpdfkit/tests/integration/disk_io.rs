//! Integration tests for reading inputs from disk and writing results.

use ezpdfkit::config::{Config, OverwriteMode};
use ezpdfkit::io::{read_uploads, write_output};
use ezpdfkit::service::SplitRequest;
use ezpdfkit::{EzPdfError, Toolkit};
use tempfile::TempDir;

use crate::common::{page_widths, width_of, write_pdf, zip_entries};

fn config_for(output: &TempDir) -> Config {
    Config {
        output_dir: output.path().to_path_buf(),
        overwrite_mode: OverwriteMode::NoClobber,
        jobs: Some(2),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_merge_globbed_inputs_to_disk() {
    let inputs = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_pdf(inputs.path(), "02-body.pdf", 2);
    write_pdf(inputs.path(), "01-cover.pdf", 1);
    write_pdf(inputs.path(), "03-back.pdf", 1);

    let config = config_for(&output);
    let pattern = format!("{}/*.pdf", inputs.path().display());
    let uploads = read_uploads([pattern], &config).await.unwrap();

    let names: Vec<&str> = uploads.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["01-cover.pdf", "02-body.pdf", "03-back.pdf"]);

    let report = Toolkit::new(&config).merge(&uploads).unwrap();
    let stats = write_output(&report.output.name, &report.output.bytes, &config)
        .await
        .unwrap();

    assert_eq!(stats.output_path, output.path().join("merged.pdf"));
    let written = std::fs::read(&stats.output_path).unwrap();
    assert_eq!(
        page_widths(&written),
        vec![width_of(1), width_of(1), width_of(2), width_of(1)]
    );
}

#[tokio::test]
async fn test_split_to_disk_refuses_to_clobber() {
    let inputs = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let path = write_pdf(inputs.path(), "doc.pdf", 4);

    let config = config_for(&output);
    let uploads = read_uploads([path.to_string_lossy()], &config)
        .await
        .unwrap();
    let outcome = Toolkit::new(&config)
        .split(&uploads[0], &SplitRequest::Halves)
        .unwrap();

    for (name, bytes) in outcome.files() {
        write_output(name, bytes, &config).await.unwrap();
    }
    let archive = std::fs::read(output.path().join("split_half.zip")).unwrap();
    assert_eq!(zip_entries(&archive).len(), 2);

    let (name, bytes) = outcome.files()[0];
    let err = write_output(name, bytes, &config).await.unwrap_err();
    assert!(matches!(err, EzPdfError::OutputExists { .. }));
    assert_eq!(err.exit_code(), 4);
}

#[tokio::test]
async fn test_missing_input_is_reported() {
    let inputs = TempDir::new().unwrap();
    let missing = inputs.path().join("missing.pdf");

    let err = read_uploads([missing.to_string_lossy()], &Config::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EzPdfError::FileNotFound { .. }));
}
