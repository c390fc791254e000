//! User-facing output for ezpdfkit.
//!
//! This module turns request results into what a person reads:
//! - Status messages through [`OutputFormatter`]
//! - Summaries of merges and splits
//! - Warnings for ignored range tokens
//!
//! # Examples
//!
//! ```no_run
//! use ezpdfkit::output::{create_formatter, display_split_outcome};
//! use ezpdfkit::service::SplitOutcome;
//! use ezpdfkit::config::Config;
//!
//! # fn example(config: Config, outcome: SplitOutcome) {
//! let formatter = create_formatter(&config);
//! display_split_outcome(&formatter, &outcome);
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::bundle::SplitOutput;
use crate::config::Config;
use crate::service::{MergeReport, SplitOutcome};
use crate::utils::format_file_size;
use crate::validation::ValidationSummary;

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Display validation summary to the user.
pub fn display_validation_summary(formatter: &OutputFormatter, summary: &ValidationSummary) {
    formatter.info(&format!(
        "Validated {} file(s): {} pages, {}",
        summary.files_validated,
        summary.total_pages,
        summary.format_total_size()
    ));
}

/// Display the result of a merge.
pub fn display_merge_report(formatter: &OutputFormatter, report: &MergeReport) {
    display_validation_summary(formatter, &report.validation);
    formatter.success(&format!(
        "Merged {} file(s) into {} ({} pages, {})",
        report.statistics.files_merged,
        report.output.name,
        report.statistics.total_pages,
        format_file_size(report.statistics.output_size)
    ));
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", report.statistics.merge_time.as_secs_f64()),
    );
}

/// Display the result of a split, warning about ignored tokens first.
pub fn display_split_outcome(formatter: &OutputFormatter, outcome: &SplitOutcome) {
    formatter.rejected_tokens(outcome.rejected());

    match outcome {
        SplitOutcome::Split(report) => {
            display_split_output(formatter, &report.output);
        }
        SplitOutcome::Auto(report) => {
            if let Some(bundle) = &report.two_way {
                formatter.success(&format!(
                    "Created {} ({} files, {})",
                    bundle.name,
                    bundle.entries.len(),
                    format_file_size(bundle.size())
                ));
                for (idx, entry) in bundle.entries.iter().enumerate() {
                    formatter.list_item(idx + 1, &entry_line(&entry.name, entry.page_count));
                }
            }
            formatter.success(&format!(
                "Created {} ({}, {})",
                report.extract.name,
                pages_label(report.extract.page_count),
                format_file_size(report.extract.size())
            ));
        }
    }
}

fn display_split_output(formatter: &OutputFormatter, output: &SplitOutput) {
    match output {
        SplitOutput::Single(file) => formatter.success(&format!(
            "Created {} ({}, {})",
            file.name,
            pages_label(file.page_count),
            format_file_size(file.size())
        )),
        SplitOutput::Bundle(bundle) => {
            formatter.success(&format!(
                "Created {} ({} files, {})",
                bundle.name,
                bundle.entries.len(),
                format_file_size(bundle.size())
            ));
            for (idx, entry) in bundle.entries.iter().enumerate() {
                formatter.list_item(idx + 1, &entry_line(&entry.name, entry.page_count));
            }
        }
    }
}

fn entry_line(name: &str, pages: usize) -> String {
    format!("{name} {}", pages_label(pages))
}

fn pages_label(pages: usize) -> String {
    if pages == 1 {
        "1 page".to_string()
    } else {
        format!("{pages} pages")
    }
}
