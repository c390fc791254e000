//! Upload validation for ezpdfkit.
//!
//! Every upload passes these checks, in this order, before any page logic
//! runs:
//! - File name ends with `.pdf` (case-insensitive)
//! - Size does not exceed the per-file limit
//! - Contents start with the `%PDF-` signature
//! - The document opens and has at least one page
//!
//! The first failing check decides the message, which is shown to the user
//! as it is.
//!
//! # Examples
//!
//! ```no_run
//! use ezpdfkit::validation::{Upload, Validator};
//! use ezpdfkit::config::Limits;
//!
//! # fn example(bytes: Vec<u8>) -> ezpdfkit::Result<()> {
//! let validator = Validator::new(Limits::default());
//! let source = validator.validate(&Upload::new("report.pdf", bytes))?;
//! println!("{} has {} pages", source.name, source.page_count);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use tracing::debug;

use crate::assemble::SourceDocument;
use crate::config::{BYTES_PER_MB, Limits};
use crate::error::{EzPdfError, Result};

/// Signature every PDF starts with.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

/// An uploaded file: its name and raw contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name as supplied by the user.
    pub name: String,

    /// Raw contents.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Create an upload from a name and contents.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Outcome of validating a batch of uploads.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Number of uploads that passed.
    pub files_validated: usize,

    /// Pages across all passing uploads.
    pub total_pages: usize,

    /// Combined size in bytes.
    pub total_size: u64,
}

impl ValidationSummary {
    /// Summarize validated documents and their combined upload size.
    pub fn new(sources: &[SourceDocument], total_size: u64) -> Self {
        Self {
            files_validated: sources.len(),
            total_pages: sources.iter().map(|s| s.page_count as usize).sum(),
            total_size,
        }
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        crate::utils::format_file_size(self.total_size)
    }
}

/// Gate that uploads pass before any document logic.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    limits: Limits,
}

impl Validator {
    /// Create a validator enforcing `limits`.
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// The limits in force.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Validate one upload and return it parsed.
    ///
    /// # Errors
    ///
    /// Returns [`EzPdfError::Validation`] naming the first failed check, or
    /// [`EzPdfError::Encrypted`] for an encrypted document.
    pub fn validate(&self, upload: &Upload) -> Result<SourceDocument> {
        let fail = |message: String| EzPdfError::validation(&upload.name, message);

        if !upload.name.to_lowercase().ends_with(".pdf") {
            return Err(fail("Invalid file extension; expected .pdf".into()));
        }

        if upload.size() > self.limits.max_file_bytes() {
            return Err(fail(format!(
                "File too large ({:.1} MB); max {} MB",
                as_mb(upload.size()),
                self.limits.max_file_mb
            )));
        }

        if !upload.bytes.starts_with(PDF_MAGIC) {
            return Err(fail("File is not a valid PDF (bad header)".into()));
        }

        let source = match SourceDocument::load(&upload.name, &upload.bytes) {
            Ok(source) => source,
            Err(err @ EzPdfError::Encrypted { .. }) => return Err(err),
            Err(err) => {
                debug!(file = %upload.name, error = %err, "upload failed to parse");
                return Err(fail("Unable to read PDF; file may be corrupted".into()));
            }
        };

        if source.page_count == 0 {
            return Err(fail("PDF has no pages".into()));
        }

        debug!(file = %upload.name, pages = source.page_count, "upload validated");
        Ok(source)
    }

    /// Check the combined size of a merge upload.
    ///
    /// # Errors
    ///
    /// Returns [`EzPdfError::Validation`] when the total exceeds the limit.
    pub fn validate_total_size(&self, uploads: &[Upload]) -> Result<u64> {
        let total: u64 = uploads.iter().map(Upload::size).sum();
        if total > self.limits.max_total_bytes() {
            return Err(EzPdfError::validation(
                "upload",
                format!(
                    "Total upload size too large ({:.1} MB); max {} MB",
                    as_mb(total),
                    self.limits.max_total_mb
                ),
            ));
        }
        Ok(total)
    }

    /// Validate a merge upload: input count, combined size, then each file.
    ///
    /// # Errors
    ///
    /// Returns [`EzPdfError::NotEnoughInputs`] for too few uploads, otherwise
    /// the first error from [`Validator::validate_total_size`] or
    /// [`Validator::validate`].
    pub fn validate_batch(
        &self,
        uploads: &[Upload],
    ) -> Result<(Vec<SourceDocument>, ValidationSummary)> {
        if uploads.len() < self.limits.min_merge_inputs {
            return Err(EzPdfError::NotEnoughInputs {
                required: self.limits.min_merge_inputs,
                found: uploads.len(),
            });
        }

        let total_size = self.validate_total_size(uploads)?;
        let sources = uploads
            .iter()
            .map(|upload| self.validate(upload))
            .collect::<Result<Vec<_>>>()?;

        let summary = ValidationSummary::new(&sources, total_size);
        Ok((sources, summary))
    }
}

fn as_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB as f64
}
