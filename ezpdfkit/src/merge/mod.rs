//! PDF merging.
//!
//! Documents are concatenated in the order given; every page of every input
//! appears once in the output, under a single flat page tree.
//!
//! # Examples
//!
//! ```no_run
//! use ezpdfkit::merge::merge_documents;
//! use ezpdfkit::config::Config;
//! use ezpdfkit::validation::Upload;
//!
//! # fn example(a: Vec<u8>, b: Vec<u8>) -> ezpdfkit::Result<()> {
//! let uploads = vec![Upload::new("a.pdf", a), Upload::new("b.pdf", b)];
//! let result = merge_documents(&uploads, &Config::default())?;
//! assert_eq!(result.output.name, "merged.pdf");
//! # Ok(())
//! # }
//! ```

pub mod merger;

pub use merger::{MERGED_FILE_NAME, MergeResult, MergeStatistics, Merger};

use crate::config::Config;
use crate::error::Result;
use crate::validation::{Upload, Validator};

/// Validate `uploads` and merge them.
///
/// The uploads are checked as a batch first (count, combined size, then each
/// file), so nothing is merged unless every input is acceptable.
///
/// # Errors
///
/// Returns the first validation error, or a merge error.
pub fn merge_documents(uploads: &[Upload], config: &Config) -> Result<MergeResult> {
    let validator = Validator::new(config.limits.clone());
    let (sources, _summary) = validator.validate_batch(uploads)?;

    Merger::new(config.limits.min_merge_inputs, config.compression).merge(&sources)
}
