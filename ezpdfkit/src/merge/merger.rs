//! Document concatenation.
//!
//! Combines validated documents into one, in input order. Each document's
//! objects are renumbered past the previous document's ids before its pages
//! are appended, so nothing clashes.

use lopdf::{Document, ObjectId};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::assemble::{Assembler, OutputFile, PageTreeBuilder, SourceDocument};
use crate::config::CompressionLevel;
use crate::error::{EzPdfError, Result};

/// Name of the merge output.
pub const MERGED_FILE_NAME: &str = "merged.pdf";

/// Statistics about a merge operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStatistics {
    /// Number of documents merged.
    pub files_merged: usize,

    /// Pages in the merged document.
    pub total_pages: usize,

    /// Time taken to merge and serialize.
    pub merge_time: Duration,

    /// Size of the merged file in bytes.
    pub output_size: u64,
}

/// Result of a merge operation.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// The merged file.
    pub output: OutputFile,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Concatenates documents.
#[derive(Debug, Clone, Copy)]
pub struct Merger {
    min_inputs: usize,
    assembler: Assembler,
}

impl Merger {
    /// Create a merger that needs at least `min_inputs` documents.
    pub fn new(min_inputs: usize, compression: CompressionLevel) -> Self {
        Self {
            min_inputs,
            assembler: Assembler::new(compression),
        }
    }

    /// Merge `sources` into [`MERGED_FILE_NAME`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than the minimum number of documents are given
    /// - A page cannot be copied
    /// - The merged document cannot be written
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use ezpdfkit::merge::Merger;
    /// # use ezpdfkit::assemble::SourceDocument;
    /// # use ezpdfkit::config::CompressionLevel;
    /// # fn example(a: SourceDocument, b: SourceDocument) -> ezpdfkit::Result<()> {
    /// let merger = Merger::new(2, CompressionLevel::Standard);
    /// let result = merger.merge(&[a, b])?;
    /// println!("{} pages", result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&self, sources: &[SourceDocument]) -> Result<MergeResult> {
        let start = Instant::now();

        let mut document = self.merge_documents(sources)?;
        let total_pages = document.get_pages().len();
        let bytes = self.assembler.encode(&mut document)?;

        let statistics = MergeStatistics {
            files_merged: sources.len(),
            total_pages,
            merge_time: start.elapsed(),
            output_size: bytes.len() as u64,
        };

        info!(
            files = statistics.files_merged,
            pages = total_pages,
            "merged documents"
        );

        Ok(MergeResult {
            output: OutputFile {
                name: MERGED_FILE_NAME.to_string(),
                bytes,
                page_count: total_pages,
            },
            statistics,
        })
    }

    /// Merge `sources` into a single in-memory document.
    ///
    /// # Errors
    ///
    /// See [`Merger::merge`].
    pub fn merge_documents(&self, sources: &[SourceDocument]) -> Result<Document> {
        if sources.len() < self.min_inputs.max(1) {
            return Err(EzPdfError::NotEnoughInputs {
                required: self.min_inputs,
                found: sources.len(),
            });
        }

        let version = highest_version(sources);
        // Id 1 is the merged Pages node; sources are renumbered after it.
        let mut builder = PageTreeBuilder::new(&version, 1);
        let mut next_id = 2;

        for source in sources {
            let mut doc = source.document.clone();
            doc.renumber_objects_with(next_id);
            next_id = doc.max_id + 1;

            let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
            for page_id in &page_ids {
                builder.push_page(&doc, *page_id)?;
            }

            debug!(source = %source.name, pages = page_ids.len(), "appended document");
        }

        Ok(builder.finish())
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new(2, CompressionLevel::default())
    }
}

/// Highest PDF header version among `sources`.
fn highest_version(sources: &[SourceDocument]) -> String {
    sources
        .iter()
        .map(|s| s.document.version.as_str())
        .max_by(|a, b| version_key(a).cmp(&version_key(b)))
        .unwrap_or("1.5")
        .to_string()
}

fn version_key(version: &str) -> (u8, u8) {
    let (major, minor) = version.split_once('.').unwrap_or((version, "0"));
    (
        major.parse().unwrap_or_default(),
        minor.parse().unwrap_or_default(),
    )
}
