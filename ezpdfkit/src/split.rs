//! Split operations.
//!
//! Each operation takes one validated [`SourceDocument`] and produces a
//! [`SplitReport`]: the generated output plus any range tokens that were
//! ignored. Multi-file results are archived; a plan that yields a single
//! segment is returned as that one file.
//!
//! Output names are fixed:
//!
//! | Operation | File names | Archive |
//! |---|---|---|
//! | extract | `split_extract.pdf` | none |
//! | split at | `split_{start}-{end}.pdf` | `split_segments.zip` |
//! | every N | `split_{start}-{end}.pdf` | `split_every_n.zip` |
//! | each page | `page_{n}.pdf` | `split_individual_pages.zip` |
//! | halves | `split_{start}-{end}.pdf` | `split_half.zip` |
//! | auto | `split.pdf`, `split_1-{p}.pdf`, `split_{p+1}-{total}.pdf` | `split_pages.zip` |

use serde::Serialize;
use tracing::{info, warn};

use crate::assemble::{Assembler, OutputFile, SourceDocument};
use crate::bundle::{self, Bundle, SplitOutput};
use crate::config::Config;
use crate::error::{EzPdfError, Result};
use crate::plan::{Segment, SplitPlan, Strategy, plan};
use crate::range::{self, PageToken};

/// Extraction output name.
pub const EXTRACT_FILE_NAME: &str = "split_extract.pdf";
/// Extraction output name of the auto split.
pub const LEGACY_EXTRACT_FILE_NAME: &str = "split.pdf";
/// Archive of a split at explicit points.
pub const SEGMENTS_ARCHIVE_NAME: &str = "split_segments.zip";
/// Archive of a split every N pages.
pub const EVERY_N_ARCHIVE_NAME: &str = "split_every_n.zip";
/// Archive of a split into single pages.
pub const PAGES_ARCHIVE_NAME: &str = "split_individual_pages.zip";
/// Archive of a split into halves.
pub const HALVES_ARCHIVE_NAME: &str = "split_half.zip";
/// Archive of the auto split's two-way split.
pub const TWO_WAY_ARCHIVE_NAME: &str = "split_pages.zip";

/// Name of the file holding `segment`.
pub fn segment_file_name(segment: &Segment) -> String {
    format!("split_{}-{}.pdf", segment.start_page, segment.end_page)
}

/// Name of the file holding single page `page`.
pub fn page_file_name(page: u32) -> String {
    format!("page_{page}.pdf")
}

/// Outcome of one split operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitReport {
    /// Strategy that was applied.
    pub strategy: Strategy,

    /// The generated file or archive.
    pub output: SplitOutput,

    /// Raw tokens that were ignored, in input order.
    pub rejected: Vec<String>,
}

/// Outcome of the auto split.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSplitReport {
    /// The two-way split, when the text was a single page number before
    /// the last page.
    pub two_way: Option<Bundle>,

    /// The extracted pages.
    pub extract: OutputFile,

    /// Raw tokens that were ignored, in input order.
    pub rejected: Vec<String>,
}

/// Runs split operations against a document.
#[derive(Debug, Clone, Copy)]
pub struct Splitter {
    assembler: Assembler,
    max_range_chars: usize,
}

impl Splitter {
    /// Create a splitter. Range text longer than `max_range_chars` is refused.
    pub fn new(assembler: Assembler, max_range_chars: usize) -> Self {
        Self {
            assembler,
            max_range_chars,
        }
    }

    /// Create a splitter from a run configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Assembler::new(config.compression),
            config.limits.max_range_chars,
        )
    }

    fn check_length(&self, text: &str) -> Result<()> {
        let chars = text.chars().count();
        if chars > self.max_range_chars {
            return Err(EzPdfError::invalid_parameter(format!(
                "Page text is too long ({chars} characters); max {}",
                self.max_range_chars
            )));
        }
        Ok(())
    }

    /// Parse range text for extraction, refusing text that selects nothing.
    fn selection(&self, source: &SourceDocument, text: &str) -> Result<range::PageSet> {
        self.check_length(text)?;
        if range::tokenize(text).is_empty() {
            return Err(EzPdfError::invalid_parameter("No pages or ranges specified."));
        }

        let set = range::parse(text, source.page_count);
        if !set.rejected().is_empty() {
            warn!(
                source = %source.name,
                rejected = ?set.rejected(),
                "ignored invalid entries"
            );
        }
        if set.is_empty() {
            return Err(EzPdfError::invalid_parameter(
                "No valid pages to extract after filtering invalid entries.",
            ));
        }
        Ok(set)
    }

    /// Pull the pages named by `text` into [`EXTRACT_FILE_NAME`].
    ///
    /// Pages come out in ascending order, each once.
    ///
    /// # Errors
    ///
    /// Returns [`EzPdfError::InvalidParameter`] if the text is empty, too
    /// long, or selects no page.
    pub fn split_extract(&self, source: &SourceDocument, text: &str) -> Result<SplitReport> {
        let (pages, rejected) = self.selection(source, text)?.into_parts();
        let file = self.assembler.render(source, &pages, EXTRACT_FILE_NAME)?;

        info!(source = %source.name, pages = pages.len(), "extracted pages");
        Ok(SplitReport {
            strategy: Strategy::Extract,
            output: SplitOutput::Single(file),
            rejected,
        })
    }

    /// Start a new file at each page listed in `text`.
    ///
    /// # Errors
    ///
    /// Returns [`EzPdfError::InvalidParameter`] if no listed point lies in
    /// `1..total_pages`.
    pub fn split_at(&self, source: &SourceDocument, text: &str) -> Result<SplitReport> {
        self.check_length(text)?;
        let (points, rejected) = range::parse_split_points(text, source.page_count).into_parts();
        if !rejected.is_empty() {
            warn!(source = %source.name, ?rejected, "ignored invalid split points");
        }

        let strategy = Strategy::SplitAt { points };
        let output = self.run(source, &strategy, SEGMENTS_ARCHIVE_NAME, segment_file_name)?;
        Ok(SplitReport {
            strategy,
            output,
            rejected,
        })
    }

    /// Cut the document into files of `n` pages.
    ///
    /// # Errors
    ///
    /// Returns [`EzPdfError::InvalidParameter`] unless `1 <= n <= total_pages`.
    pub fn split_every_n(&self, source: &SourceDocument, n: u32) -> Result<SplitReport> {
        let strategy = Strategy::EveryN { n };
        let output = self.run(source, &strategy, EVERY_N_ARCHIVE_NAME, segment_file_name)?;
        Ok(SplitReport {
            strategy,
            output,
            rejected: Vec::new(),
        })
    }

    /// One file per page.
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be written.
    pub fn split_each_page(&self, source: &SourceDocument) -> Result<SplitReport> {
        let strategy = Strategy::EachPage;
        let output = self.run(source, &strategy, PAGES_ARCHIVE_NAME, |segment| {
            page_file_name(segment.start_page)
        })?;
        Ok(SplitReport {
            strategy,
            output,
            rejected: Vec::new(),
        })
    }

    /// Cut the document in two, the first half rounded down.
    ///
    /// A single page document yields just that page.
    ///
    /// # Errors
    ///
    /// Returns an error if a half cannot be written.
    pub fn split_halves(&self, source: &SourceDocument) -> Result<SplitReport> {
        let strategy = Strategy::Halves;
        let output = self.run(source, &strategy, HALVES_ARCHIVE_NAME, segment_file_name)?;
        Ok(SplitReport {
            strategy,
            output,
            rejected: Vec::new(),
        })
    }

    /// Extract the pages in `text`, and when `text` is a single page number
    /// `p` before the last page, also cut the document after page `p`.
    ///
    /// # Errors
    ///
    /// Same as [`Splitter::split_extract`].
    pub fn split_auto(&self, source: &SourceDocument, text: &str) -> Result<AutoSplitReport> {
        let tokens = range::tokenize(text);
        let (pages, rejected) = self.selection(source, text)?.into_parts();

        let two_way = match tokens.as_slice() {
            [only] => match PageToken::parse(only) {
                Some(PageToken::Single(p)) if p >= 1 && p < i64::from(source.page_count) => {
                    Some(self.two_way(source, p as u32)?)
                }
                _ => None,
            },
            _ => None,
        };

        let extract = self
            .assembler
            .render(source, &pages, LEGACY_EXTRACT_FILE_NAME)?;

        info!(
            source = %source.name,
            pages = pages.len(),
            two_way = two_way.is_some(),
            "auto split finished"
        );
        Ok(AutoSplitReport {
            two_way,
            extract,
            rejected,
        })
    }

    fn two_way(&self, source: &SourceDocument, page: u32) -> Result<Bundle> {
        let segments = [
            Segment::new(1, page),
            Segment::new(page + 1, source.page_count),
        ];
        let files = segments
            .iter()
            .map(|segment| {
                self.assembler
                    .render(source, &segment.pages(), segment_file_name(segment))
            })
            .collect::<Result<Vec<_>>>()?;
        bundle::build(TWO_WAY_ARCHIVE_NAME, &files)
    }

    /// Plan, assemble every segment, and archive the results.
    fn run(
        &self,
        source: &SourceDocument,
        strategy: &Strategy,
        archive_name: &str,
        file_name: impl Fn(&Segment) -> String,
    ) -> Result<SplitOutput> {
        let split_plan: SplitPlan = plan(source.page_count, strategy)?;

        let files = split_plan
            .segments
            .iter()
            .map(|segment| {
                self.assembler
                    .render(source, &segment.pages(), file_name(segment))
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            source = %source.name,
            strategy = strategy.name(),
            files = files.len(),
            "split document"
        );
        bundle::bundle(archive_name, files)
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
