//! Request handling.
//!
//! [`Toolkit`] runs one request at a time from upload to output bytes:
//! validate, parse, plan, assemble, bundle. It owns the merge cooldown for
//! its session and is otherwise stateless, so it can be shared between
//! threads.

use serde::Serialize;
use tracing::{info, instrument};

use crate::assemble::OutputFile;
use crate::bundle::SplitOutput;
use crate::config::Config;
use crate::error::Result;
use crate::merge::{MergeStatistics, Merger};
use crate::split::{AutoSplitReport, SplitReport, Splitter};
use crate::throttle::{Clock, MergeThrottle, SystemClock};
use crate::validation::{Upload, ValidationSummary, Validator};

/// Which split to perform, with its user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitRequest {
    /// Extract the pages named by range text.
    Extract {
        /// Range text such as `1,3-5,8`.
        pages: String,
    },
    /// Split before each listed page.
    At {
        /// Comma separated page numbers.
        points: String,
    },
    /// Files of `n` pages.
    EveryN {
        /// Pages per file.
        n: u32,
    },
    /// One file per page.
    EachPage,
    /// Two halves.
    Halves,
    /// Extraction plus a two-way split for a single page number.
    Auto {
        /// Range text such as `10`.
        pages: String,
    },
}

/// Result of a merge request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    /// Inputs as validated.
    pub validation: ValidationSummary,

    /// Merge statistics.
    pub statistics: MergeStatistics,

    /// The merged file.
    pub output: OutputFile,
}

/// Result of a split request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "operation")]
pub enum SplitOutcome {
    /// A regular split.
    Split(SplitReport),
    /// The auto split.
    Auto(AutoSplitReport),
}

impl SplitOutcome {
    /// Every file to hand back, as `(name, bytes)`, in delivery order.
    pub fn files(&self) -> Vec<(&str, &[u8])> {
        match self {
            Self::Split(report) => vec![(report.output.name(), report.output.bytes())],
            Self::Auto(report) => {
                let mut files = Vec::with_capacity(2);
                if let Some(bundle) = &report.two_way {
                    files.push((bundle.name.as_str(), bundle.bytes.as_slice()));
                }
                files.push((report.extract.name.as_str(), report.extract.bytes.as_slice()));
                files
            }
        }
    }

    /// Raw range tokens that were ignored.
    pub fn rejected(&self) -> &[String] {
        match self {
            Self::Split(report) => &report.rejected,
            Self::Auto(report) => &report.rejected,
        }
    }

    /// Number of documents produced.
    pub fn document_count(&self) -> usize {
        match self {
            Self::Split(report) => report.output.file_count(),
            Self::Auto(report) => {
                1 + report
                    .two_way
                    .as_ref()
                    .map_or(0, |bundle| bundle.entries.len())
            }
        }
    }
}

/// Entry point for merge and split requests.
#[derive(Debug)]
pub struct Toolkit<C: Clock = SystemClock> {
    validator: Validator,
    merger: Merger,
    splitter: Splitter,
    throttle: MergeThrottle<C>,
}

impl Toolkit<SystemClock> {
    /// Create a toolkit for `config` on the system clock.
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Toolkit<C> {
    /// Create a toolkit for `config` whose merge cooldown reads `clock`.
    pub fn with_clock(config: &Config, clock: C) -> Self {
        let limits = config.limits.clone();
        Self {
            merger: Merger::new(limits.min_merge_inputs, config.compression),
            splitter: Splitter::from_config(config),
            throttle: MergeThrottle::with_clock(limits.merge_cooldown, clock),
            validator: Validator::new(limits),
        }
    }

    /// Merge `uploads` into `merged.pdf`.
    ///
    /// The cooldown is checked first. Once every upload has passed
    /// validation it is checked again and restarted under one lock, so of
    /// concurrent merges on a shared toolkit only one proceeds. A merge
    /// failing after that point does not reset it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cooldown is still running
    /// - Fewer than two uploads are given
    /// - An upload, or the combined size, fails validation
    /// - The merged document cannot be built
    #[instrument(skip_all, fields(inputs = uploads.len()))]
    pub fn merge(&self, uploads: &[Upload]) -> Result<MergeReport> {
        self.throttle.check()?;

        let (sources, validation) = self.validator.validate_batch(uploads)?;
        self.throttle.try_start()?;

        let result = self.merger.merge(&sources)?;
        Ok(MergeReport {
            validation,
            statistics: result.statistics,
            output: result.output,
        })
    }

    /// Validate `upload` and split it as `request` asks.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad upload, an
    /// [`crate::EzPdfError::InvalidParameter`] for unusable input, or an
    /// assembly error.
    #[instrument(skip_all, fields(file = %upload.name))]
    pub fn split(&self, upload: &Upload, request: &SplitRequest) -> Result<SplitOutcome> {
        let source = self.validator.validate(upload)?;
        let splitter = &self.splitter;

        let outcome = match request {
            SplitRequest::Extract { pages } => {
                SplitOutcome::Split(splitter.split_extract(&source, pages)?)
            }
            SplitRequest::At { points } => SplitOutcome::Split(splitter.split_at(&source, points)?),
            SplitRequest::EveryN { n } => SplitOutcome::Split(splitter.split_every_n(&source, *n)?),
            SplitRequest::EachPage => SplitOutcome::Split(splitter.split_each_page(&source)?),
            SplitRequest::Halves => SplitOutcome::Split(splitter.split_halves(&source)?),
            SplitRequest::Auto { pages } => SplitOutcome::Auto(splitter.split_auto(&source, pages)?),
        };

        info!(
            documents = outcome.document_count(),
            rejected = outcome.rejected().len(),
            "split request finished"
        );
        Ok(outcome)
    }
}
