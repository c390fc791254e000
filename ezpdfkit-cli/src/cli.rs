//! CLI argument parsing for ezpdfkit.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use ezpdfkit::config::{CompressionLevel, Config, Limits, OverwriteMode};
use ezpdfkit::error::{EzPdfError, Result};
use ezpdfkit::service::SplitRequest;

/// Merge PDF files and split them into parts.
///
/// ezpdfkit merges two or more PDFs in the order given, or splits one PDF
/// by page ranges, split points, fixed-size chunks, single pages or halves.
/// Results with several files are packed into one ZIP archive.
#[derive(Parser, Debug)]
#[command(name = "ezpdfkit")]
#[command(version)]
#[command(about = "Merge PDF files and split them into parts", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Directory that receives generated files
    ///
    /// Created if it does not exist. Output names are fixed per operation,
    /// e.g. merged.pdf or split_half.zip.
    #[arg(
        short,
        long,
        global = true,
        value_name = "DIR",
        env = "EZPDFKIT_OUTPUT_DIR",
        default_value = "."
    )]
    pub output_dir: PathBuf,

    /// Overwrite existing output files without confirmation
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite existing output files
    ///
    /// If an output file already exists, exit with an error instead of
    /// prompting or overwriting.
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show timings, sizes and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Compression level for generated PDFs
    ///
    /// - none: streams are written as loaded
    /// - standard: compress uncompressed streams (default)
    /// - maximum: also drop unreferenced objects
    #[arg(short, long, global = true, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Largest accepted input file, in megabytes
    #[arg(long, global = true, value_name = "MB", env = "EZPDFKIT_MAX_FILE_MB")]
    pub max_file_mb: Option<u64>,

    /// Largest accepted combined size of merge inputs, in megabytes
    #[arg(long, global = true, value_name = "MB", env = "EZPDFKIT_MAX_TOTAL_MB")]
    pub max_total_mb: Option<u64>,

    /// Number of files read concurrently
    ///
    /// Default is number of CPU cores. Use 1 for sequential reads.
    #[arg(short, long, global = true, value_name = "N")]
    pub jobs: Option<usize>,

    /// Print a JSON summary on stdout instead of messages
    #[arg(long, global = true)]
    pub json: bool,
}

/// Top-level operations.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Merge PDF files, in the order given, into merged.pdf
    ///
    /// Examples:
    ///   ezpdfkit merge a.pdf b.pdf
    ///   ezpdfkit merge 'chapters/*.pdf' -o book
    Merge {
        /// Input PDF files or glob patterns
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,
    },

    /// Split one PDF
    Split {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// How to split
        #[command(subcommand)]
        mode: SplitMode,
    },
}

/// Split operations.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    /// Extract the listed pages into split_extract.pdf
    ///
    /// Pages are 1-indexed and come out in ascending order, each once.
    /// Invalid entries are skipped with a warning.
    Extract {
        /// Page ranges, e.g. "1,3-5,8"
        #[arg(short, long, value_name = "RANGES")]
        pages: String,
    },

    /// Start a new part before each listed page
    At {
        /// Split points, e.g. "3,7"
        #[arg(short, long, value_name = "PAGES")]
        points: String,
    },

    /// Split into parts of N pages
    Every {
        /// Pages per part
        #[arg(short, long, value_name = "N")]
        n: u32,
    },

    /// One file per page
    EachPage,

    /// Split into two halves; the second half gets the extra page
    Halves,

    /// Extract the listed pages into split.pdf
    ///
    /// A single page number P additionally produces split_pages.zip with
    /// pages 1-P and the rest.
    Auto {
        /// Page ranges, e.g. "10"
        #[arg(short, long, value_name = "RANGES")]
        pages: String,
    },
}

impl SplitMode {
    /// The library request for this mode.
    pub fn to_request(&self) -> SplitRequest {
        match self {
            Self::Extract { pages } => SplitRequest::Extract {
                pages: pages.clone(),
            },
            Self::At { points } => SplitRequest::At {
                points: points.clone(),
            },
            Self::Every { n } => SplitRequest::EveryN { n: *n },
            Self::EachPage => SplitRequest::EachPage,
            Self::Halves => SplitRequest::Halves,
            Self::Auto { pages } => SplitRequest::Auto {
                pages: pages.clone(),
            },
        }
    }
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is unknown or the
    /// resulting configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let defaults = Limits::default();
        let limits = Limits {
            max_file_mb: self.max_file_mb.unwrap_or(defaults.max_file_mb),
            max_total_mb: self.max_total_mb.unwrap_or(defaults.max_total_mb),
            ..defaults
        };

        let config = Config {
            limits,
            compression,
            output_dir: self.output_dir.clone(),
            overwrite_mode,
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
            jobs: self.jobs,
        };

        config.validate().map_err(|e| {
            EzPdfError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// # Errors
    ///
    /// Returns an error if a merge names no inputs or the job count is zero.
    pub fn validate(&self) -> Result<()> {
        if let Command::Merge { inputs } = &self.command
            && inputs.is_empty()
        {
            return Err(EzPdfError::invalid_config("No input files specified"));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(EzPdfError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        Ok(())
    }
}
