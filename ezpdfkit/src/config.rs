//! Configuration for ezpdfkit.
//!
//! This module holds the settings that drive a request:
//! - Upload limits (per-file size, total size, merge input count, merge cooldown)
//! - Output compression
//! - Where and how results are written to disk
//! - Verbosity of user-facing output

use anyhow::{Result, bail};

use crate::EzPdfError;
use std::{path::PathBuf, str::FromStr, time::Duration};

/// Bytes in one megabyte, as used by the size limits.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Compression level for generated PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams are written exactly as loaded.
    None,
    /// Compress uncompressed streams.
    #[default]
    Standard,
    /// Compress streams and drop objects nothing refers to.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = EzPdfError;

    /// Parse compression level from "none", "standard" or "maximum".
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(EzPdfError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Limits applied to uploads before any document logic runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted single file, in megabytes.
    pub max_file_mb: u64,

    /// Largest accepted combined size of a merge upload, in megabytes.
    pub max_total_mb: u64,

    /// Fewest documents a merge accepts.
    pub min_merge_inputs: usize,

    /// Minimum time between two merges of the same session.
    pub merge_cooldown: Duration,

    /// Longest accepted page-range text.
    pub max_range_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_mb: 100,
            max_total_mb: 500,
            min_merge_inputs: 2,
            merge_cooldown: Duration::from_secs(30),
            max_range_chars: 100,
        }
    }
}

impl Limits {
    /// Largest accepted single file, in bytes.
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_mb.saturating_mul(BYTES_PER_MB)
    }

    /// Largest accepted combined upload, in bytes.
    pub fn max_total_bytes(&self) -> u64 {
        self.max_total_mb.saturating_mul(BYTES_PER_MB)
    }

    /// Check the limits for values no request could satisfy.
    ///
    /// # Errors
    ///
    /// Returns an error if a size limit is zero, the total limit is smaller
    /// than the per-file limit, or a merge would accept fewer than two inputs.
    pub fn validate(&self) -> Result<()> {
        if self.max_file_mb == 0 {
            bail!("max_file_mb must be at least 1");
        }

        if self.max_total_mb < self.max_file_mb {
            bail!(
                "max_total_mb ({}) must not be smaller than max_file_mb ({})",
                self.max_total_mb,
                self.max_file_mb
            );
        }

        if self.min_merge_inputs < 2 {
            bail!("A merge needs at least two inputs");
        }

        if self.max_range_chars == 0 {
            bail!("max_range_chars must be at least 1");
        }

        Ok(())
    }
}

/// Complete configuration for a run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Upload limits.
    pub limits: Limits,

    /// Compression applied to every generated PDF.
    pub compression: CompressionLevel,

    /// Directory that receives generated files.
    pub output_dir: PathBuf,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print a JSON summary instead of prose.
    pub json: bool,

    /// Number of parallel jobs for loading inputs (None = auto-detect).
    pub jobs: Option<usize>,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The limits are unusable
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        self.limits.validate()
    }

    /// Get the effective number of parallel jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
