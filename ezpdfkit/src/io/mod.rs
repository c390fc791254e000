//! File I/O for ezpdfkit.
//!
//! This module moves bytes between the filesystem and the in-memory core:
//! - Reading uploads from disk, several at a time
//! - Expanding glob patterns into input paths
//! - Writing generated files atomically, honouring the overwrite mode
//!
//! # Examples
//!
//! ```no_run
//! use ezpdfkit::io::{read_uploads, write_output};
//! use ezpdfkit::config::Config;
//!
//! # async fn example(config: Config) -> ezpdfkit::Result<()> {
//! let uploads = read_uploads(&["scans/*.pdf"], &config).await?;
//! write_output("merged.pdf", &uploads[0].bytes, &config).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{ReadStatistics, UploadReader};
pub use writer::{OutputWriter, WriteStatistics};

use crate::config::Config;
use crate::error::Result;
use crate::utils::expand_patterns;
use crate::validation::Upload;

/// Expand `patterns` and read every matching file, in order.
///
/// # Errors
///
/// Returns an error if a pattern is malformed or a file cannot be read.
pub async fn read_uploads<T>(patterns: T, config: &Config) -> Result<Vec<Upload>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let paths = expand_patterns(patterns)?;
    let (uploads, _stats) = UploadReader::new()
        .read_all(&paths, config.effective_jobs())
        .await?;
    Ok(uploads)
}

/// Write one generated file into the configured output directory.
///
/// # Errors
///
/// Returns an error if the file exists and may not be replaced, or the
/// write fails.
pub async fn write_output(name: &str, bytes: &[u8], config: &Config) -> Result<WriteStatistics> {
    OutputWriter::new(config.overwrite_mode)
        .write(&config.output_dir, name, bytes)
        .await
}
