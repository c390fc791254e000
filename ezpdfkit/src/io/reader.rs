//! Reading uploads from disk.
//!
//! Files are read as raw bytes into [`Upload`]s; parsing happens later,
//! during validation. Several files can be read concurrently while keeping
//! their input order.
//!
//! # Examples
//!
//! ```no_run
//! use ezpdfkit::io::reader::UploadReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> ezpdfkit::Result<()> {
//! let reader = UploadReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (uploads, stats) = reader.read_all(&paths, 4).await?;
//! println!("Read {} files, {}", uploads.len(), stats.format_total_size());
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{EzPdfError, Result};
use crate::utils::format_file_size;
use crate::validation::Upload;

/// Statistics for a batch read.
#[derive(Debug, Clone)]
pub struct ReadStatistics {
    /// Number of files read.
    pub files_read: usize,

    /// Combined size in bytes.
    pub total_size: u64,

    /// Time taken for the whole batch.
    pub total_time: Duration,
}

impl ReadStatistics {
    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Reads uploads from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadReader;

impl UploadReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Read one file. The upload is named after the file name.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist
    /// - The path is not a regular file
    /// - The file cannot be read
    pub async fn read(&self, path: &Path) -> Result<Upload> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EzPdfError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                EzPdfError::FailedToRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if !metadata.is_file() {
            return Err(EzPdfError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| EzPdfError::FailedToRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!(path = %path.display(), size = bytes.len(), "read upload");
        Ok(Upload::new(name, bytes))
    }

    /// Read several files with up to `workers` reads in flight.
    ///
    /// Uploads come back in the order of `paths`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first path, in input order, that failed.
    pub async fn read_all(
        &self,
        paths: &[PathBuf],
        workers: usize,
    ) -> Result<(Vec<Upload>, ReadStatistics)> {
        let start = Instant::now();
        let workers = workers.max(1);

        let tasks = paths.iter().enumerate().map(|(idx, path)| {
            let reader = *self;
            async move { (idx, reader.read(path).await) }
        });

        let mut indexed: Vec<(usize, Result<Upload>)> = stream::iter(tasks)
            .buffer_unordered(workers)
            .collect()
            .await;
        indexed.sort_by_key(|(idx, _)| *idx);

        let uploads = indexed
            .into_iter()
            .map(|(_, result)| result)
            .collect::<Result<Vec<_>>>()?;

        let stats = ReadStatistics {
            files_read: uploads.len(),
            total_size: uploads.iter().map(Upload::size).sum(),
            total_time: start.elapsed(),
        };

        Ok((uploads, stats))
    }
}
