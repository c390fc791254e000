//! Writing generated files to disk.
//!
//! Outputs are written atomically: the bytes go to a temporary file next to
//! the target, which is then renamed into place. A reader never sees a
//! half-written PDF or archive.
//!
//! # Examples
//!
//! ```no_run
//! use ezpdfkit::io::writer::OutputWriter;
//! use ezpdfkit::config::OverwriteMode;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> ezpdfkit::Result<()> {
//! let writer = OutputWriter::new(OverwriteMode::NoClobber);
//! let stats = writer.write(Path::new("out"), "merged.pdf", &bytes).await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::config::OverwriteMode;
use crate::error::{EzPdfError, Result};
use crate::utils::format_file_size;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes generated files into a directory.
#[derive(Debug, Clone, Copy)]
pub struct OutputWriter {
    overwrite_mode: OverwriteMode,
    atomic: bool,
}

impl OutputWriter {
    /// Create a writer.
    ///
    /// The writer cannot ask anyone, so [`OverwriteMode::Prompt`] refuses
    /// existing files like [`OverwriteMode::NoClobber`]; callers that can
    /// prompt do so first and then write with [`OverwriteMode::Force`].
    pub fn new(overwrite_mode: OverwriteMode) -> Self {
        Self {
            overwrite_mode,
            atomic: true,
        }
    }

    /// Create a writer without atomic writes (faster but less safe).
    pub fn non_atomic(overwrite_mode: OverwriteMode) -> Self {
        Self {
            overwrite_mode,
            atomic: false,
        }
    }

    /// Write `bytes` to `dir/name`, creating `dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target exists and overwriting is not allowed
    /// - The directory cannot be created
    /// - The write or the final rename fails
    pub async fn write(&self, dir: &Path, name: &str, bytes: &[u8]) -> Result<WriteStatistics> {
        let path = dir.join(name);

        if self.overwrite_mode != OverwriteMode::Force && self.exists(&path).await {
            return Err(EzPdfError::OutputExists { path });
        }

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| EzPdfError::FailedToWrite {
                path: dir.to_path_buf(),
                source: e,
            })?;

        let atomic = self.atomic;
        let bytes = bytes.to_vec();
        let stats = task::spawn_blocking(move || {
            let start = Instant::now();

            let write_path = if atomic {
                temp_path_for(&path)
            } else {
                path.clone()
            };

            let write = || -> std::io::Result<()> {
                let mut file = std::fs::File::create(&write_path)?;
                file.write_all(&bytes)?;
                file.sync_all()
            };
            write().map_err(|e| EzPdfError::FailedToWrite {
                path: write_path.clone(),
                source: e,
            })?;

            if atomic && let Err(e) = std::fs::rename(&write_path, &path) {
                let _ = std::fs::remove_file(&write_path);
                return Err(EzPdfError::FailedToWrite {
                    path: path.clone(),
                    source: e,
                });
            }

            Ok::<_, EzPdfError>(WriteStatistics {
                write_time: start.elapsed(),
                file_size: bytes.len() as u64,
                output_path: path,
            })
        })
        .await
        .map_err(|e| EzPdfError::other(format!("Write task failed: {e}")))??;

        debug!(path = %stats.output_path.display(), size = stats.file_size, "wrote output");
        Ok(stats)
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new(OverwriteMode::default())
    }
}

/// Hidden temporary sibling of `path`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}
