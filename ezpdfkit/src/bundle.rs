//! Packaging of several outputs into one zip archive.

use serde::Serialize;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::assemble::OutputFile;
use crate::error::{EzPdfError, Result};

/// Summary of one file inside a [`Bundle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// Entry name inside the archive.
    pub name: String,
    /// Pages in the entry's document.
    pub page_count: usize,
    /// Uncompressed size in bytes.
    pub size: u64,
}

/// A zip archive of generated files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Archive file name.
    pub name: String,

    /// Archive contents.
    #[serde(skip)]
    pub bytes: Vec<u8>,

    /// Entries in insertion order.
    pub entries: Vec<BundleEntry>,
}

impl Bundle {
    /// Size of the archive in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// What a split hands back: one file, or an archive of several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SplitOutput {
    /// A single document, not archived.
    Single(OutputFile),
    /// Several documents in one archive.
    Bundle(Bundle),
}

impl SplitOutput {
    /// File name to store the output under.
    pub fn name(&self) -> &str {
        match self {
            Self::Single(file) => &file.name,
            Self::Bundle(bundle) => &bundle.name,
        }
    }

    /// Bytes to store.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Single(file) => &file.bytes,
            Self::Bundle(bundle) => &bundle.bytes,
        }
    }

    /// Number of documents produced.
    pub fn file_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Bundle(bundle) => bundle.entries.len(),
        }
    }
}

/// Write `files` into a zip archive named `name`, in the given order.
///
/// # Errors
///
/// Returns [`EzPdfError::Bundle`] if `files` is empty or the archive cannot
/// be written.
pub fn build(name: impl Into<String>, files: &[OutputFile]) -> Result<Bundle> {
    if files.is_empty() {
        return Err(EzPdfError::Bundle {
            reason: "nothing to archive".into(),
        });
    }

    let name = name.into();
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for file in files {
        zip.start_file(file.name.as_str(), options)?;
        zip.write_all(&file.bytes).map_err(|e| EzPdfError::Bundle {
            reason: format!("failed to write entry {}: {e}", file.name),
        })?;
    }

    let bytes = zip.finish()?.into_inner();
    debug!(archive = %name, entries = files.len(), size = bytes.len(), "built archive");

    Ok(Bundle {
        name,
        bytes,
        entries: files
            .iter()
            .map(|file| BundleEntry {
                name: file.name.clone(),
                page_count: file.page_count,
                size: file.size(),
            })
            .collect(),
    })
}

/// Archive `files` as `name`, unless there is only one.
///
/// A single file is returned as it is, under its own name.
///
/// # Errors
///
/// See [`build`].
pub fn bundle(name: impl Into<String>, mut files: Vec<OutputFile>) -> Result<SplitOutput> {
    if files.len() == 1
        && let Some(file) = files.pop()
    {
        return Ok(SplitOutput::Single(file));
    }

    build(name, &files).map(SplitOutput::Bundle)
}
