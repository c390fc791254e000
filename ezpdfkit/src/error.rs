//! Error types for ezpdfkit.
//!
//! Errors fall into two groups:
//!
//! - **Request errors** abort the whole operation and nothing is returned:
//!   a failed upload check, a document that will not open, a failed write.
//! - **Token errors** are not errors at all from the caller's point of view.
//!   Bad range tokens are collected next to the result (see
//!   [`crate::range::PageSet::rejected`]) and only become an
//!   [`EzPdfError::InvalidParameter`] when nothing usable is left.

use std::io;
use std::path::PathBuf;

/// Result type alias for ezpdfkit operations.
pub type Result<T> = std::result::Result<T, EzPdfError>;

/// Main error type for ezpdfkit operations.
#[derive(Debug, thiserror::Error)]
pub enum EzPdfError {
    /// An upload failed one of the validator checks. The message is shown verbatim.
    #[error("{file}: {message}")]
    Validation {
        /// Name of the rejected upload.
        file: String,
        /// Human readable reason, e.g. `PDF has no pages`.
        message: String,
    },

    /// A user supplied parameter cannot be used (range text, split points, N).
    #[error("{message}")]
    InvalidParameter {
        /// Human readable reason.
        message: String,
    },

    /// The document could not be opened by the PDF library.
    #[error("Failed to open PDF {file}: {reason}")]
    Parse {
        /// Name of the document.
        file: String,
        /// Reason reported by the PDF library.
        reason: String,
    },

    /// The document is encrypted and cannot be processed.
    #[error("{file}: PDF is encrypted and cannot be processed")]
    Encrypted {
        /// Name of the document.
        file: String,
    },

    /// Building or serializing an output document failed.
    #[error("Failed to assemble output document: {reason}")]
    Assembly {
        /// Reason reported while assembling.
        reason: String,
    },

    /// Packaging outputs into an archive failed.
    #[error("Failed to build archive: {reason}")]
    Bundle {
        /// Reason reported by the archive writer.
        reason: String,
    },

    /// A merge was requested with too few inputs.
    #[error("Please upload at least two PDF files.")]
    NotEnoughInputs {
        /// Minimum number of inputs.
        required: usize,
        /// Number of inputs supplied.
        found: usize,
    },

    /// A merge was requested before the cooldown elapsed.
    #[error("Please wait {retry_after_secs} s before merging again.")]
    RateLimited {
        /// Whole seconds until the next merge is allowed.
        retry_after_secs: u64,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Input path is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Reading an input file failed.
    #[error("Failed to read file: {}\n  Reason: {source}", path.display())]
    FailedToRead {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Writing an output file failed.
    #[error("Failed to write output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Output file already exists and overwriting is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output directory",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for EzPdfError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for EzPdfError {
    fn from(err: anyhow::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl From<zip::result::ZipError> for EzPdfError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Bundle {
            reason: err.to_string(),
        }
    }
}

impl EzPdfError {
    /// Create a Validation error.
    pub fn validation(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create a Parse error.
    pub fn parse(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create an Assembly error.
    pub fn assembly(reason: impl Into<String>) -> Self {
        Self::Assembly {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Map a lopdf load failure to the matching error for `file`.
    pub(crate) fn from_load_failure(file: &str, err: &lopdf::Error) -> Self {
        let reason = err.to_string();
        let lowered = reason.to_lowercase();
        if lowered.contains("encrypt") || lowered.contains("password") {
            Self::Encrypted {
                file: file.to_string(),
            }
        } else {
            Self::parse(file, reason)
        }
    }

    /// Check if the caller may fix the input and retry the same request.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::InvalidParameter { .. }
                | Self::NotEnoughInputs { .. }
                | Self::RateLimited { .. }
                | Self::OutputExists { .. }
        )
    }

    /// Check if this error is a document-level failure that aborts the request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. }
                | Self::Encrypted { .. }
                | Self::Assembly { .. }
                | Self::Bundle { .. }
                | Self::FailedToWrite { .. }
                | Self::Cancelled
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => 2,
            Self::NotEnoughInputs { .. } => 2,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToRead { .. } => 2,
            Self::Parse { .. } => 3,
            Self::Encrypted { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::Assembly { .. } => 6,
            Self::Bundle { .. } => 6,
            Self::InvalidParameter { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Other { .. } => 1,
            Self::RateLimited { .. } => 75,
            Self::Cancelled => 130, // Standard exit code for SIGINT
        }
    }
}
