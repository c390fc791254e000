//! ezpdfkit - Merge PDF files and split them into parts.
//!
//! The library works on uploads held in memory and produces output files
//! held in memory; reading from and writing to disk lives in [`io`]. It
//! supports:
//!
//! - Merging two or more documents in upload order
//! - Extracting pages named by range text such as `1,3-5,8`
//! - Splitting at chosen pages, every N pages, per page or into halves
//! - Packaging multi-file results into a single ZIP archive
//! - Upload checks (extension, size, header, readability, page count)
//!
//! # Examples
//!
//! ## Merge
//!
//! ```no_run
//! use ezpdfkit::{Config, Toolkit, Upload};
//!
//! # fn example(a: Vec<u8>, b: Vec<u8>) -> ezpdfkit::Result<()> {
//! let toolkit = Toolkit::new(&Config::default());
//! let report = toolkit.merge(&[Upload::new("a.pdf", a), Upload::new("b.pdf", b)])?;
//! println!("{} pages", report.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Split
//!
//! ```no_run
//! use ezpdfkit::service::SplitRequest;
//! use ezpdfkit::{Config, Toolkit, Upload};
//!
//! # fn example(bytes: Vec<u8>) -> ezpdfkit::Result<()> {
//! let toolkit = Toolkit::new(&Config::default());
//! let request = SplitRequest::Extract {
//!     pages: "1,3-5".to_string(),
//! };
//! let outcome = toolkit.split(&Upload::new("report.pdf", bytes), &request)?;
//! for (name, bytes) in outcome.files() {
//!     println!("{name}: {} bytes", bytes.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use ezpdfkit::range;
//! use ezpdfkit::plan::{plan, Strategy};
//!
//! let pages = range::parse("1,3-5,x", 10);
//! assert_eq!(pages.rejected(), &["x".to_string()]);
//!
//! let split = plan(10, &Strategy::EveryN { n: 4 }).unwrap();
//! assert_eq!(split.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assemble;
pub mod bundle;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod plan;
pub mod range;
pub mod service;
pub mod split;
pub mod throttle;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{EzPdfError, Result};
pub use service::Toolkit;
pub use validation::Upload;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
