//! pdfcollate - Collate PDF documents with their supplementary files.
//!
//! This library scans a folder of PDF documents and, for each one, builds a
//! single output PDF made of:
//!
//! - the document itself, in full
//! - its supplementary file, matched by the identifier at the start of the
//!   file name, without its last page
//! - a shared appendix, in full
//!
//! Documents older than a start date, or whose name carries no identifier,
//! are counted and skipped.
//!
//! # Examples
//!
//! ## Running a batch
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use pdfcollate::output::NullReporter;
//! use pdfcollate::{Config, DocumentProcessor};
//!
//! let config = Config::new(
//!     "documents",
//!     "collated",
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//! )
//! .with_supplementary_folder("supplements")
//! .with_appendix_file("appendix.pdf");
//!
//! let stats = DocumentProcessor::new(config).run(&mut NullReporter);
//! println!("{} processed, {} errors", stats.processed, stats.errors);
//! ```
//!
//! ## Using individual components
//!
//! ```no_run
//! use pdfcollate::matching::{IdPattern, find_matches};
//! use pdfcollate::merge::{Concatenate, MergePlan, PdfConcatenator};
//! use std::path::Path;
//!
//! # fn example() -> pdfcollate::Result<()> {
//! let source = Path::new("documents/A100 report.pdf");
//! let id = IdPattern::default().extract("A100 report.pdf").unwrap();
//! let supplementary = find_matches(Some(Path::new("supplements")), &id, ".pdf");
//!
//! let plan = MergePlan::build(source, supplementary.first().map(|p| p.as_path()), None);
//! PdfConcatenator::new().concatenate(plan.entries(), Path::new("out/A100 report.pdf"))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod matching;
pub mod merge;
pub mod output;
pub mod processor;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, ConfigRecord};
pub use error::{PdfCollateError, Result};
pub use processor::{DocumentProcessor, RunStatistics, run};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
