//! Reporting and console output.
//!
//! The processor reports what happens through the [`Reporter`] trait;
//! [`OutputFormatter`] is the console implementation used by the CLI.
//!
//! # Examples
//!
//! ```no_run
//! use pdfcollate::output::OutputFormatter;
//! use pdfcollate::{Config, DocumentProcessor};
//!
//! # fn example(config: Config) {
//! let mut formatter = OutputFormatter::new(false, false);
//! let stats = DocumentProcessor::new(config).run(&mut formatter);
//! formatter.run_summary(&stats);
//! # }
//! ```

pub mod formatter;
pub mod reporter;

pub use formatter::{MessageLevel, OutputFormatter, render_event, summary_lines};
pub use reporter::{NullReporter, ProcessEvent, RecordingReporter, Reporter};
