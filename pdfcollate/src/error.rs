//! Error types for pdfcollate.
//!
//! Errors are designed to be informative and actionable, providing clear
//! context about what went wrong and which file it concerns.
//!
//! # Error Categories
//!
//! - **Setup Errors**: missing folders, malformed patterns, unreadable config records
//! - **PDF Errors**: files that cannot be loaded or produce no pages
//! - **Output Errors**: output files that cannot be created or written
//!
//! Soft skips (a document older than the cutoff, a filename without an
//! identifier) are not errors and never show up here.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfcollate operations.
pub type Result<T> = std::result::Result<T, PdfCollateError>;

/// Main error type for pdfcollate operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfCollateError {
    /// A required file or folder was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// A path expected to be a regular file is something else.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// A path expected to be a directory is something else.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },

    /// Failed to load a PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Failed to create an output file or its parent folder.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to an output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A persisted configuration record could not be read.
    #[error("Failed to read configuration record: {}\n  Reason: {source}", path.display())]
    FailedToReadRecord {
        /// Path to the record.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A persisted configuration record is not valid.
    #[error("Invalid configuration record: {}\n  Details: {details}", path.display())]
    InvalidRecord {
        /// Path to the record.
        path: PathBuf,
        /// What is wrong with it.
        details: String,
    },

    /// A glob or identifier pattern could not be compiled.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as given.
        pattern: String,
        /// Parser message.
        reason: String,
    },

    /// A date string is not in `YYYY-MM-DD` form.
    #[error("Invalid date '{value}'. Expected format YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// Concatenation produced nothing or the page tree could not be updated.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

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

impl From<lopdf::Error> for PdfCollateError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfCollateError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a NotADirectory error.
    pub fn not_a_directory(path: PathBuf) -> Self {
        Self::NotADirectory { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an InvalidPattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
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
}
