//! PDF writing and saving operations.
//!
//! Outputs are written in place: an existing file at the output path is
//! truncated and replaced. Missing parent directories are created.

use lopdf::Document;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PdfCollateError, Result};

const BUFFER_SIZE: usize = 8192;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

/// PDF writer. Content streams are compressed before saving.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Create a new PDF writer.
    pub fn new() -> Self {
        Self
    }

    /// Save a PDF document to `path`, overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directories cannot be created
    /// - The file cannot be created or opened for writing
    /// - Serialization or flushing fails
    pub fn save(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PdfCollateError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        doc.compress();

        let file =
            std::fs::File::create(path).map_err(|e| PdfCollateError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut writer = BufWriter::with_capacity(BUFFER_SIZE, file);

        doc.save_to(&mut writer)
            .map_err(|e| PdfCollateError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(e.to_string()),
            })?;

        writer.flush().map_err(|e| PdfCollateError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Ok(WriteStatistics {
            file_size,
            output_path: path.to_path_buf(),
        })
    }
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
