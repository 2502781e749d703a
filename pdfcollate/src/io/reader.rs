//! PDF reading and loading operations.

use lopdf::Document;
use std::path::{Path, PathBuf};

use crate::error::{PdfCollateError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,
}

/// PDF reader.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// A document without pages loads successfully; deciding what to do with
    /// it is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist or is not a file
    /// - The file is not a valid PDF
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_path_exists(path)?;

        let document = Document::load(path)
            .map_err(|e| PdfCollateError::failed_to_load_pdf(path.to_path_buf(), e.to_string()))?;
        let page_count = document.get_pages().len();

        Ok(LoadedPdf {
            document,
            path: path.to_path_buf(),
            page_count,
        })
    }

    /// Check that `path` exists and is a regular file.
    pub fn check_path_exists(path: &Path) -> Result<()> {
        let exists = path.try_exists()?;
        if !exists {
            return Err(PdfCollateError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(PdfCollateError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }
}
