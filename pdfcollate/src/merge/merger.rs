//! Concatenation of merge plans into output documents.
//!
//! The first entry that contributes pages becomes the base document; pages
//! from later entries are renumbered and appended to its page tree. When no
//! entry contributes a page, the first entry is written with an empty page
//! tree. Objects no longer reachable (unselected pages, the appended
//! documents' catalogs) are pruned before writing.

use lopdf::Document;
use std::path::{Path, PathBuf};

use crate::error::{PdfCollateError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::merge::pages::PageExtractor;
use crate::merge::plan::PlanEntry;

/// Outcome of a successful concatenation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConcatOutcome {
    /// Pages in the written document.
    pub pages_written: usize,

    /// Entries that contributed no pages and were left out.
    pub skipped_entries: Vec<PathBuf>,

    /// Size of the written file in bytes.
    pub file_size: u64,
}

/// The concatenation primitive driven by the processor.
///
/// Implementations append the entries in order, honour each entry's page
/// span, skip entries that contribute no pages, and write `output`
/// (creating parent directories, overwriting any existing file).
pub trait Concatenate {
    /// Concatenate `entries` into `output`.
    fn concatenate(&self, entries: &[PlanEntry], output: &Path) -> Result<ConcatOutcome>;
}

/// [`Concatenate`] implementation backed by `lopdf`.
#[derive(Default)]
pub struct PdfConcatenator {
    /// Reader for loading PDFs.
    reader: PdfReader,

    /// Page extractor for page tree operations.
    page_extractor: PageExtractor,

    /// Writer for the output file.
    writer: PdfWriter,
}

impl PdfConcatenator {
    /// Create a new concatenator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the merged document without writing it.
    ///
    /// # Errors
    ///
    /// Returns an error if `entries` is empty, if any entry fails to load,
    /// or if the page tree cannot be updated.
    pub fn build(&self, entries: &[PlanEntry]) -> Result<(Document, ConcatOutcome)> {
        let mut merged: Option<Document> = None;
        let mut empty_base: Option<Document> = None;
        let mut outcome = ConcatOutcome::default();

        for entry in entries {
            let loaded = self.reader.load(&entry.path)?;
            tracing::debug!(
                "Loaded {} ({} page(s))",
                loaded.path.display(),
                loaded.page_count
            );
            let mut doc = loaded.document;

            if let Some(base) = merged.as_ref() {
                doc.renumber_objects_with(base.max_id + 1);
            }

            let page_ids = self.page_extractor.select(&doc, entry.span);
            if page_ids.is_empty() {
                tracing::warn!(
                    "{} contributes no pages, skipping",
                    entry.path.display()
                );
                outcome.skipped_entries.push(entry.path.clone());
                if merged.is_none() && empty_base.is_none() {
                    empty_base = Some(doc);
                }
                continue;
            }

            tracing::debug!(
                "Adding {} page(s) from {}",
                page_ids.len(),
                entry.path.display()
            );
            outcome.pages_written += page_ids.len();

            match merged.as_mut() {
                None => {
                    self.page_extractor.retain_pages(&mut doc, &page_ids)?;
                    merged = Some(doc);
                }
                Some(base) => {
                    self.page_extractor.append_pages(base, doc, &page_ids)?;
                }
            }
        }

        let mut document = match (merged, empty_base) {
            (Some(document), _) => document,
            (None, Some(mut document)) => {
                tracing::warn!("No entry contributes pages, writing an empty document");
                self.page_extractor.retain_pages(&mut document, &[])?;
                document
            }
            (None, None) => return Err(PdfCollateError::merge_failed("Nothing to concatenate")),
        };

        document.prune_objects();
        document.renumber_objects();

        Ok((document, outcome))
    }
}

impl Concatenate for PdfConcatenator {
    fn concatenate(&self, entries: &[PlanEntry], output: &Path) -> Result<ConcatOutcome> {
        let (mut document, mut outcome) = self.build(entries)?;

        let stats = self.writer.save(&mut document, output)?;
        outcome.file_size = stats.file_size;

        Ok(outcome)
    }
}
