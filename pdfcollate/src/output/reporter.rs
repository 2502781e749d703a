//! Progress reporting for document processing.
//!
//! The processor never prints. It describes what happens as a stream of
//! [`ProcessEvent`]s pushed into a [`Reporter`] supplied by the caller; the
//! presentation layer decides how (and whether) to show them.

use std::path::PathBuf;

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    /// The configuration failed validation; nothing was scanned.
    ConfigInvalid {
        /// Validation error message.
        message: String,
    },

    /// Scanning of the source folder has started.
    ScanStarted {
        /// Folder being scanned.
        folder: PathBuf,
    },

    /// The scan found nothing matching the file pattern.
    NoFilesFound {
        /// Folder that was scanned.
        folder: PathBuf,
    },

    /// The scan found candidate documents.
    FilesFound {
        /// Number of matching paths.
        count: usize,
    },

    /// A document was skipped because it is older than the cutoff date.
    SkippedByDate {
        /// File name of the document.
        name: String,
        /// Its resolved date, `YYYY-MM-DD`.
        date: String,
    },

    /// A document was skipped because its name carries no identifier.
    SkippedByFormat {
        /// File name of the document.
        name: String,
    },

    /// Processing of an admitted document has started.
    DocumentStarted {
        /// File name of the document.
        name: String,
        /// Its resolved date, or `Unknown Date`.
        date_label: String,
        /// Identifier extracted from the name.
        identifier: String,
    },

    /// A supplementary file was found for the document.
    SupplementaryFound {
        /// File name of the supplementary file in use.
        name: String,
    },

    /// More than one supplementary file matched; the first is used.
    MultipleMatches {
        /// Identifier that matched several files.
        identifier: String,
        /// File name of the match in use.
        chosen: String,
        /// Number of matching files.
        count: usize,
    },

    /// No supplementary file matched the identifier.
    NoSupplementary {
        /// Identifier that was searched for.
        identifier: String,
    },

    /// The output file already exists and will be overwritten.
    OutputExists {
        /// Output path.
        path: PathBuf,
    },

    /// An entry of the merge plan is about to be concatenated.
    EntryAdded {
        /// Description of the entry.
        description: String,
    },

    /// A plan entry contributed no pages and was left out of the output.
    EntrySkipped {
        /// File that was left out.
        path: PathBuf,
    },

    /// The document was merged and written.
    DocumentProcessed {
        /// File name of the source document.
        name: String,
        /// Path of the written output.
        output: PathBuf,
        /// Pages in the output.
        pages: usize,
    },

    /// The document could not be merged.
    DocumentFailed {
        /// File name of the source document.
        name: String,
        /// Error message.
        reason: String,
    },
}

/// Sink for [`ProcessEvent`]s.
pub trait Reporter {
    /// Receive one event.
    fn report(&mut self, event: &ProcessEvent);
}

/// Reporter that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: &ProcessEvent) {}
}

/// Reporter that keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    /// Events in the order they were reported.
    pub events: Vec<ProcessEvent>,
}

impl RecordingReporter {
    /// Create an empty recording reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any recorded event satisfies `predicate`.
    pub fn any(&self, predicate: impl Fn(&ProcessEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: &ProcessEvent) {
        self.events.push(event.clone());
    }
}
