//! The processing pipeline: scan, admit, plan and merge.
//!
//! Each discovered file moves through a small state machine:
//!
//! ```text
//! Discovered ─┬─> SkippedByDate
//!             ├─> SkippedByFormat
//!             └─> Admitted ─┬─> Processed
//!                           └─> Errored
//! ```
//!
//! The date check runs before identifier extraction, so an old file is
//! counted as skipped by date whatever its name. Every document is attempted
//! once; a failure is counted and the run moves on to the next file.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{Config, DATE_FORMAT};
use crate::io::format_file_size;
use crate::matching::{DEFAULT_EXTENSION, date_label, find_matches, resolve_date};
use crate::merge::{Concatenate, MergePlan, PdfConcatenator};
use crate::output::{ProcessEvent, Reporter};
use crate::utils::discover_source_files;

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    /// Documents merged and written.
    pub processed: usize,

    /// Documents whose name carries no identifier.
    pub skipped_format: usize,

    /// Documents older than the start date.
    pub skipped_date: usize,

    /// Documents whose merge failed.
    pub errors: usize,
}

impl RunStatistics {
    /// Count a document that reached a terminal state.
    ///
    /// Non-terminal states are ignored.
    pub fn record(&mut self, state: DocumentState) {
        match state {
            DocumentState::Processed => self.processed += 1,
            DocumentState::SkippedByFormat => self.skipped_format += 1,
            DocumentState::SkippedByDate => self.skipped_date += 1,
            DocumentState::Errored => self.errors += 1,
            DocumentState::Discovered | DocumentState::Admitted => {}
        }
    }

    /// Number of documents counted.
    pub fn total(&self) -> usize {
        self.processed + self.skipped_format + self.skipped_date + self.errors
    }
}

/// Where a document is in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Found by the scan, not yet inspected.
    Discovered,
    /// Older than the start date.
    SkippedByDate,
    /// No identifier in the file name.
    SkippedByFormat,
    /// In scope, waiting to be merged.
    Admitted,
    /// Merged and written.
    Processed,
    /// The merge failed.
    Errored,
}

impl DocumentState {
    /// Whether the document is done for this run.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Discovered | Self::Admitted)
    }
}

/// A file found by the scan, with what was derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path of the file.
    pub path: PathBuf,

    /// File name, used for matching and for the output name.
    pub name: String,

    /// Local date of the last modification, if it could be read.
    pub effective_date: Option<NaiveDate>,

    /// Identifier from the file name. Not looked up for documents skipped by date.
    pub identifier: Option<String>,

    /// Current state.
    pub state: DocumentState,
}

impl SourceDocument {
    /// A freshly discovered document.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path,
            name,
            effective_date: None,
            identifier: None,
            state: DocumentState::Discovered,
        }
    }

    /// Whether the document passed the date and identifier checks.
    pub fn is_admitted(&self) -> bool {
        matches!(
            self.state,
            DocumentState::Admitted | DocumentState::Processed | DocumentState::Errored
        )
    }
}

/// Runs the pipeline for one configuration.
pub struct DocumentProcessor {
    config: Config,
    concatenator: Box<dyn Concatenate>,
}

impl DocumentProcessor {
    /// Create a processor that merges with [`PdfConcatenator`].
    pub fn new(config: Config) -> Self {
        Self::with_concatenator(config, Box::new(PdfConcatenator::new()))
    }

    /// Create a processor with a custom concatenation primitive.
    pub fn with_concatenator(config: Config, concatenator: Box<dyn Concatenate>) -> Self {
        Self {
            config,
            concatenator,
        }
    }

    /// The configuration this processor runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process every document under the source folder.
    ///
    /// An invalid configuration is reported and yields zero statistics
    /// without scanning. Per-document failures are counted, never returned.
    pub fn run(&self, reporter: &mut dyn Reporter) -> RunStatistics {
        let mut stats = RunStatistics::default();

        if let Err(err) = self.config.validate() {
            tracing::error!("Invalid configuration: {err}");
            reporter.report(&ProcessEvent::ConfigInvalid {
                message: err.to_string(),
            });
            return stats;
        }

        let folder = &self.config.source_folder;
        tracing::info!("Scanning for documents in {}", folder.display());
        reporter.report(&ProcessEvent::ScanStarted {
            folder: folder.clone(),
        });

        let paths = match discover_source_files(
            folder,
            &self.config.file_pattern,
            self.config.recursive,
        ) {
            Ok(paths) => paths,
            Err(err) => {
                tracing::error!("Scan failed: {err}");
                reporter.report(&ProcessEvent::ConfigInvalid {
                    message: err.to_string(),
                });
                return stats;
            }
        };

        if paths.is_empty() {
            tracing::warn!("No matching files found in {}", folder.display());
            reporter.report(&ProcessEvent::NoFilesFound {
                folder: folder.clone(),
            });
            return stats;
        }

        tracing::info!("Found {} matching file(s)", paths.len());
        reporter.report(&ProcessEvent::FilesFound { count: paths.len() });

        for path in paths {
            if !path.is_file() {
                tracing::debug!("Skipping {}: not a regular file", path.display());
                continue;
            }

            let document = self.process(&path, reporter);
            stats.record(document.state);
        }

        tracing::info!(
            "Run complete: {} processed, {} skipped (format), {} skipped (date), {} error(s)",
            stats.processed,
            stats.skipped_format,
            stats.skipped_date,
            stats.errors
        );

        stats
    }

    /// Derive date and identifier for a file and decide whether it is in scope.
    ///
    /// The returned document is `SkippedByDate`, `SkippedByFormat` or
    /// `Admitted`. A date that cannot be read never causes a skip.
    pub fn inspect(&self, path: &Path) -> SourceDocument {
        let mut document = SourceDocument::new(path);
        document.effective_date = resolve_date(path);

        if let Some(date) = document.effective_date
            && date < self.config.start_date
        {
            tracing::debug!(
                "Skipping {}: dated {date}, before {}",
                document.name,
                self.config.start_date
            );
            document.state = DocumentState::SkippedByDate;
            return document;
        }

        document.identifier = self.config.id_pattern.extract(&document.name);
        document.state = if document.identifier.is_some() {
            DocumentState::Admitted
        } else {
            tracing::debug!("Skipping {}: no identifier in name", document.name);
            DocumentState::SkippedByFormat
        };

        document
    }

    /// Inspect one file and, if admitted, merge it.
    ///
    /// The returned document is always in a terminal state.
    pub fn process(&self, path: &Path, reporter: &mut dyn Reporter) -> SourceDocument {
        let mut document = self.inspect(path);

        match document.state {
            DocumentState::SkippedByDate => {
                let date = document
                    .effective_date
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_default();
                reporter.report(&ProcessEvent::SkippedByDate {
                    name: document.name.clone(),
                    date,
                });
            }
            DocumentState::SkippedByFormat => {
                reporter.report(&ProcessEvent::SkippedByFormat {
                    name: document.name.clone(),
                });
            }
            _ => self.merge(&mut document, reporter),
        }

        document
    }

    fn merge(&self, document: &mut SourceDocument, reporter: &mut dyn Reporter) {
        let identifier = document.identifier.clone().unwrap_or_default();

        tracing::info!(
            "Processing {} ({}), identifier {identifier}",
            document.name,
            date_label(document.effective_date)
        );
        reporter.report(&ProcessEvent::DocumentStarted {
            name: document.name.clone(),
            date_label: date_label(document.effective_date),
            identifier: identifier.clone(),
        });

        let supplementary = self.resolve_supplementary(&identifier, reporter);
        let appendix = self
            .config
            .appendix_file
            .as_deref()
            .filter(|path| path.is_file());

        let plan = MergePlan::build(&document.path, supplementary.as_deref(), appendix);

        let output = match document.path.file_name() {
            Some(name) => self.config.output_folder.join(name),
            None => self.config.output_folder.join(&document.name),
        };

        if output.exists() {
            tracing::warn!("Output {} exists and will be overwritten", output.display());
            reporter.report(&ProcessEvent::OutputExists {
                path: output.clone(),
            });
        }

        for entry in plan.entries() {
            tracing::debug!("Adding {}", entry.description);
            reporter.report(&ProcessEvent::EntryAdded {
                description: entry.description.clone(),
            });
        }

        match self.concatenator.concatenate(plan.entries(), &output) {
            Ok(outcome) => {
                for path in outcome.skipped_entries {
                    reporter.report(&ProcessEvent::EntrySkipped { path });
                }

                tracing::info!(
                    "Wrote {} ({} page(s), {})",
                    output.display(),
                    outcome.pages_written,
                    format_file_size(outcome.file_size)
                );
                reporter.report(&ProcessEvent::DocumentProcessed {
                    name: document.name.clone(),
                    output,
                    pages: outcome.pages_written,
                });
                document.state = DocumentState::Processed;
            }
            Err(err) => {
                tracing::error!("Error processing {}: {err}", document.name);
                reporter.report(&ProcessEvent::DocumentFailed {
                    name: document.name.clone(),
                    reason: err.to_string(),
                });
                document.state = DocumentState::Errored;
            }
        }
    }

    fn resolve_supplementary(
        &self,
        identifier: &str,
        reporter: &mut dyn Reporter,
    ) -> Option<PathBuf> {
        let folder = self.config.supplementary_folder.as_deref()?;

        let mut matches = find_matches(Some(folder), identifier, DEFAULT_EXTENSION);
        if matches.is_empty() {
            tracing::debug!("No supplementary file for {identifier}");
            reporter.report(&ProcessEvent::NoSupplementary {
                identifier: identifier.to_string(),
            });
            return None;
        }

        let count = matches.len();
        let chosen = matches.swap_remove(0);
        let chosen_name = chosen
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if count > 1 {
            tracing::warn!(
                "{count} supplementary files match {identifier}, using {chosen_name}"
            );
            reporter.report(&ProcessEvent::MultipleMatches {
                identifier: identifier.to_string(),
                chosen: chosen_name.clone(),
                count,
            });
        }

        reporter.report(&ProcessEvent::SupplementaryFound { name: chosen_name });
        Some(chosen)
    }
}

/// Run the pipeline once with the default concatenation primitive.
pub fn run(config: Config, reporter: &mut dyn Reporter) -> RunStatistics {
    DocumentProcessor::new(config).run(reporter)
}
