//! CLI argument parsing for pdfcollate.
//!
//! Flags override the values of a configuration record loaded with
//! `--config`; whatever is still missing afterwards is an error, except the
//! start date, which is asked for interactively.

use clap::Parser;
use std::path::PathBuf;

use pdfcollate::config::{ConfigRecord, parse_date};
use pdfcollate::matching::IdPattern;
use pdfcollate::utils::validate_file_pattern;

/// Collate PDF documents with their supplementary files and a shared appendix.
///
/// Every PDF in the source folder whose name starts with an identifier
/// (a letter followed by digits, then a space) and that was modified on or
/// after the start date is written to the output folder, followed by its
/// supplementary file without the last page and by the appendix.
#[derive(Parser, Debug)]
#[command(name = "pdfcollate")]
#[command(version)]
#[command(about = "Collate PDF documents with their supplementary files", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Folder containing the source documents
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Folder receiving the collated documents
    ///
    /// Created if it does not exist. Existing outputs with the same name
    /// are overwritten.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Folder containing supplementary files
    ///
    /// A supplementary file belongs to a document when its name starts with
    /// the document's identifier followed by a space, e.g. "A100 labs.pdf".
    /// When several match, the first in name order is used.
    #[arg(long, value_name = "DIR")]
    pub supplementary: Option<PathBuf>,

    /// PDF appended in full to every collated document
    #[arg(long, value_name = "FILE")]
    pub appendix: Option<PathBuf>,

    /// Only process documents modified on or after this date
    ///
    /// Format YYYY-MM-DD. When omitted and not set in the config file you
    /// are asked for it; without a terminal, today is used.
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Glob selecting source documents
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Regular expression an identifier must match (case-insensitive)
    #[arg(long, value_name = "REGEX")]
    pub id_pattern: Option<String>,

    /// Scan subfolders of the source folder too
    #[arg(short, long)]
    pub recursive: bool,

    /// Verbose output - show every skipped document and merge step
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output except the final summary
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Load settings from a saved configuration file
    ///
    /// Flags given on the command line take precedence over the file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the effective configuration to a file before running
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,
}

impl Cli {
    /// Validate the flags that can be checked without touching the disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the date, glob or identifier pattern is malformed.
    pub fn validate(&self) -> pdfcollate::Result<()> {
        if let Some(date) = &self.date {
            parse_date(date)?;
        }

        if let Some(pattern) = &self.pattern {
            validate_file_pattern(pattern)?;
        }

        if let Some(pattern) = &self.id_pattern {
            IdPattern::new(pattern)?;
        }

        Ok(())
    }

    /// Overlay the flags that were given onto `record`.
    pub fn apply_to(&self, record: &mut ConfigRecord) {
        let path_string = |path: &PathBuf| path.to_string_lossy().into_owned();

        if let Some(source) = &self.source {
            record.source_folder = path_string(source);
        }
        if let Some(output) = &self.output {
            record.output_folder = path_string(output);
        }
        if let Some(supplementary) = &self.supplementary {
            record.supplementary_folder = path_string(supplementary);
        }
        if let Some(appendix) = &self.appendix {
            record.appendix_file = path_string(appendix);
        }
        if let Some(date) = &self.date {
            record.start_date = date.trim().to_string();
        }
        if let Some(pattern) = &self.pattern {
            record.file_pattern = pattern.clone();
        }
        if let Some(pattern) = &self.id_pattern {
            record.id_pattern = pattern.clone();
        }
        if self.recursive {
            record.recursive = "true".to_string();
        }
    }
}
