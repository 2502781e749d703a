//! Configuration for a processing run.
//!
//! [`Config`] is the validated, structured form the processor works from.
//! [`ConfigRecord`] is its persisted counterpart: a flat JSON object of
//! string fields that can be saved between runs and loaded again.
//!
//! String inputs (paths, dates, flags) are normalised into structured values
//! once, when a [`Config`] is built from a record; the config is not
//! modified afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PdfCollateError, Result};
use crate::matching::{DEFAULT_ID_PATTERN, IdPattern};
use crate::utils::validate_file_pattern;

/// Default glob for source documents.
pub const DEFAULT_FILE_PATTERN: &str = "*.pdf";

/// Date format used for input, persisted records and reporting.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Complete configuration for a processing run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Folder scanned for source documents.
    pub source_folder: PathBuf,

    /// Folder searched for supplementary files.
    pub supplementary_folder: Option<PathBuf>,

    /// Appendix appended in full after every processed document.
    pub appendix_file: Option<PathBuf>,

    /// Folder receiving one output per processed document.
    pub output_folder: PathBuf,

    /// Inclusive lower bound on a document's modification date.
    pub start_date: NaiveDate,

    /// Glob selecting source documents by name.
    pub file_pattern: String,

    /// Pattern an identifier must match.
    pub id_pattern: IdPattern,

    /// Scan subfolders of the source folder too.
    pub recursive: bool,
}

impl Config {
    /// Create a configuration with default pattern and no optional inputs.
    pub fn new(
        source_folder: impl Into<PathBuf>,
        output_folder: impl Into<PathBuf>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            source_folder: source_folder.into(),
            supplementary_folder: None,
            appendix_file: None,
            output_folder: output_folder.into(),
            start_date,
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            id_pattern: IdPattern::default(),
            recursive: false,
        }
    }

    /// Set the supplementary folder.
    pub fn with_supplementary_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.supplementary_folder = Some(folder.into());
        self
    }

    /// Set the appendix file.
    pub fn with_appendix_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.appendix_file = Some(file.into());
        self
    }

    /// Set the source file glob.
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    /// Set the identifier pattern.
    pub fn with_id_pattern(mut self, pattern: IdPattern) -> Self {
        self.id_pattern = pattern;
        self
    }

    /// Enable or disable recursive scanning.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Validate the configuration.
    ///
    /// The output folder is created when it does not exist yet; nothing else
    /// on disk is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source folder is missing or not a directory
    /// - A configured supplementary folder is missing or not a directory
    /// - A configured appendix is missing or not a regular file
    /// - The file pattern is not a valid glob
    /// - The output folder cannot be created, or exists as something else
    pub fn validate(&self) -> Result<()> {
        require_directory(&self.source_folder)?;

        if let Some(folder) = &self.supplementary_folder {
            require_directory(folder)?;
        }

        if let Some(file) = &self.appendix_file {
            if !file.exists() {
                return Err(PdfCollateError::file_not_found(file.clone()));
            }
            if !file.is_file() {
                return Err(PdfCollateError::not_a_file(file.clone()));
            }
        }

        validate_file_pattern(&self.file_pattern)?;

        if !self.output_folder.exists() {
            tracing::debug!("Creating output folder {}", self.output_folder.display());
            std::fs::create_dir_all(&self.output_folder).map_err(|e| {
                PdfCollateError::FailedToCreateOutput {
                    path: self.output_folder.clone(),
                    source: e,
                }
            })?;
        } else if !self.output_folder.is_dir() {
            return Err(PdfCollateError::not_a_directory(self.output_folder.clone()));
        }

        Ok(())
    }

    /// Build a configuration from a persisted record.
    ///
    /// Empty optional fields mean "not set"; an empty file or identifier
    /// pattern falls back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the source folder, output folder or start date is
    /// missing, or if the date, identifier pattern or recursive flag cannot
    /// be parsed.
    pub fn from_record(record: &ConfigRecord) -> Result<Self> {
        let source_folder = required(&record.source_folder, "Source folder is required")?;
        let output_folder = required(&record.output_folder, "Output folder is required")?;
        let start_date = parse_date(required(&record.start_date, "Start date is required")?)?;

        let id_pattern = match record.id_pattern.trim() {
            "" => IdPattern::default(),
            pattern => IdPattern::new(pattern)?,
        };

        let file_pattern = match record.file_pattern.trim() {
            "" => DEFAULT_FILE_PATTERN.to_string(),
            pattern => pattern.to_string(),
        };

        let recursive = match record.recursive.trim() {
            "" | "false" => false,
            "true" => true,
            other => {
                return Err(PdfCollateError::invalid_config(format!(
                    "Invalid recursive flag '{other}'. Must be 'true' or 'false'"
                )));
            }
        };

        Ok(Self {
            source_folder: PathBuf::from(source_folder),
            supplementary_folder: optional(&record.supplementary_folder),
            appendix_file: optional(&record.appendix_file),
            output_folder: PathBuf::from(output_folder),
            start_date,
            file_pattern,
            id_pattern,
            recursive,
        })
    }

    /// Convert into the persisted record form.
    pub fn to_record(&self) -> ConfigRecord {
        let path_string = |path: &Path| path.to_string_lossy().into_owned();

        ConfigRecord {
            source_folder: path_string(&self.source_folder),
            supplementary_folder: self
                .supplementary_folder
                .as_deref()
                .map(path_string)
                .unwrap_or_default(),
            appendix_file: self
                .appendix_file
                .as_deref()
                .map(path_string)
                .unwrap_or_default(),
            output_folder: path_string(&self.output_folder),
            start_date: self.start_date.format(DATE_FORMAT).to_string(),
            file_pattern: self.file_pattern.clone(),
            id_pattern: self.id_pattern.as_str().to_string(),
            recursive: self.recursive.to_string(),
        }
    }
}

/// Persisted configuration: every field is a string.
///
/// Optional values are stored as empty strings, the start date as
/// `YYYY-MM-DD` and the recursive flag as `"true"` or `"false"`. Missing
/// keys take their [`Default`] values: `*.pdf` for the file pattern, the
/// default identifier pattern, `"false"` for the recursive flag and empty
/// strings for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRecord {
    /// Source folder.
    pub source_folder: String,
    /// Supplementary folder, or empty.
    pub supplementary_folder: String,
    /// Appendix file, or empty.
    pub appendix_file: String,
    /// Output folder.
    pub output_folder: String,
    /// Start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// Source file glob.
    pub file_pattern: String,
    /// Identifier pattern.
    pub id_pattern: String,
    /// `"true"` or `"false"`.
    pub recursive: String,
}

impl ConfigRecord {
    /// Load a record from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object of
    /// string fields.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| PdfCollateError::FailedToReadRecord {
                path: path.to_path_buf(),
                source: e,
            })?;

        serde_json::from_str(&contents).map_err(|e| PdfCollateError::InvalidRecord {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
    }

    /// Save the record as pretty-printed JSON, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent folder cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut contents =
            serde_json::to_string_pretty(self).map_err(|e| PdfCollateError::other(e.to_string()))?;
        contents.push('\n');

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PdfCollateError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(path, contents).map_err(|e| PdfCollateError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`PdfCollateError::InvalidDate`] for anything else.
///
/// # Examples
///
/// ```
/// use pdfcollate::config::parse_date;
///
/// assert!(parse_date("2024-03-01").is_ok());
/// assert!(parse_date("01/03/2024").is_err());
/// ```
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        PdfCollateError::InvalidDate {
            value: value.to_string(),
        }
    })
}

fn require_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PdfCollateError::file_not_found(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(PdfCollateError::not_a_directory(path.to_path_buf()));
    }
    Ok(())
}

fn required<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    match value.trim() {
        "" => Err(PdfCollateError::invalid_config(message)),
        value => Ok(value),
    }
}

fn optional(value: &str) -> Option<PathBuf> {
    match value.trim() {
        "" => None,
        value => Some(PathBuf::from(value)),
    }
}

impl Default for ConfigRecord {
    fn default() -> Self {
        Self {
            source_folder: String::new(),
            supplementary_folder: String::new(),
            appendix_file: String::new(),
            output_folder: String::new(),
            start_date: String::new(),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            id_pattern: DEFAULT_ID_PATTERN.to_string(),
            recursive: "false".to_string(),
        }
    }
}
