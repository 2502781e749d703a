//! Identifier extraction from source filenames.
//!
//! A source document is tied to its supplementary file by a short
//! identifier written at the start of its filename, separated from the
//! rest of the name by a space: `A123 quarterly report.pdf` carries the
//! identifier `A123`.

use regex::{Regex, RegexBuilder};
use std::fmt;

use crate::error::{PdfCollateError, Result};

/// Default identifier pattern: one letter followed by one or more digits.
pub const DEFAULT_ID_PATTERN: &str = r"^[A-Za-z]\d+$";

/// A compiled identifier pattern.
///
/// The pattern always applies to the whole candidate token and is matched
/// case-insensitively, whether or not the source string carries its own
/// `^`/`$` anchors.
#[derive(Clone)]
pub struct IdPattern {
    source: String,
    regex: Regex,
}

impl IdPattern {
    /// Compile an identifier pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PdfCollateError::InvalidPattern`] if the regex does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        let anchored = format!("^(?:{pattern})$");
        let regex = RegexBuilder::new(&anchored)
            .case_insensitive(true)
            .build()
            .map_err(|err| PdfCollateError::invalid_pattern(pattern, err.to_string()))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as it was written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Extract the identifier from a filename.
    ///
    /// The filename is trimmed and split on its first space; the token before
    /// that space is the candidate. A filename without a space never yields
    /// an identifier. The candidate is returned with its original case.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfcollate::matching::IdPattern;
    ///
    /// let pattern = IdPattern::default();
    /// assert_eq!(pattern.extract("A123 report.pdf").as_deref(), Some("A123"));
    /// assert_eq!(pattern.extract("report.pdf"), None);
    /// ```
    pub fn extract(&self, filename: &str) -> Option<String> {
        let (candidate, _) = filename.trim().split_once(' ')?;
        let candidate = candidate.trim();

        if candidate.is_empty() || !self.regex.is_match(candidate) {
            return None;
        }

        Some(candidate.to_string())
    }
}

impl Default for IdPattern {
    fn default() -> Self {
        Self {
            source: DEFAULT_ID_PATTERN.to_string(),
            regex: RegexBuilder::new(DEFAULT_ID_PATTERN)
                .case_insensitive(true)
                .build()
                .expect("default identifier pattern is valid"),
        }
    }
}

impl PartialEq for IdPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for IdPattern {}

impl fmt::Debug for IdPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IdPattern").field(&self.source).finish()
    }
}

impl fmt::Display for IdPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Extract an identifier using an uncompiled pattern.
///
/// A pattern that does not compile is logged and treated as "no identifier";
/// this never fails.
pub fn extract_identifier(filename: &str, pattern: &str) -> Option<String> {
    match IdPattern::new(pattern) {
        Ok(pattern) => pattern.extract(filename),
        Err(err) => {
            tracing::warn!("Cannot extract identifier from '{}': {}", filename, err);
            None
        }
    }
}
