//! Lookup of supplementary files by identifier.
//!
//! A supplementary file belongs to an identifier when its name starts with
//! the identifier followed by a single space and ends with the expected
//! extension, e.g. `A100 lab results.pdf` for `A100`.

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};

/// Extension searched for when none is given.
pub const DEFAULT_EXTENSION: &str = ".pdf";

/// Find the supplementary files for an identifier.
///
/// Returns an empty list if `folder` is `None`, does not exist, or the
/// identifier is empty. Matching is literal and case-sensitive: glob
/// metacharacters in the identifier, extension and folder path are escaped.
/// Results are sorted ascending by filename.
///
/// # Examples
///
/// ```no_run
/// use pdfcollate::matching::find_matches;
/// use std::path::Path;
///
/// let matches = find_matches(Some(Path::new("supplements")), "A100", ".pdf");
/// if let Some(first) = matches.first() {
///     println!("Using {}", first.display());
/// }
/// ```
pub fn find_matches(folder: Option<&Path>, identifier: &str, extension: &str) -> Vec<PathBuf> {
    let Some(folder) = folder else {
        return Vec::new();
    };

    if identifier.is_empty() || !folder.is_dir() {
        return Vec::new();
    }

    let file_pattern = format!(
        "{} *{}",
        Pattern::escape(identifier),
        Pattern::escape(extension)
    );
    let pattern = Path::new(&Pattern::escape(&folder.to_string_lossy()))
        .join(file_pattern)
        .to_string_lossy()
        .into_owned();

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let entries = match glob::glob_with(&pattern, options) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(
                "Error searching for files matching '{}': {}",
                identifier,
                err
            );
            return Vec::new();
        }
    };

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();

    matches.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    matches
}
