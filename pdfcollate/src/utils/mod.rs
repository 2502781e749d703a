//! Source discovery: expanding the file pattern under the source folder.

use globset::{Glob, GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PdfCollateError, Result};

/// Collect every path under `folder` whose name matches `pattern`.
///
/// Without `recursive` only the direct children of `folder` are considered
/// and the pattern is matched against the file name. With `recursive` the
/// whole tree is walked and the relative path is matched against
/// `**/<pattern>`, so the top level is included.
///
/// Matching entries are returned in the order the walk yields them; no
/// sorting is applied. Directories that match the pattern are returned too,
/// callers decide what to do with them. Entries the walk cannot read are
/// logged and left out.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid glob or `folder` is not a
/// directory.
pub fn discover_source_files(
    folder: &Path,
    pattern: &str,
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(PdfCollateError::not_a_directory(folder.to_path_buf()));
    }

    let matcher = if recursive {
        compile(&format!("**/{pattern}"))?
    } else {
        compile(pattern)?
    };

    let mut walker = WalkDir::new(folder).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("Skipping unreadable entry under {}: {err}", folder.display());
                continue;
            }
        };

        let candidate = if recursive {
            entry.path().strip_prefix(folder).unwrap_or(entry.path())
        } else {
            Path::new(entry.file_name())
        };

        if matcher.is_match(candidate) {
            found.push(entry.into_path());
        }
    }

    tracing::debug!(
        "Pattern '{pattern}' matched {} path(s) under {}",
        found.len(),
        folder.display()
    );

    Ok(found)
}

/// Check that `pattern` is a usable file pattern.
///
/// # Errors
///
/// Returns [`PdfCollateError::InvalidPattern`] with the parser message.
pub fn validate_file_pattern(pattern: &str) -> Result<()> {
    Glob::new(pattern)
        .map(|_| ())
        .map_err(|e| PdfCollateError::invalid_pattern(pattern, e.kind().to_string()))
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| PdfCollateError::invalid_pattern(pattern, e.kind().to_string()))
}
