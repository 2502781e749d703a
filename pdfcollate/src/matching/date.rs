//! Effective dates of source documents.

use chrono::{DateTime, Local, NaiveDate};
use std::io;
use std::path::Path;

/// Label shown for a document whose date could not be resolved.
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Resolve the local calendar date of a file's last modification.
///
/// Returns `None` when the file does not exist or its timestamp cannot be
/// read. A missing date is not an error: the document is simply exempt
/// from cutoff filtering.
pub fn resolve_date(path: &Path) -> Option<NaiveDate> {
    let modified = std::fs::metadata(path).and_then(|meta| meta.modified());

    match modified {
        Ok(time) => Some(DateTime::<Local>::from(time).date_naive()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No date for {}: file does not exist", path.display());
            None
        }
        Err(err) => {
            tracing::warn!("Could not get date for {}: {}", path.display(), err);
            None
        }
    }
}

/// Format a resolved date for reporting.
pub fn date_label(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}
