//! Per-file decisions: identifier, effective date and supplementary lookup.
//!
//! These are the leaves of the processing pipeline. None of them fail hard:
//! an unavailable piece of information is reported as `None` (or an empty
//! list) and logged, so a single odd file never aborts a run.

pub mod date;
pub mod identifier;
pub mod supplementary;

pub use date::{UNKNOWN_DATE, date_label, resolve_date};
pub use identifier::{DEFAULT_ID_PATTERN, IdPattern, extract_identifier};
pub use supplementary::{DEFAULT_EXTENSION, find_matches};
