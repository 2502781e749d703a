//! Merge plans and the PDF concatenation primitive.

pub mod merger;
pub mod pages;
pub mod plan;

pub use merger::{ConcatOutcome, Concatenate, PdfConcatenator};
pub use pages::{PageExtractor, PageSpan};
pub use plan::{EntryKind, MergePlan, PlanEntry, SUPPLEMENTARY_SPAN};
