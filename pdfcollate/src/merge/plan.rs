//! Merge plans: the ordered list of page ranges making up one output file.

use std::path::{Path, PathBuf};

use crate::merge::pages::PageSpan;

/// Span applied to supplementary files: every page except the trailing ones.
pub const SUPPLEMENTARY_SPAN: PageSpan = PageSpan::new(0, -2);

/// Role of an entry within a merge plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The source document itself.
    Main,
    /// The supplementary file matched by identifier.
    Supplementary,
    /// The shared appendix.
    Appendix,
}

/// One step of a merge plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// File the pages are taken from.
    pub path: PathBuf,
    /// Pages to take; `None` means all pages.
    pub span: Option<PageSpan>,
    /// Human-readable description for reporting.
    pub description: String,
    /// What this entry is.
    pub kind: EntryKind,
}

impl PlanEntry {
    fn main(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            span: None,
            description: format!("Main document: {}", file_name(path)),
            kind: EntryKind::Main,
        }
    }

    fn supplementary(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            span: Some(SUPPLEMENTARY_SPAN),
            description: format!(
                "Supplementary data: {} (excluding last page)",
                file_name(path)
            ),
            kind: EntryKind::Supplementary,
        }
    }

    fn appendix(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            span: None,
            description: format!("Appendix: {}", file_name(path)),
            kind: EntryKind::Appendix,
        }
    }
}

/// Ordered merge plan for one source document.
///
/// A plan always starts with the full source document; the order of its
/// entries is the exact concatenation order of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    entries: Vec<PlanEntry>,
}

impl MergePlan {
    /// Build the plan for a source document.
    ///
    /// The result is `[source, supplementary, appendix]`, omitting whichever
    /// of the last two is `None`.
    pub fn build(source: &Path, supplementary: Option<&Path>, appendix: Option<&Path>) -> Self {
        let mut entries = vec![PlanEntry::main(source)];

        if let Some(path) = supplementary {
            entries.push(PlanEntry::supplementary(path));
        }

        if let Some(path) = appendix {
            entries.push(PlanEntry::appendix(path));
        }

        Self { entries }
    }

    /// Entries in concatenation order.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no entries. Never true for a built plan.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
