//! Which documents get processed.

use pdfcollate::output::{NullReporter, ProcessEvent, RecordingReporter};
use pdfcollate::{Config, DocumentProcessor, RunStatistics};

use crate::common::{Workspace, age, build_pdf, days_ago};

#[test]
fn test_old_documents_are_skipped_by_date_whatever_their_name() {
    let ws = Workspace::new();
    let valid = build_pdf(&ws.source().join("A1 valid.pdf"), 1, 1);
    let invalid = build_pdf(&ws.source().join("invalid.pdf"), 1, 1);
    age(&valid, 30);
    age(&invalid, 30);
    build_pdf(&ws.source().join("A2 fresh.pdf"), 1, 1);

    let config = Config::new(ws.source(), ws.output(), days_ago(7));
    let stats = DocumentProcessor::new(config).run(&mut NullReporter);

    assert_eq!(
        stats,
        RunStatistics {
            processed: 1,
            skipped_format: 0,
            skipped_date: 2,
            errors: 0,
        }
    );
    assert!(!ws.output().join("A1 valid.pdf").exists());
    assert!(ws.output().join("A2 fresh.pdf").exists());
}

#[test]
fn test_document_dated_on_cutoff_is_processed() {
    let ws = Workspace::new();
    let doc = build_pdf(&ws.source().join("A1 edge.pdf"), 1, 1);
    age(&doc, 3);

    let config = Config::new(ws.source(), ws.output(), days_ago(3));
    let stats = DocumentProcessor::new(config).run(&mut NullReporter);

    assert_eq!(stats.processed, 1);
}

#[test]
fn test_names_without_identifier_are_skipped_by_format() {
    let ws = Workspace::new();
    for name in ["report.pdf", "A100.pdf", "AB1 report.pdf", "1A report.pdf"] {
        build_pdf(&ws.source().join(name), 1, 1);
    }
    build_pdf(&ws.source().join("a7 lowercase.pdf"), 1, 1);

    let config = Config::new(ws.source(), ws.output(), days_ago(1));
    let stats = DocumentProcessor::new(config).run(&mut NullReporter);

    assert_eq!(stats.skipped_format, 4);
    assert_eq!(stats.processed, 1);
    assert!(ws.output().join("a7 lowercase.pdf").exists());
}

#[test]
fn test_invalid_configuration_touches_nothing() {
    let ws = Workspace::new();
    build_pdf(&ws.source().join("A1 report.pdf"), 1, 1);

    let config = Config::new(ws.source(), ws.output(), days_ago(1))
        .with_appendix_file(ws.path("missing-appendix.pdf"));
    let mut reporter = RecordingReporter::new();

    let stats = DocumentProcessor::new(config).run(&mut reporter);

    assert_eq!(stats, RunStatistics::default());
    assert!(!ws.output().exists());
    assert!(reporter.any(|e| matches!(e, ProcessEvent::ConfigInvalid { .. })));
}

#[test]
fn test_recursive_scan_writes_flat_outputs() {
    let ws = Workspace::new();
    build_pdf(&ws.source().join("A1 top.pdf"), 1, 1);
    build_pdf(&ws.source().join("2024").join("B2 nested.pdf"), 1, 2);

    let flat = Config::new(ws.source(), ws.output(), days_ago(1));
    let stats = DocumentProcessor::new(flat.clone()).run(&mut NullReporter);
    assert_eq!(stats.processed, 1);

    let stats = DocumentProcessor::new(flat.with_recursive(true)).run(&mut NullReporter);
    assert_eq!(stats.processed, 2);
    assert!(ws.output().join("B2 nested.pdf").exists());
}

#[test]
fn test_file_pattern_selects_documents() {
    let ws = Workspace::new();
    build_pdf(&ws.source().join("A1 report.pdf"), 1, 1);
    build_pdf(&ws.source().join("A2 draft.pdf"), 1, 1);

    let config =
        Config::new(ws.source(), ws.output(), days_ago(1)).with_file_pattern("*report.pdf");
    let stats = DocumentProcessor::new(config).run(&mut NullReporter);

    assert_eq!(stats.total(), 1);
    assert!(ws.output().join("A1 report.pdf").exists());
}

#[test]
fn test_supplementary_identifier_is_literal() {
    let ws = Workspace::new();
    build_pdf(&ws.source().join("A1 report.pdf"), 1, 1);
    build_pdf(&ws.supp().join("A10 other.pdf"), 3, 2);
    build_pdf(&ws.supp().join("a1 lowercase.pdf"), 3, 2);

    let config = Config::new(ws.source(), ws.output(), days_ago(1))
        .with_supplementary_folder(ws.supp());
    let mut reporter = RecordingReporter::new();

    let stats = DocumentProcessor::new(config).run(&mut reporter);

    assert_eq!(stats.processed, 1);
    assert!(reporter.any(|e| matches!(e, ProcessEvent::NoSupplementary { .. })));
}
