//! Full runs over generated documents.

use pdfcollate::output::{ProcessEvent, RecordingReporter};
use pdfcollate::{Config, DocumentProcessor, RunStatistics};

use crate::common::{Workspace, build_pdf, days_ago, page_widths};

fn scenario() -> (Workspace, Config) {
    let ws = Workspace::new();

    build_pdf(&ws.source().join("A100 report.pdf"), 2, 1);
    build_pdf(&ws.source().join("badname.pdf"), 1, 9);
    build_pdf(&ws.supp().join("A100 supp.pdf"), 3, 2);
    build_pdf(&ws.supp().join("A100 supp2.pdf"), 2, 5);
    let appendix = build_pdf(&ws.path("append.pdf"), 1, 3);

    let config = Config::new(ws.source(), ws.output(), days_ago(1))
        .with_supplementary_folder(ws.supp())
        .with_appendix_file(appendix);

    (ws, config)
}

#[test]
fn test_documented_scenario() {
    let (ws, config) = scenario();
    let mut reporter = RecordingReporter::new();

    let stats = DocumentProcessor::new(config).run(&mut reporter);

    assert_eq!(
        stats,
        RunStatistics {
            processed: 1,
            skipped_format: 1,
            skipped_date: 0,
            errors: 0,
        }
    );

    let output = ws.output().join("A100 report.pdf");
    assert!(output.is_file());
    assert!(!ws.output().join("badname.pdf").exists());

    // Source in full, supplementary page 0 only, appendix in full.
    assert_eq!(page_widths(&output), vec![100, 101, 200, 300]);

    assert!(reporter.any(|e| matches!(
        e,
        ProcessEvent::MultipleMatches { chosen, count: 2, .. } if chosen == "A100 supp.pdf"
    )));
    assert!(reporter.any(|e| matches!(
        e,
        ProcessEvent::SkippedByFormat { name } if name == "badname.pdf"
    )));

    let descriptions: Vec<&str> = reporter
        .events
        .iter()
        .filter_map(|e| match e {
            ProcessEvent::EntryAdded { description } => Some(description.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        descriptions,
        vec![
            "Main document: A100 report.pdf",
            "Supplementary data: A100 supp.pdf (excluding last page)",
            "Appendix: append.pdf",
        ]
    );
}

#[test]
fn test_rerun_is_idempotent() {
    let (ws, config) = scenario();
    let output = ws.output().join("A100 report.pdf");

    let first_stats = DocumentProcessor::new(config.clone()).run(&mut RecordingReporter::new());
    let first_bytes = std::fs::read(&output).unwrap();

    let mut reporter = RecordingReporter::new();
    let second_stats = DocumentProcessor::new(config).run(&mut reporter);
    let second_bytes = std::fs::read(&output).unwrap();

    assert_eq!(first_stats, second_stats);
    assert_eq!(first_bytes, second_bytes);
    assert!(reporter.any(|e| matches!(e, ProcessEvent::OutputExists { .. })));
}

#[test]
fn test_convenience_run() {
    let (ws, config) = scenario();

    let stats = pdfcollate::run(config, &mut pdfcollate::output::NullReporter);

    assert_eq!(stats.processed, 1);
    assert!(ws.output().join("A100 report.pdf").is_file());
}

#[test]
fn test_corrupt_document_is_counted_as_error() {
    let (ws, config) = scenario();
    std::fs::write(ws.source().join("B200 broken.pdf"), b"not a pdf").unwrap();
    let mut reporter = RecordingReporter::new();

    let stats = DocumentProcessor::new(config).run(&mut reporter);

    assert_eq!(stats.processed, 1);
    assert_eq!(stats.errors, 1);
    assert!(!ws.output().join("B200 broken.pdf").exists());
    assert!(reporter.any(|e| matches!(
        e,
        ProcessEvent::DocumentFailed { name, .. } if name == "B200 broken.pdf"
    )));
}
