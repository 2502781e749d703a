//! How much of a supplementary file ends up in the output.

use rstest::rstest;

use pdfcollate::output::{ProcessEvent, RecordingReporter};
use pdfcollate::{Config, DocumentProcessor};

use crate::common::{Workspace, build_pdf, days_ago, page_widths};

#[rstest]
#[case::ten_pages(10, vec![200, 201, 202, 203, 204, 205, 206, 207])]
#[case::three_pages(3, vec![200])]
#[case::single_page_is_clamped(1, vec![200])]
#[case::two_pages_contribute_nothing(2, vec![])]
fn test_supplementary_pages(#[case] pages: usize, #[case] expected: Vec<i64>) {
    let ws = Workspace::new();
    build_pdf(&ws.source().join("C5 main.pdf"), 1, 1);
    let supp = build_pdf(&ws.supp().join("C5 extra.pdf"), pages, 2);

    let config = Config::new(ws.source(), ws.output(), days_ago(1))
        .with_supplementary_folder(ws.supp());
    let mut reporter = RecordingReporter::new();

    let stats = DocumentProcessor::new(config).run(&mut reporter);
    assert_eq!(stats.processed, 1);

    let widths = page_widths(&ws.output().join("C5 main.pdf"));
    assert_eq!(widths[0], 100);
    assert_eq!(&widths[1..], expected.as_slice());

    let skipped =
        reporter.any(|e| matches!(e, ProcessEvent::EntrySkipped { path } if path == &supp));
    assert_eq!(skipped, expected.is_empty());
}

#[test]
fn test_empty_source_with_appendix_keeps_appendix() {
    let ws = Workspace::new();
    build_pdf(&ws.source().join("D1 empty.pdf"), 0, 1);
    let appendix = build_pdf(&ws.path("append.pdf"), 2, 3);

    let config =
        Config::new(ws.source(), ws.output(), days_ago(1)).with_appendix_file(appendix);
    let stats = DocumentProcessor::new(config).run(&mut RecordingReporter::new());

    assert_eq!(stats.processed, 1);
    assert_eq!(
        page_widths(&ws.output().join("D1 empty.pdf")),
        vec![300, 301]
    );
}

#[test]
fn test_nothing_to_write_still_produces_an_output() {
    let ws = Workspace::new();
    let source = build_pdf(&ws.source().join("D2 empty.pdf"), 0, 1);

    let config = Config::new(ws.source(), ws.output(), days_ago(1));
    let mut reporter = RecordingReporter::new();
    let stats = DocumentProcessor::new(config).run(&mut reporter);

    assert_eq!(stats.processed, 1);
    assert_eq!(stats.errors, 0);
    assert!(page_widths(&ws.output().join("D2 empty.pdf")).is_empty());
    assert!(reporter.any(|e| matches!(e, ProcessEvent::EntrySkipped { path } if path == &source)));
}
