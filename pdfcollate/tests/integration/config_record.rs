//! Runs driven by a persisted configuration record.

use pdfcollate::output::NullReporter;
use pdfcollate::{Config, ConfigRecord, DocumentProcessor};

use crate::common::{Workspace, build_pdf, days_ago, page_widths};

#[test]
fn test_saved_record_reproduces_the_run() {
    let ws = Workspace::new();
    build_pdf(&ws.source().join("E1 report.pdf"), 1, 1);
    build_pdf(&ws.supp().join("E1 data.pdf"), 4, 2);
    let appendix = build_pdf(&ws.path("append.pdf"), 1, 3);

    let config = Config::new(ws.source(), ws.output(), days_ago(2))
        .with_supplementary_folder(ws.supp())
        .with_appendix_file(appendix);

    let record_path = ws.path("settings").join("pdfcollate.json");
    config.to_record().save(&record_path).unwrap();

    let record = ConfigRecord::load(&record_path).unwrap();
    let restored = Config::from_record(&record).unwrap();
    assert_eq!(restored, config);

    let stats = DocumentProcessor::new(restored).run(&mut NullReporter);
    assert_eq!(stats.processed, 1);
    assert_eq!(
        page_widths(&ws.output().join("E1 report.pdf")),
        vec![100, 200, 201, 300]
    );
}

#[test]
fn test_record_is_plain_string_json() {
    let ws = Workspace::new();
    let path = ws.path("record.json");

    Config::new(ws.source(), ws.output(), days_ago(0))
        .with_recursive(true)
        .to_record()
        .save(&path)
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let object = value.as_object().unwrap();

    assert!(object.values().all(|v| v.is_string()));
    assert_eq!(object["recursive"], "true");
    assert_eq!(object["supplementary_folder"], "");
    assert_eq!(object["file_pattern"], "*.pdf");
}
