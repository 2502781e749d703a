//! Shared helpers for the integration tests.
//!
//! Fixtures are generated on the fly: page `i` of a document built with tag
//! `t` has MediaBox width `t * 100 + i`, so pages can be traced through a
//! merge.

#![allow(dead_code)]

use chrono::{Local, NaiveDate};
use lopdf::{Document, Object, dictionary};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Write an N-page PDF tagged with `tag`.
pub fn build_pdf(path: &Path, pages: usize, tag: i64) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|i| {
            let content = doc.add_object(lopdf::Stream::new(
                dictionary! {},
                format!("BT /F1 12 Tf 72 720 Td (page {i}) Tj ET").into_bytes(),
            ));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), (tag * 100 + i as i64).into(), 792.into()],
                "Contents" => content,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => pages as i64 }.into(),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    doc.save(path).unwrap();
    path.to_path_buf()
}

/// Set the modification time of `path` to `days` days ago.
pub fn age(path: &Path, days: u64) {
    let mtime = SystemTime::now() - Duration::from_secs(days * 24 * 60 * 60);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

/// MediaBox widths of every page of the PDF at `path`, in page order.
pub fn page_widths(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_dictionary(id).unwrap();
            page.get(b"MediaBox").unwrap().as_array().unwrap()[2]
                .as_i64()
                .unwrap()
        })
        .collect()
}

/// Local date `days` days ago.
pub fn days_ago(days: i64) -> NaiveDate {
    Local::now().date_naive() - chrono::Duration::days(days)
}

/// A temporary directory laid out as source, supplementary and output folders.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("source")).unwrap();
        std::fs::create_dir(dir.path().join("supp")).unwrap();
        Self { dir }
    }

    pub fn source(&self) -> PathBuf {
        self.dir.path().join("source")
    }

    pub fn supp(&self) -> PathBuf {
        self.dir.path().join("supp")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("output")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
