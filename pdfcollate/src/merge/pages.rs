//! Page selection and page tree manipulation.
//!
//! This module handles page-level operations including:
//! - Resolving a requested page span against a document's page count
//! - Reducing a document to a subset of its pages
//! - Appending pages taken from another document

use lopdf::{Document, Object, ObjectId};
use std::ops::RangeInclusive;

use crate::error::{PdfCollateError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// A requested range of pages, zero-indexed.
///
/// `start` is inclusive. A non-negative `end` is exclusive; a negative `end`
/// counts back from the page count, so `PageSpan::new(0, -2)` on a 10-page
/// document selects pages 0 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    /// First page index, inclusive.
    pub start: usize,
    /// End index, exclusive when non-negative, offset from the page count when negative.
    pub end: i64,
}

impl PageSpan {
    /// Create a new span.
    pub const fn new(start: usize, end: i64) -> Self {
        Self { start, end }
    }

    /// Resolve this span against a document with `total` pages.
    ///
    /// Returns the inclusive range of selected page indices, or `None` when
    /// nothing is selected. An end that resolves below zero, or at or past
    /// `total`, is clamped to the last available page.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfcollate::merge::PageSpan;
    ///
    /// let span = PageSpan::new(0, -2);
    /// assert_eq!(span.resolve(10), Some(0..=7));
    /// assert_eq!(span.resolve(3), Some(0..=0));
    /// assert_eq!(span.resolve(1), Some(0..=0));
    /// assert_eq!(span.resolve(0), None);
    /// ```
    pub fn resolve(&self, total: usize) -> Option<RangeInclusive<usize>> {
        if total == 0 || self.start >= total {
            return None;
        }

        let resolved_end = if self.end < 0 {
            total as i64 + self.end
        } else {
            self.end
        };

        let end = if resolved_end < 0 || resolved_end >= total as i64 {
            total
        } else {
            resolved_end as usize
        };

        if end <= self.start {
            return None;
        }

        Some(self.start..=end - 1)
    }
}

/// Page extractor for manipulating page trees.
#[derive(Debug, Clone, Copy)]
pub struct PageExtractor;

impl PageExtractor {
    /// Create a new page extractor.
    pub fn new() -> Self {
        Self
    }

    /// Get the number of pages in a document.
    pub fn page_count(&self, doc: &Document) -> usize {
        doc.get_pages().len()
    }

    /// Page object IDs selected by `span`, in page order.
    ///
    /// `None` selects every page. An empty result means the document
    /// contributes nothing.
    pub fn select(&self, doc: &Document, span: Option<PageSpan>) -> Vec<ObjectId> {
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

        let range = match span {
            None if pages.is_empty() => return Vec::new(),
            None => 0..=pages.len() - 1,
            Some(span) => match span.resolve(pages.len()) {
                Some(range) => range,
                None => return Vec::new(),
            },
        };

        pages[range].to_vec()
    }

    /// Reduce a document so its page tree holds exactly `page_ids`.
    ///
    /// Pages are attached directly under the root `Pages` node; attributes
    /// they inherited from intermediate nodes are copied onto them first.
    pub fn retain_pages(&self, doc: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
        let pages_id = self.pages_root(doc)?;

        for &page_id in page_ids {
            self.inherit_attributes(doc, page_id)?;
            self.set_parent(doc, page_id, pages_id)?;
        }

        let pages_dict = doc
            .get_dictionary_mut(pages_id)
            .map_err(|e| {
                PdfCollateError::merge_failed(format!("Failed to get pages object: {e}"))
            })?;

        let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", Object::Integer(page_ids.len() as i64));

        Ok(())
    }

    /// Move `page_ids` from `source` onto the end of `target`'s page tree.
    ///
    /// `source` must already be renumbered so its object IDs do not collide
    /// with `target`'s.
    pub fn append_pages(
        &self,
        target: &mut Document,
        mut source: Document,
        page_ids: &[ObjectId],
    ) -> Result<()> {
        for &page_id in page_ids {
            self.inherit_attributes(&mut source, page_id)?;
        }

        let pages_id = self.pages_root(target)?;

        target.max_id = target.max_id.max(source.max_id);
        target.objects.extend(source.objects);

        for &page_id in page_ids {
            self.set_parent(target, page_id, pages_id)?;
        }

        let pages_dict = target
            .get_dictionary_mut(pages_id)
            .map_err(|e| {
                PdfCollateError::merge_failed(format!("Failed to get pages object: {e}"))
            })?;

        let kids = pages_dict
            .get_mut(b"Kids")
            .map_err(|_| PdfCollateError::merge_failed("Pages dictionary missing Kids array"))?;

        if let Object::Array(kids_array) = kids {
            kids_array.extend(page_ids.iter().map(|&id| Object::Reference(id)));
        } else {
            return Err(PdfCollateError::merge_failed("Kids is not an array"));
        }

        let current_count = pages_dict
            .get(b"Count")
            .and_then(|c| c.as_i64())
            .unwrap_or(0);
        pages_dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

        Ok(())
    }

    /// Object ID of the root `Pages` node.
    fn pages_root(&self, doc: &Document) -> Result<ObjectId> {
        let catalog = doc
            .catalog()
            .map_err(|e| PdfCollateError::merge_failed(format!("Failed to get catalog: {e}")))?;

        catalog
            .get(b"Pages")
            .and_then(|p| p.as_reference())
            .map_err(|e| {
                PdfCollateError::merge_failed(format!("Failed to get pages reference: {e}"))
            })
    }

    fn set_parent(&self, doc: &mut Document, page_id: ObjectId, parent: ObjectId) -> Result<()> {
        let page = doc
            .get_dictionary_mut(page_id)
            .map_err(|e| PdfCollateError::merge_failed(format!("Failed to get page: {e}")))?;
        page.set("Parent", Object::Reference(parent));
        Ok(())
    }

    /// Copy inheritable attributes from the page's ancestors onto the page.
    fn inherit_attributes(&self, doc: &mut Document, page_id: ObjectId) -> Result<()> {
        let mut inherited: Vec<(&[u8], Object)> = Vec::new();

        {
            let page = doc
                .get_dictionary(page_id)
                .map_err(|e| PdfCollateError::merge_failed(format!("Failed to get page: {e}")))?;

            let mut parent = page.get(b"Parent").and_then(|p| p.as_reference()).ok();
            let mut depth = 0;

            while let Some(parent_id) = parent {
                depth += 1;
                if depth > MAX_TREE_DEPTH {
                    break;
                }

                let Ok(node) = doc.get_dictionary(parent_id) else {
                    break;
                };

                for key in INHERITABLE_ATTRIBUTES {
                    let already_set =
                        page.has(key) || inherited.iter().any(|(existing, _)| *existing == key);
                    if !already_set && let Ok(value) = node.get(key) {
                        inherited.push((key, value.clone()));
                    }
                }

                parent = node.get(b"Parent").and_then(|p| p.as_reference()).ok();
            }
        }

        if inherited.is_empty() {
            return Ok(());
        }

        let page = doc
            .get_dictionary_mut(page_id)
            .map_err(|e| PdfCollateError::merge_failed(format!("Failed to get page: {e}")))?;
        for (key, value) in inherited {
            page.set(key, value);
        }

        Ok(())
    }
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;
    use rstest::rstest;

    fn create_multi_page_pdf(pages: usize) -> Document {
        let mut doc = Document::with_version("1.4");

        let catalog_id = doc.new_object_id();
        let pages_id = doc.new_object_id();

        let mut page_ids = Vec::new();
        for i in 0..pages {
            let page_id = doc.new_object_id();
            let page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), (100 + i as i64).into(), 792.into()],
            };
            doc.objects.insert(page_id, page.into());
            page_ids.push(page_id);
        }

        let catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.into_iter().map(|id| id.into()).collect::<Vec<Object>>(),
            "Count" => pages as i64,
        };

        doc.objects.insert(catalog_id, catalog.into());
        doc.objects.insert(pages_id, pages_dict.into());
        doc.trailer.set("Root", catalog_id);

        doc
    }

    fn page_widths(doc: &Document) -> Vec<i64> {
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

    #[rstest]
    #[case(10, Some(0..=7))]
    #[case(3, Some(0..=0))]
    #[case(2, None)]
    #[case(1, Some(0..=0))]
    #[case(0, None)]
    fn test_resolve_drop_last_two(
        #[case] total: usize,
        #[case] expected: Option<RangeInclusive<usize>>,
    ) {
        assert_eq!(PageSpan::new(0, -2).resolve(total), expected);
    }

    #[rstest]
    #[case(PageSpan::new(0, 3), 10, Some(0..=2))]
    #[case(PageSpan::new(2, 5), 10, Some(2..=4))]
    #[case(PageSpan::new(0, 10), 10, Some(0..=9))]
    #[case(PageSpan::new(0, 50), 10, Some(0..=9))]
    #[case(PageSpan::new(0, -1), 4, Some(0..=2))]
    #[case(PageSpan::new(3, 3), 10, None)]
    #[case(PageSpan::new(12, -1), 10, None)]
    fn test_resolve_general(
        #[case] span: PageSpan,
        #[case] total: usize,
        #[case] expected: Option<RangeInclusive<usize>>,
    ) {
        assert_eq!(span.resolve(total), expected);
    }

    #[test]
    fn test_default_extractor() {
        let doc = create_multi_page_pdf(2);
        assert_eq!(PageExtractor::default().page_count(&doc), 2);
    }

    #[test]
    fn test_page_count() {
        let doc = create_multi_page_pdf(5);
        assert_eq!(PageExtractor::new().page_count(&doc), 5);
    }

    #[test]
    fn test_select_all_and_span() {
        let doc = create_multi_page_pdf(4);
        let extractor = PageExtractor::new();

        assert_eq!(extractor.select(&doc, None).len(), 4);
        assert_eq!(extractor.select(&doc, Some(PageSpan::new(0, -2))).len(), 2);
        assert!(create_multi_page_pdf(0).get_pages().is_empty());
        assert!(extractor.select(&create_multi_page_pdf(0), None).is_empty());
    }

    #[test]
    fn test_retain_pages() {
        let mut doc = create_multi_page_pdf(5);
        let extractor = PageExtractor::new();

        let selected = extractor.select(&doc, Some(PageSpan::new(1, 3)));
        extractor.retain_pages(&mut doc, &selected).unwrap();

        assert_eq!(extractor.page_count(&doc), 2);
        assert_eq!(page_widths(&doc), vec![101, 102]);
    }

    #[test]
    fn test_append_pages() {
        let mut target = create_multi_page_pdf(2);
        let mut source = create_multi_page_pdf(3);
        let extractor = PageExtractor::new();

        source.renumber_objects_with(target.max_id + 1);
        let selected = extractor.select(&source, Some(PageSpan::new(0, -1)));
        extractor
            .append_pages(&mut target, source, &selected)
            .unwrap();

        assert_eq!(extractor.page_count(&target), 4);
        assert_eq!(page_widths(&target), vec![100, 101, 100, 101]);
    }

    #[test]
    fn test_retain_pages_flattens_nested_tree() {
        let mut doc = Document::with_version("1.4");
        let catalog_id = doc.new_object_id();
        let root_id = doc.new_object_id();
        let branch_id = doc.new_object_id();
        let page_id = doc.new_object_id();

        doc.objects.insert(
            page_id,
            dictionary! { "Type" => "Page", "Parent" => branch_id }.into(),
        );
        doc.objects.insert(
            branch_id,
            dictionary! {
                "Type" => "Pages",
                "Parent" => root_id,
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 300.into(), 400.into()],
            }
            .into(),
        );
        doc.objects.insert(
            root_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => vec![branch_id.into()],
                "Count" => 1,
            }
            .into(),
        );
        doc.objects.insert(
            catalog_id,
            dictionary! { "Type" => "Catalog", "Pages" => root_id }.into(),
        );
        doc.trailer.set("Root", catalog_id);

        let extractor = PageExtractor::new();
        let selected = extractor.select(&doc, None);
        extractor.retain_pages(&mut doc, &selected).unwrap();

        let page = doc.get_dictionary(page_id).unwrap();
        assert_eq!(page.get(b"Parent").unwrap().as_reference().unwrap(), root_id);
        assert_eq!(page_widths(&doc), vec![300]);
    }
}
