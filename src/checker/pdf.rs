// src/checker/pdf.rs
// =============================================================================
// This module extracts web links from PDF documents.
//
// We use the `lopdf` crate (pure Rust PDF parser) and walk the document
// structure directly: every page's /Annots array, looking for link
// annotations whose action is /URI. Only http/https URIs are kept -
// internal document links and mailto actions are not checkable web links.
//
// Extraction is all-or-nothing per document: if the bytes do not load as a
// PDF, or a page object is structurally broken, the whole pass fails with
// DocumentFormatError and nothing collected so far is reported. Individual
// annotations that simply are not URI links are skipped, not errors.
//
// The result is a BTreeSet: the same portfolio URL commonly repeats across
// pages (header/footer), and set semantics also give deterministic order.
// =============================================================================

use crate::error::DocumentFormatError;
use lopdf::{Document, Object};
use std::collections::BTreeSet;

/// Extracts every http/https URI annotation from a PDF, deduplicated.
///
/// A PDF with no URI annotations yields an empty set - that is a legal
/// document, not a fault.
pub fn extract_pdf_links(bytes: &[u8]) -> Result<BTreeSet<String>, DocumentFormatError> {
    let document = Document::load_mem(bytes).map_err(|e| DocumentFormatError::pdf(e.to_string()))?;

    let mut links = BTreeSet::new();

    for (_page_number, page_id) in document.get_pages() {
        let page = document
            .get_dictionary(page_id)
            .map_err(|e| DocumentFormatError::pdf(format!("broken page object: {}", e)))?;

        // Pages without annotations are the common case.
        let annots = match page.get(b"Annots") {
            Ok(object) => object,
            Err(_) => continue,
        };

        let annots = resolve(&document, annots)
            .as_array()
            .map_err(|_| DocumentFormatError::pdf("page /Annots is not an array".to_string()))?
            .clone();

        for annot in &annots {
            if let Some(uri) = annotation_uri(&document, annot) {
                if uri.starts_with("http://") || uri.starts_with("https://") {
                    links.insert(uri);
                }
            }
        }
    }

    Ok(links)
}

/// Pulls the URI out of a single annotation, if it is a URI link.
///
/// Non-link annotations, GoTo actions, and malformed entries all return
/// None - they are not web links, which is different from the document
/// being unreadable.
fn annotation_uri(document: &Document, annot: &Object) -> Option<String> {
    let annot = resolve(document, annot).as_dict().ok()?;
    let action = resolve(document, annot.get(b"A").ok()?).as_dict().ok()?;

    // The action subtype must be /URI.
    match resolve(document, action.get(b"S").ok()?) {
        Object::Name(name) if name == b"URI" => {}
        _ => return None,
    }

    match resolve(document, action.get(b"URI").ok()?) {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// Follows an indirect reference to its object; other objects pass through.
fn resolve<'a>(document: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => document.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    // Builds a one-page-per-chunk PDF whose pages carry URI link
    // annotations for the given targets.
    fn pdf_with_links(pages: &[&[&str]]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for uris in pages {
            let mut annot_ids = Vec::new();
            for uri in *uris {
                let action = dictionary! {
                    "S" => Object::Name(b"URI".to_vec()),
                    "URI" => Object::string_literal(*uri),
                };
                let annot = dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "A" => Object::Dictionary(action),
                };
                annot_ids.push(doc.add_object(annot));
            }

            let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Annots" => Object::Array(annot_ids.into_iter().map(Object::Reference).collect()),
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Object::Array(kids),
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_collects_links_across_pages() {
        let bytes = pdf_with_links(&[
            &["https://example.com/portfolio", "https://other.com/"],
            &["https://doodle.com/bp/paulbovbel/meet"],
        ]);
        let links = extract_pdf_links(&bytes).unwrap();
        assert_eq!(links.len(), 3);
        assert!(links.contains("https://doodle.com/bp/paulbovbel/meet"));
    }

    #[test]
    fn test_repeated_link_appears_once() {
        // Header/footer links repeat on every page.
        let bytes = pdf_with_links(&[
            &["https://example.com/portfolio"],
            &["https://example.com/portfolio"],
        ]);
        let links = extract_pdf_links(&bytes).unwrap();
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let bytes = pdf_with_links(&[&["https://b.com/", "https://a.com/"]]);
        let first = extract_pdf_links(&bytes).unwrap();
        let second = extract_pdf_links(&bytes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_web_uris_are_discarded() {
        let bytes = pdf_with_links(&[&["mailto:someone@example.com", "https://example.com/"]]);
        let links = extract_pdf_links(&bytes).unwrap();
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://example.com/"));
    }

    #[test]
    fn test_pdf_without_annotations_yields_empty_set() {
        let bytes = pdf_with_links(&[&[]]);
        let links = extract_pdf_links(&bytes).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_invalid_bytes_are_a_format_error() {
        let err = extract_pdf_links(b"<html>not a pdf</html>").unwrap_err();
        assert_eq!(err.kind, "PDF");
    }
}
