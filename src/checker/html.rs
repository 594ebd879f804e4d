// src/checker/html.rs
// =============================================================================
// This module extracts link candidates from HTML markup.
//
// We use the `scraper` crate (built on html5ever, Mozilla's HTML parser),
// so malformed fragments are repaired or dropped by the parser instead of
// aborting the pass - extraction is fault tolerant by construction.
//
// Rather than exposing scraper's DOM directly, the module offers a small
// push-parser interface: a TagVisitor is invoked once per start tag, in
// document order, with the tag name and its attribute map. Both extractors
// in this file (link candidates, meta-refresh target) are visitors; callers
// can supply their own for other tag-level scans.
//
// Candidates are returned verbatim - resolution against the base context
// and filtering happen later, in checker::normalize. Duplicates are kept:
// the pipeline decides the dedup policy, not the extractor.
// =============================================================================

use scraper::Html;
use std::collections::HashMap;

/// Receives one callback per start tag, in document order.
pub trait TagVisitor {
    /// Called with the lowercased tag name and its attributes.
    fn visit_tag(&mut self, name: &str, attrs: &HashMap<String, String>);
}

/// Parses `markup` and feeds every start tag to `visitor`.
///
/// html5ever lowercases tag and attribute names, so visitors can match on
/// "meta" / "http-equiv" without case handling.
pub fn visit_tags(markup: &str, visitor: &mut dyn TagVisitor) {
    let document = Html::parse_document(markup);

    // Descendants of the root element come out in tree order, which is
    // document order for parsed HTML.
    for node in document.root_element().descendants() {
        if let Some(element) = node.value().as_element() {
            let attrs: HashMap<String, String> = element
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            visitor.visit_tag(element.name(), &attrs);
        }
    }
}

/// Collects every `href` and `src` attribute value it sees.
#[derive(Debug, Default)]
struct LinkCollector {
    candidates: Vec<String>,
}

impl TagVisitor for LinkCollector {
    fn visit_tag(&mut self, _name: &str, attrs: &HashMap<String, String>) {
        // A single tag can contribute both (href first, then src).
        if let Some(href) = attrs.get("href") {
            self.candidates.push(href.clone());
        }
        if let Some(src) = attrs.get("src") {
            self.candidates.push(src.clone());
        }
    }
}

/// Extracts every hyperlink/resource reference from the markup, verbatim
/// and in document order. Duplicates are NOT removed here.
pub fn extract_html_links(markup: &str) -> Vec<String> {
    let mut collector = LinkCollector::default();
    visit_tags(markup, &mut collector);
    collector.candidates
}

/// Pulls the redirect target out of a `<meta http-equiv="refresh">` tag.
#[derive(Debug, Default)]
struct RefreshCollector {
    target: Option<String>,
}

impl TagVisitor for RefreshCollector {
    fn visit_tag(&mut self, name: &str, attrs: &HashMap<String, String>) {
        if name != "meta" || self.target.is_some() {
            return;
        }
        let is_refresh = attrs
            .get("http-equiv")
            .map(|v| v.eq_ignore_ascii_case("refresh"))
            .unwrap_or(false);
        if !is_refresh {
            return;
        }
        if let Some(content) = attrs.get("content") {
            self.target = parse_refresh_content(content);
        }
    }
}

/// Returns the meta-refresh redirect target of an HTML page, if any.
/// The first refresh directive wins.
pub fn extract_meta_refresh(markup: &str) -> Option<String> {
    let mut collector = RefreshCollector::default();
    visit_tags(markup, &mut collector);
    collector.target
}

/// Parses the content attribute of a refresh directive: "0;URL=https://...".
/// The URL= key is matched case-insensitively and quotes are stripped.
fn parse_refresh_content(content: &str) -> Option<String> {
    for part in content.split(';') {
        let part = part.trim();
        // "URL=" is matched case-insensitively; since the prefix is pure
        // ASCII, slicing after it is always on a char boundary.
        if part.to_ascii_lowercase().starts_with("url=") {
            let target = part[4..].trim().trim_matches(|c| c == '"' || c == '\'');
            if !target.is_empty() {
                return Some(target.to_string());
            }
        }
    }
    None
}
