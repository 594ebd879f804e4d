// src/fetch/mod.rs
// =============================================================================
// This module retrieves documents for the checking pipeline.
//
// A document lives either on the live origin (a URL) or in the locally
// staged site directory (a path); the caller just hands over a location
// string and gets back bytes plus a content type. Nothing downstream knows
// which side it came from.
// =============================================================================

mod document;

pub use document::{fetch_document, FetchedDocument, HTML_MIME};
