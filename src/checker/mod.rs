// src/checker/mod.rs
// =============================================================================
// The link discovery and validation engine.
//
// Submodules:
// - html: push-parses markup, collecting link candidates and meta-refresh
//   targets via the TagVisitor interface
// - pdf: walks PDF page annotations for embedded web links
// - normalize: resolves raw candidates against a base context
// - skip: hostname-based exclusion of bot-hostile domains
// - http: probes the surviving URLs and classifies the outcomes
//
// The flow between them lives in the pipeline module; everything here is
// usable on its own.
// =============================================================================

mod html;
mod http;
mod normalize;
mod pdf;
mod skip;

pub use html::{extract_html_links, extract_meta_refresh};
pub use http::{LinkCheckResult, LinkStatus, LinkValidator};
pub use normalize::normalize;
pub use pdf::extract_pdf_links;
pub use skip::SkipPolicy;
