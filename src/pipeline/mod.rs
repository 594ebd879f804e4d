// src/pipeline/mod.rs
// =============================================================================
// This module wires the engine together, per document:
//
//   fetch -> route by content type -> extract -> normalize (HTML only)
//         -> skip-filter -> dedup -> validate -> report
//
// plus the redirect-table verification used to sign off a deploy.
//
// Failure containment: a document that cannot be fetched or parsed gets an
// error noted on its report and the batch moves on. Per-URL outcomes are
// collected in aggregate - the run reports every broken link, not just the
// first.
// =============================================================================

mod redirects;
mod run;

pub use redirects::{verify_redirects, RedirectReport};
pub use run::{check_documents, DocumentReport};
