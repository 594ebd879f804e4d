// src/error.rs
// =============================================================================
// Typed errors for the fetch and extract layers.
//
// Two failure classes matter here:
// - FetchError: the document could not be retrieved at all, so extraction
//   never runs for it. One bad document never aborts a batch.
// - DocumentFormatError: the bytes are not a valid document of the claimed
//   type. Extraction is all-or-nothing per document, so a structural failure
//   midway through a PDF discards everything found so far.
//
// Per-URL probe failures are NOT errors in this sense - they surface as the
// `error` status on a check result (see checker::http), because the batch
// must report every link in one pass.
// =============================================================================

use thiserror::Error;

/// The document fetcher could not retrieve content.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request itself failed (connection, TLS, timeout).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The origin answered, but not with a document we can use.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// A locally staged file could not be read.
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Content claimed to be a document of some type cannot be parsed as such.
#[derive(Debug, Error)]
#[error("not a valid {kind} document: {reason}")]
pub struct DocumentFormatError {
    /// Document type we were asked to parse ("PDF", "HTML").
    pub kind: &'static str,
    pub reason: String,
}

impl DocumentFormatError {
    pub fn pdf(reason: impl Into<String>) -> Self {
        DocumentFormatError {
            kind: "PDF",
            reason: reason.into(),
        }
    }
}
