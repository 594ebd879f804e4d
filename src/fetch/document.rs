// src/fetch/document.rs
// =============================================================================
// Fetches a document from the live origin or the staged filesystem.
//
// Routing is by shape of the location string: http:// or https:// means a
// network fetch, anything else is a local path. For network fetches the
// content type comes from the response header; for local files it is
// guessed from the extension (only HTML and PDF need to route correctly).
//
// Any failure here is a FetchError - extraction never runs for a document
// that could not be retrieved, but one failed fetch never aborts a batch.
// =============================================================================

use reqwest::Client;
use std::path::Path;
use tokio::fs;

use crate::error::FetchError;

/// MIME signature that routes content to the PDF extractor.
pub const PDF_MIME: &str = "application/pdf";
/// MIME signature that routes content to the HTML extractor.
pub const HTML_MIME: &str = "text/html";

/// A retrieved document, ready for extraction.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Where the document came from, verbatim.
    pub location: String,
    pub bytes: Vec<u8>,
    /// Content type, possibly with parameters ("text/html; charset=utf-8").
    pub content_type: String,
}

impl FetchedDocument {
    /// True if the content should go to the PDF extractor.
    pub fn is_pdf(&self) -> bool {
        self.content_type.starts_with(PDF_MIME)
    }
}

/// Retrieves a document from a URL or a local path.
pub async fn fetch_document(client: &Client, location: &str) -> Result<FetchedDocument, FetchError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        fetch_remote(client, location).await
    } else {
        fetch_local(location).await
    }
}

async fn fetch_remote(client: &Client, url: &str) -> Result<FetchedDocument, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(HTML_MIME)
        .to_string();

    let bytes = response
        .bytes()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    Ok(FetchedDocument {
        location: url.to_string(),
        bytes: bytes.to_vec(),
        content_type,
    })
}

async fn fetch_local(path: &str) -> Result<FetchedDocument, FetchError> {
    let bytes = fs::read(path).await.map_err(|source| FetchError::Read {
        path: path.to_string(),
        source,
    })?;

    Ok(FetchedDocument {
        location: path.to_string(),
        bytes,
        content_type: guess_content_type(path).to_string(),
    })
}

/// Extension-based content type for staged files.
fn guess_content_type(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => PDF_MIME,
        Some("html") | Some("htm") => HTML_MIME,
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(guess_content_type("static/resume.pdf"), PDF_MIME);
        assert_eq!(guess_content_type("static/index.html"), HTML_MIME);
        assert_eq!(guess_content_type("static/page.HTM"), HTML_MIME);
        assert_eq!(guess_content_type("static/logo.png"), "application/octet-stream");
    }

    #[test]
    fn test_pdf_routing_ignores_parameters() {
        let doc = FetchedDocument {
            location: "x".to_string(),
            bytes: Vec::new(),
            content_type: "application/pdf; qs=0.001".to_string(),
        };
        assert!(doc.is_pdf());
    }

    #[tokio::test]
    async fn test_missing_local_file_is_a_fetch_error() {
        let client = Client::new();
        let err = fetch_document(&client, "/no/such/staged/file.html")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Read { .. }));
    }
}
