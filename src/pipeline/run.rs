// src/pipeline/run.rs
// =============================================================================
// The link-checking pipeline over a batch of documents.
//
// Each location (URL or staged path) is fetched and routed by content type:
// PDFs go through the annotation walker (URIs come out already absolute),
// HTML goes through the tag visitor and then the normalizer with the
// document's base context. The combined candidates are filtered against
// the skip policy, deduplicated first-seen-order, and probed concurrently.
//
// Dedup policy: the extractors keep their own shapes (PDF is a set, HTML
// is an ordered sequence with duplicates), and the pipeline dedups the
// merged list - so every URL is probed at most once per document no matter
// how it was discovered.
// =============================================================================

use anyhow::Result;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

use crate::checker::{
    extract_html_links, extract_pdf_links, normalize, LinkCheckResult, LinkValidator, SkipPolicy,
};
use crate::config::CheckConfig;
use crate::fetch::{fetch_document, FetchedDocument};

/// Everything the pipeline found out about one document.
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    pub location: String,
    /// URLs excluded by the skip policy; never probed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    pub results: Vec<LinkCheckResult>,
    /// Set when the document itself could not be fetched or parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentReport {
    fn failed(location: &str, error: String) -> DocumentReport {
        DocumentReport {
            location: location.to_string(),
            skipped: Vec::new(),
            results: Vec::new(),
            error: Some(error),
        }
    }

    /// Count of confirmed-broken links.
    pub fn broken_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| !r.is_ok() && !r.is_indeterminate())
            .count()
    }

    /// Count of indeterminate probe failures.
    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_indeterminate()).count()
    }

    /// True when the document fetched cleanly and every link checked out.
    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.results.iter().all(|r| r.is_ok())
    }
}

/// Runs the full pipeline over a batch of documents.
///
/// `base_override` supplies the base context for relative links in staged
/// files, where the location itself is a filesystem path; remote documents
/// default to their own URL.
pub async fn check_documents(
    locations: &[String],
    base_override: Option<&str>,
    config: &CheckConfig,
) -> Result<Vec<DocumentReport>> {
    let fetcher = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    let validator = LinkValidator::new(config)?;
    let skip = SkipPolicy::new(config.skip_hosts.iter().cloned());

    let mut reports = Vec::with_capacity(locations.len());
    for location in locations {
        let report =
            check_document(&fetcher, &validator, &skip, config, location, base_override).await;
        reports.push(report);
    }
    Ok(reports)
}

/// Checks one document; failures become part of the report, not an Err.
async fn check_document(
    fetcher: &Client,
    validator: &LinkValidator,
    skip: &SkipPolicy,
    config: &CheckConfig,
    location: &str,
    base_override: Option<&str>,
) -> DocumentReport {
    let document = match fetch_document(fetcher, location).await {
        Ok(document) => document,
        Err(e) => return DocumentReport::failed(location, e.to_string()),
    };

    let candidates = match discover_candidates(&document, base_override, config) {
        Ok(candidates) => candidates,
        Err(e) => return DocumentReport::failed(location, e),
    };

    let (to_check, skipped) = partition_candidates(candidates, skip);
    let results = validator.check_all(to_check).await;

    DocumentReport {
        location: location.to_string(),
        skipped,
        results,
        error: None,
    }
}

/// Routes content to the matching extractor and returns normalized URLs.
fn discover_candidates(
    document: &FetchedDocument,
    base_override: Option<&str>,
    config: &CheckConfig,
) -> Result<Vec<String>, String> {
    if document.is_pdf() {
        // PDF URIs are already absolute; only the web-scheme filter in the
        // extractor applies.
        let links = extract_pdf_links(&document.bytes).map_err(|e| e.to_string())?;
        Ok(links.into_iter().collect())
    } else {
        let markup = String::from_utf8_lossy(&document.bytes);
        let base = base_override.unwrap_or(&document.location);
        Ok(html_candidates(&markup, base, config))
    }
}

/// Extracts and normalizes HTML link candidates against the base context.
fn html_candidates(markup: &str, base: &str, config: &CheckConfig) -> Vec<String> {
    extract_html_links(markup)
        .iter()
        .filter_map(|candidate| normalize(candidate, base, &config.analytics_markers))
        .collect()
}

/// Splits candidates into (to probe, skipped by policy), deduplicating
/// first-seen-order.
///
/// Invariant: every URL in the first list has cleared the skip filter; the
/// validator never re-checks policy.
fn partition_candidates(candidates: Vec<String>, skip: &SkipPolicy) -> (Vec<String>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut to_check = Vec::new();
    let mut skipped = Vec::new();

    for url in candidates {
        if !seen.insert(url.clone()) {
            continue;
        }
        if skip.should_skip(&url) {
            skipped.push(url);
        } else {
            to_check.push(url);
        }
    }

    (to_check, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CheckConfig {
        CheckConfig::default()
    }

    #[test]
    fn test_skip_set_hosts_are_never_probed() {
        let skip = SkipPolicy::new(["www.linkedin.com"]);
        let candidates = vec![
            "https://www.linkedin.com/in/someone".to_string(),
            "https://example.com/".to_string(),
        ];
        let (to_check, skipped) = partition_candidates(candidates, &skip);
        assert_eq!(to_check, vec!["https://example.com/"]);
        assert_eq!(skipped, vec!["https://www.linkedin.com/in/someone"]);
    }

    #[test]
    fn test_duplicates_probed_once() {
        let skip = SkipPolicy::new(Vec::<String>::new());
        let candidates = vec![
            "https://example.com/a".to_string(),
            "https://example.com/b".to_string(),
            "https://example.com/a".to_string(),
        ];
        let (to_check, skipped) = partition_candidates(candidates, &skip);
        assert_eq!(to_check, vec!["https://example.com/a", "https://example.com/b"]);
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_redirect_page_resolves_to_sole_destination() {
        // A redirect page as deployed: gtag loader plus the visible link to
        // the refresh target. Only the target survives discovery.
        let markup = r#"
            <!DOCTYPE html>
            <html><head>
              <script async src="https://www.googletagmanager.com/gtag/js?id=G-57Q5PWFEVM"></script>
              <title>Meet</title>
              <meta http-equiv="refresh" content="0;URL=https://doodle.com/bp/paulbovbel/meet" />
            </head>
            <body>
              <p>Redirecting to <a href="https://doodle.com/bp/paulbovbel/meet">https://doodle.com/bp/paulbovbel/meet</a>.</p>
            </body></html>
        "#;
        let candidates = html_candidates(markup, "https://www.example.com/meet", &config());
        assert_eq!(candidates, vec!["https://doodle.com/bp/paulbovbel/meet"]);
    }

    #[test]
    fn test_relative_links_resolve_against_base() {
        let markup = r#"<a href="/resume.pdf">resume</a>"#;
        let candidates = html_candidates(markup, "https://www.example.com/index.html", &config());
        assert_eq!(candidates, vec!["https://www.example.com/resume.pdf"]);
    }

    #[tokio::test]
    async fn test_unfetchable_document_does_not_abort_batch() {
        let locations = vec![
            "/no/such/file.html".to_string(),
            "/also/missing.html".to_string(),
        ];
        let reports = check_documents(&locations, None, &config()).await.unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.error.is_some()));
        assert!(reports.iter().all(|r| r.results.is_empty()));
    }
}
