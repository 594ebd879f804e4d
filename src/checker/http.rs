// src/checker/http.rs
// =============================================================================
// This module validates URLs by probing them over HTTP.
//
// Key functionality:
// - HEAD requests (lightweight, no body transfer), falling back to GET
//   when a server answers 405 to HEAD
// - Per-request timeout; an unresponsive host can never hang the batch
// - Bounded-concurrency batch checking via buffer_unordered
// - Bounded retry with doubling backoff, but only for indeterminate
//   failures - a confirmed 4xx/5xx is never retried
//
// The three outcome classes are deliberately distinct:
// - Reachable:   status in [200, 400) - confirmed good
// - Unreachable: status in [400, 600) - confirmed broken, actionable
// - Error:       the probe itself failed - the target's state is unknown,
//                which a CI gate should treat differently from a broken link
// =============================================================================

use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::CheckConfig;

/// Outcome class of a single reachability probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    /// Confirmed good: HTTP status in [200, 400).
    Reachable,
    /// Confirmed broken: HTTP status in [400, 600).
    Unreachable,
    /// Indeterminate: the probe failed (timeout, DNS, connection reset).
    Error,
}

/// The result of checking a single URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCheckResult {
    /// The URL that was probed.
    pub url: String,
    #[serde(flatten)]
    pub status: LinkStatus,
    /// HTTP status line or failure reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LinkCheckResult {
    /// True only for confirmed-good links.
    pub fn is_ok(&self) -> bool {
        self.status == LinkStatus::Reachable
    }

    /// True when the probe failed rather than the link - retry-worthy,
    /// not actionable.
    pub fn is_indeterminate(&self) -> bool {
        self.status == LinkStatus::Error
    }
}

/// Issues reachability probes with the configured timeout, redirect
/// policy, concurrency bound, and retry budget.
#[derive(Debug, Clone)]
pub struct LinkValidator {
    client: Client,
    concurrency: usize,
    retries: u32,
}

/// First backoff delay; doubles per retry.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

impl LinkValidator {
    /// Builds a validator from the shared configuration.
    pub fn new(config: &CheckConfig) -> anyhow::Result<LinkValidator> {
        let redirect_policy = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(redirect_policy)
            .build()?;

        Ok(LinkValidator {
            client,
            concurrency: config.concurrency.max(1),
            retries: config.retries,
        })
    }

    /// Checks every URL, up to `concurrency` at a time.
    ///
    /// Results come back in completion order; each one carries its URL, so
    /// nothing depends on ordering. No result short-circuits another - the
    /// point is to report every broken link in one pass.
    pub async fn check_all(&self, urls: Vec<String>) -> Vec<LinkCheckResult> {
        let probes = urls.into_iter().map(|url| self.check_one(url));
        stream::iter(probes)
            .buffer_unordered(self.concurrency)
            .collect()
            .await
    }

    /// Checks a single URL, retrying indeterminate failures.
    pub async fn check_one(&self, url: String) -> LinkCheckResult {
        let mut delay = RETRY_BASE_DELAY;
        for _ in 0..self.retries {
            let result = self.probe(&url).await;
            if !result.is_indeterminate() {
                return result;
            }
            // Transient network trouble; give it a moment and try again.
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
        self.probe(&url).await
    }

    /// One probe: HEAD, with a GET fallback for servers that reject HEAD.
    async fn probe(&self, url: &str) -> LinkCheckResult {
        match self.client.head(url).send().await {
            Ok(response) if response.status().as_u16() == 405 => {
                // Some origins disallow HEAD outright; a GET settles it.
                // The body is never read, so this stays cheap.
                match self.client.get(url).send().await {
                    Ok(response) => classify_response(url, response.status().as_u16()),
                    Err(error) => classify_failure(url, &error),
                }
            }
            Ok(response) => classify_response(url, response.status().as_u16()),
            Err(error) => classify_failure(url, &error),
        }
    }
}

/// Maps an HTTP status code onto an outcome class.
///
/// With redirect following enabled this sees the final hop's status; with
/// it disabled, a 3xx still lands in [200, 400) and counts as reachable.
fn classify_response(url: &str, status: u16) -> LinkCheckResult {
    let link_status = if (200..400).contains(&status) {
        LinkStatus::Reachable
    } else {
        LinkStatus::Unreachable
    };
    LinkCheckResult {
        url: url.to_string(),
        status: link_status,
        message: Some(format!("HTTP {}", status)),
    }
}

/// Maps a transport-level failure onto the indeterminate class.
fn classify_failure(url: &str, error: &reqwest::Error) -> LinkCheckResult {
    let message = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    };
    LinkCheckResult {
        url: url.to_string(),
        status: LinkStatus::Error,
        message: Some(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_redirect_codes_are_reachable() {
        for status in [200, 204, 301, 302, 399] {
            let result = classify_response("https://example.com", status);
            assert_eq!(result.status, LinkStatus::Reachable, "HTTP {}", status);
        }
    }

    #[test]
    fn test_client_and_server_errors_are_unreachable() {
        for status in [400, 404, 410, 500, 503, 599] {
            let result = classify_response("https://example.com", status);
            assert_eq!(result.status, LinkStatus::Unreachable, "HTTP {}", status);
        }
    }

    #[test]
    fn test_result_predicates() {
        let reachable = classify_response("https://example.com", 200);
        assert!(reachable.is_ok());
        assert!(!reachable.is_indeterminate());

        let broken = classify_response("https://example.com", 404);
        assert!(!broken.is_ok());
        assert!(!broken.is_indeterminate());

        let error = LinkCheckResult {
            url: "https://example.com".to_string(),
            status: LinkStatus::Error,
            message: None,
        };
        assert!(!error.is_ok());
        assert!(error.is_indeterminate());
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let result = classify_response("https://example.com", 404);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "unreachable");
        assert_eq!(json["message"], "HTTP 404");
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_an_error_not_unreachable() {
        let config = CheckConfig {
            timeout_secs: 2,
            retries: 0,
            ..CheckConfig::default()
        };
        let validator = LinkValidator::new(&config).unwrap();
        let result = validator
            .check_one("https://definitely-not-a-real-host.invalid/".to_string())
            .await;
        assert_eq!(result.status, LinkStatus::Error);
    }
}
