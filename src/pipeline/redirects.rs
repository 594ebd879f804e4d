// src/pipeline/redirects.rs
// =============================================================================
// Verifies deployed redirect pages against a declared redirect table.
//
// Redirect pages on a static host are plain HTML carrying a
// <meta http-equiv="refresh" content="0;URL=..."> directive, so a correct
// deploy means: the page answers 200 with text/html and its refresh target
// matches the table exactly. Redirect following is disabled here on
// purpose - the page itself is the thing under test, not where a client
// would end up.
// =============================================================================

use anyhow::Result;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::checker::extract_meta_refresh;
use crate::config::{CheckConfig, RedirectTable};
use crate::fetch::HTML_MIME;

/// Outcome of verifying one redirect page.
#[derive(Debug, Serialize)]
pub struct RedirectReport {
    pub url: String,
    pub expected: String,
    /// The refresh target actually found on the page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
    pub ok: bool,
    /// Why verification failed, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RedirectReport {
    fn failed(url: &str, expected: &str, found: Option<String>, message: String) -> RedirectReport {
        RedirectReport {
            url: url.to_string(),
            expected: expected.to_string(),
            found,
            ok: false,
            message: Some(message),
        }
    }
}

/// Fetches every page in the table and checks its refresh target.
///
/// Table entries are verified independently; one bad page never stops the
/// rest from being checked.
pub async fn verify_redirects(
    table: &RedirectTable,
    config: &CheckConfig,
) -> Result<Vec<RedirectReport>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    let mut reports = Vec::with_capacity(table.len());
    for (url, expected) in table {
        reports.push(verify_one(&client, url, expected).await);
    }
    Ok(reports)
}

async fn verify_one(client: &Client, url: &str, expected: &str) -> RedirectReport {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return RedirectReport::failed(url, expected, None, e.to_string()),
    };

    let status = response.status();
    if status.as_u16() != 200 {
        return RedirectReport::failed(url, expected, None, format!("HTTP {}", status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.contains(HTML_MIME) {
        return RedirectReport::failed(
            url,
            expected,
            None,
            format!("content type is {:?}, not text/html", content_type),
        );
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return RedirectReport::failed(url, expected, None, e.to_string()),
    };

    match extract_meta_refresh(&body) {
        Some(found) if found == expected => RedirectReport {
            url: url.to_string(),
            expected: expected.to_string(),
            found: Some(found),
            ok: true,
            message: None,
        },
        Some(found) => {
            let message = format!("refresh target is {}, expected {}", found, expected);
            RedirectReport::failed(url, expected, Some(found), message)
        }
        None => RedirectReport::failed(
            url,
            expected,
            None,
            "no meta refresh directive found".to_string(),
        ),
    }
}
