// src/config.rs
// =============================================================================
// Runtime configuration for the whole checking pipeline.
//
// Everything here is data, not logic: the skip-host table and the analytics
// markers evolve as blocklists do, so they load from a plain JSON file
// (--config) instead of living in code. The struct is built once at startup
// and passed by reference into each component - after that nothing mutates
// it, so it is safe to share across concurrent probes.
//
// Every field has a default, so a config file only needs to name the fields
// it wants to override.
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration for link extraction and validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Hostnames excluded from validation entirely.
    ///
    /// These are hosts known to answer automated clients with non-200
    /// responses (login walls, bot detection), so probing them only
    /// produces noise.
    pub skip_hosts: Vec<String>,

    /// Substrings identifying telemetry/analytics endpoints.
    ///
    /// A candidate whose resolved form contains any of these is dropped
    /// during normalization - it is a noise filter, not a reachability
    /// judgement.
    pub analytics_markers: Vec<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// How many probes run at once.
    pub concurrency: usize,

    /// Whether probes follow redirects.
    pub follow_redirects: bool,

    /// Redirect hop limit when following is enabled.
    pub max_redirects: usize,

    /// Extra attempts for probes that fail with an indeterminate error
    /// (timeout, connection reset). Confirmed 4xx/5xx answers are never
    /// retried.
    pub retries: u32,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            skip_hosts: vec![
                "linkedin.com".to_string(),
                "www.linkedin.com".to_string(),
                "grabcad.com".to_string(),
                "www.grabcad.com".to_string(),
            ],
            analytics_markers: vec!["googletagmanager".to_string()],
            timeout_secs: 10,
            concurrency: 50,
            follow_redirects: true,
            max_redirects: 5,
            retries: 1,
        }
    }
}

impl CheckConfig {
    /// Loads configuration from a JSON file, or the defaults if no path
    /// was given.
    pub fn load(path: Option<&Path>) -> Result<CheckConfig> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("could not read config file {}", path.display()))?;
                Self::from_json(&text)
                    .with_context(|| format!("invalid config file {}", path.display()))
            }
            None => Ok(CheckConfig::default()),
        }
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(text: &str) -> Result<CheckConfig> {
        let config = serde_json::from_str(text)?;
        Ok(config)
    }
}

/// A declared redirect table: page URL -> expected meta-refresh target.
///
/// BTreeMap keeps report output in a stable order.
pub type RedirectTable = BTreeMap<String, String>;

/// Loads a redirect table from a JSON object file.
pub fn load_redirect_table(path: &Path) -> Result<RedirectTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read redirect table {}", path.display()))?;
    let table = serde_json::from_str(&text)
        .with_context(|| format!("invalid redirect table {}", path.display()))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_include_known_hostile_hosts() {
        let config = CheckConfig::default();
        assert!(config.skip_hosts.contains(&"www.linkedin.com".to_string()));
        assert!(config.skip_hosts.contains(&"grabcad.com".to_string()));
        assert_eq!(config.analytics_markers, vec!["googletagmanager"]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CheckConfig::from_json(r#"{"timeout_secs": 3}"#).unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.concurrency, 50);
        assert!(config.follow_redirects);
    }

    #[test]
    fn test_skip_hosts_override() {
        let config = CheckConfig::from_json(r#"{"skip_hosts": ["example.org"]}"#).unwrap();
        assert_eq!(config.skip_hosts, vec!["example.org"]);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(CheckConfig::from_json("{not json").is_err());
    }
}
