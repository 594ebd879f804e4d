// src/checker/skip.rs
// =============================================================================
// The skip policy: which hosts are excluded from validation.
//
// Some domains (social networks, model-sharing sites) answer automated
// clients with 999s, login redirects, or captchas. Probing them reports
// broken links that a human browser would open fine, so they are excluded
// wholesale by hostname.
//
// The policy is pure and total: no I/O, no state beyond the set built at
// construction. The host table itself comes from CheckConfig.
// =============================================================================

use std::collections::HashSet;
use url::Url;

/// Hostname-based exclusion from link validation.
#[derive(Debug, Clone)]
pub struct SkipPolicy {
    hosts: HashSet<String>,
}

impl SkipPolicy {
    /// Builds a policy from a list of hostnames.
    pub fn new<I, S>(hosts: I) -> SkipPolicy
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SkipPolicy {
            hosts: hosts.into_iter().map(Into::into).collect(),
        }
    }

    /// True if the URL's host is in the skip set.
    ///
    /// URLs that do not parse, or that have no host component, are not
    /// skipped - the validator will report on them instead.
    pub fn should_skip(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => parsed
                .host_str()
                .map(|host| self.hosts.contains(host))
                .unwrap_or(false),
            Err(_) => false,
        }
    }
}
