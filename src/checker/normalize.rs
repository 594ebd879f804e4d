// src/checker/normalize.rs
// =============================================================================
// Turns a raw link candidate plus its base context into an absolute URL.
//
// The rules are deliberately literal string rules rather than full RFC 3986
// resolution - they mirror how the deployed pages actually link:
//
//   javascript: / # / data:  -> not a navigable resource, dropped
//   ./rest                   -> base with its trailing path segment replaced
//   /path                    -> base's scheme+host + path
//   http(s)://...            -> already absolute, returned unchanged
//   anything else            -> concatenated onto base directly
//
// Malformed input never raises: a candidate that fits no earlier branch
// falls through to the final concatenation branch.
//
// On top of that, any resolved URL that references a telemetry endpoint
// (hostname containing a configured marker substring, e.g. the gtag.js
// loader) is dropped. Analytics beacons are not content links.
// =============================================================================

use url::Url;

/// Prefixes that mark a candidate as not a navigable resource.
const NON_NAVIGABLE: [&str; 3] = ["javascript:", "#", "data:"];

/// Resolves `candidate` against `base`, or returns None if the candidate
/// should be excluded from checking.
///
/// Pure: the same (candidate, base, markers) always produces the same
/// output.
///
/// Examples:
///   normalize("/resume.pdf", "https://example.com/dir/page", &[])
///     -> Some("https://example.com/resume.pdf")
///   normalize("#top", base, &[]) -> None
pub fn normalize(candidate: &str, base: &str, markers: &[String]) -> Option<String> {
    if NON_NAVIGABLE.iter().any(|p| candidate.starts_with(p)) {
        return None;
    }

    let resolved = if let Some(rest) = candidate.strip_prefix("./") {
        // Relative to the base's directory: replace everything after the
        // last slash.
        match base.rfind('/') {
            Some(idx) => format!("{}{}", &base[..idx + 1], rest),
            None => format!("{}/{}", base, rest),
        }
    } else if candidate.starts_with('/') {
        format!("{}{}", origin_of(base), candidate)
    } else if candidate.starts_with("http://") || candidate.starts_with("https://") {
        candidate.to_string()
    } else {
        // Fall-through branch: treat as relative and concatenate. Anything
        // unclassifiable ends up here on purpose.
        format!("{}{}", base, candidate)
    };

    if markers.iter().any(|m| resolved.contains(m.as_str())) {
        return None;
    }

    Some(resolved)
}

/// Returns the scheme+host(+port) part of `base`.
fn origin_of(base: &str) -> String {
    if let Ok(parsed) = Url::parse(base) {
        if let Some(host) = parsed.host_str() {
            return match parsed.port() {
                Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
                None => format!("{}://{}", parsed.scheme(), host),
            };
        }
    }
    // Base without a parseable host: strip any trailing slash so the
    // absolute-path candidate still joins cleanly.
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com/dir/page";

    fn no_markers() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_non_navigable_candidates_are_excluded() {
        for candidate in ["javascript:void(0)", "#top", "data:image/png;base64,AAAA"] {
            assert_eq!(normalize(candidate, BASE, &no_markers()), None);
        }
    }

    #[test]
    fn test_absolute_path_joins_scheme_and_host() {
        assert_eq!(
            normalize("/resume.pdf", BASE, &no_markers()),
            Some("https://example.com/resume.pdf".to_string())
        );
    }

    #[test]
    fn test_absolute_path_keeps_port() {
        assert_eq!(
            normalize("/x", "http://localhost:8080/page", &no_markers()),
            Some("http://localhost:8080/x".to_string())
        );
    }

    #[test]
    fn test_dot_slash_replaces_trailing_segment() {
        assert_eq!(
            normalize("./style.css", BASE, &no_markers()),
            Some("https://example.com/dir/style.css".to_string())
        );
    }

    #[test]
    fn test_absolute_url_is_unchanged() {
        let url = "https://doodle.com/bp/paulbovbel/meet";
        assert_eq!(normalize(url, BASE, &no_markers()), Some(url.to_string()));
    }

    #[test]
    fn test_idempotence_of_absolute_urls() {
        let first = normalize("https://other.com/a?b=c", BASE, &no_markers()).unwrap();
        let second = normalize(&first, BASE, &no_markers()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bare_relative_concatenates_directly() {
        assert_eq!(
            normalize("extra", BASE, &no_markers()),
            Some("https://example.com/dir/pageextra".to_string())
        );
    }

    #[test]
    fn test_analytics_marker_excludes() {
        let markers = vec!["googletagmanager".to_string()];
        assert_eq!(
            normalize(
                "https://www.googletagmanager.com/gtag/js?id=G-57Q5PWFEVM",
                BASE,
                &markers
            ),
            None
        );
        // Non-matching URLs pass through the same filter untouched.
        assert!(normalize("https://example.org/", BASE, &markers).is_some());
    }
}
