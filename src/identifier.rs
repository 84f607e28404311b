//! Subdomain identifier resolution
//!
//! The identifier is everything in front of the registrable domain, with
//! the labels glued together and any `xn--` labels decoded back to Unicode.
//! `a.b.example.com` resolves to `ab`, `example.com` to the empty string.

use tracing::debug;
use url::Url;

use crate::errors::ResolveError;

/// ASCII-compatible encoding prefix of internationalized labels
const ACE_PREFIX: &str = "xn--";

/// Number of trailing labels treated as the base domain
const BASE_DOMAIN_LABELS: usize = 2;

/// Resolve the identifier for a full request URL
///
/// URLs without a host, or that fail to parse for reasons unrelated to
/// internationalized labels, resolve to the empty identifier.
pub fn resolve_identifier(request_url: &str) -> Result<String, ResolveError> {
    let url = match Url::parse(request_url) {
        Ok(url) => url,
        Err(url::ParseError::IdnaError) => {
            return Err(ResolveError::invalid_label(host_portion(request_url)));
        }
        Err(e) => {
            debug!("Unparsable request url {}: {}", request_url, e);
            return Ok(String::new());
        }
    };

    match url.host_str() {
        Some(host) => identifier_from_host(host),
        None => Ok(String::new()),
    }
}

/// Resolve the identifier from a bare hostname
pub fn identifier_from_host(host: &str) -> Result<String, ResolveError> {
    let labels: Vec<&str> = host.split('.').collect();
    let keep = labels.len().saturating_sub(BASE_DOMAIN_LABELS);

    labels[..keep]
        .iter()
        .map(|label| decode_label(label))
        .collect()
}

fn decode_label(label: &str) -> Result<String, ResolveError> {
    if !label.starts_with(ACE_PREFIX) {
        return Ok(label.to_string());
    }

    let (decoded, result) = idna::domain_to_unicode(label);
    match result {
        Ok(()) if !decoded.starts_with(ACE_PREFIX) => Ok(decoded),
        _ => Err(ResolveError::invalid_label(label)),
    }
}

/// Best-effort host slice of a URL that failed to parse, for error reporting
fn host_portion(request_url: &str) -> &str {
    let rest = request_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(request_url);
    rest.split(['/', '?', '#', ':']).next().unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_domain_is_empty() {
        assert_eq!(resolve_identifier("https://chin-ch.in/").unwrap(), "");
    }

    #[test]
    fn test_single_subdomain() {
        assert_eq!(resolve_identifier("https://foo.chin-ch.in/").unwrap(), "foo");
    }

    #[test]
    fn test_multi_level_subdomains_concatenate() {
        assert_eq!(
            resolve_identifier("http://a.b.example.com/path?q=1").unwrap(),
            "ab"
        );
    }

    #[test]
    fn test_punycode_label_is_decoded() {
        assert_eq!(
            resolve_identifier("https://xn--wgv71a.chin-ch.in/").unwrap(),
            "日本"
        );
    }

    #[test]
    fn test_mixed_labels_keep_order() {
        assert_eq!(
            identifier_from_host("xn--bcher-kva.shop.example.com").unwrap(),
            "büchershop"
        );
    }

    #[test]
    fn test_short_hosts_are_empty() {
        assert_eq!(identifier_from_host("localhost").unwrap(), "");
        assert_eq!(identifier_from_host("example.com").unwrap(), "");
    }

    #[test]
    fn test_missing_host_is_empty() {
        assert_eq!(resolve_identifier("mailto:someone@example.com").unwrap(), "");
        assert_eq!(resolve_identifier("not a url").unwrap(), "");
    }

    #[test]
    fn test_malformed_punycode_is_fatal() {
        let err = identifier_from_host("xn--99999999.example.com").unwrap_err();
        assert_eq!(err, ResolveError::invalid_label("xn--99999999"));
        assert!(resolve_identifier("https://xn--99999999.example.com/").is_err());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let url = "https://xn--wgv71a.foo.chin-ch.in/abc";
        assert_eq!(
            resolve_identifier(url).unwrap(),
            resolve_identifier(url).unwrap()
        );
    }
}
