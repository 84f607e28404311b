//! Web utility functions

use axum::http::{HeaderMap, Uri, header};
use url::Url;

/// Full URL of the incoming request
///
/// Absolute-form request targets are used as-is; otherwise the URL is
/// rebuilt from the `Host` header and the path.
pub fn request_url(uri: &Uri, headers: &HeaderMap, scheme: &str) -> String {
    if uri.authority().is_some() {
        return uri.to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    format!("{scheme}://{host}{path}")
}

/// `host[:port]` portion of a URL, empty if it has none
pub fn host_with_port(request_url: &str) -> String {
    let Ok(url) = Url::parse(request_url) else {
        return String::new();
    };

    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}
