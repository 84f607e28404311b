//! Preview page
//!
//! The page exists for its Open-Graph metadata: link unfurlers read the
//! title and fetch `/ogp.png` from the same host.

use askama::Template;

use crate::config::Config;
use crate::errors::AppResult;

const SHARE_LABEL: &str = "リンクを共有";

#[derive(Template)]
#[template(path = "preview.html")]
pub struct PreviewPage {
    pub title: String,
    pub description: String,
    pub site_name: String,
    pub site_url: String,
    pub image_url: String,
    /// Request URL as a JavaScript string literal
    pub page_url_js: String,
    pub share_label: &'static str,
}

impl PreviewPage {
    /// Page for `identifier` requested at `request_url`
    ///
    /// `host` is the `host[:port]` of the request and `path` its raw path.
    pub fn new(
        config: &Config,
        identifier: &str,
        host: &str,
        path: &str,
        request_url: &str,
    ) -> Self {
        let site_url = format!("{}://{}/", config.web.public_scheme, host);
        let title = format!(
            "{}{}{}",
            identifier,
            config.card.caption,
            decode_path(path)
        );

        Self {
            title,
            description: config.card.description.clone(),
            site_name: config.card.site_name.clone(),
            image_url: format!("{site_url}ogp.png"),
            site_url,
            page_url_js: js_string_literal(request_url),
            share_label: SHARE_LABEL,
        }
    }

    pub fn to_html(&self) -> AppResult<String> {
        Ok(self.render()?)
    }
}

/// Percent-decoded path without its leading slash
///
/// Paths that do not decode to UTF-8 are shown as sent.
fn decode_path(path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    urlencoding::decode(trimmed)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| trimmed.to_string())
}

/// JSON-quoted string that is also safe inside a `<script>` element
fn js_string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
