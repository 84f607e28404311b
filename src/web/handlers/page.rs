//! Preview page handler

use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::Html,
};

use crate::errors::AppResult;
use crate::identifier::resolve_identifier;
use crate::web::{
    AppState,
    page::PreviewPage,
    utils::{host_with_port, request_url},
};

/// Serve the preview page for any path
pub async fn serve_page(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> AppResult<Html<String>> {
    let url = request_url(&uri, &headers, &state.config.web.public_scheme);
    let identifier = resolve_identifier(&url)?;
    let host = host_with_port(&url);

    let page = PreviewPage::new(&state.config, &identifier, &host, uri.path(), &url);
    Ok(Html(page.to_html()?))
}
