//! Card image handler

use axum::{
    extract::State,
    http::{HeaderMap, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::errors::AppResult;
use crate::identifier::resolve_identifier;
use crate::web::{AppState, utils::request_url};

/// Serve the card image for the requesting host
pub async fn serve_card(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> AppResult<Response> {
    let url = request_url(&uri, &headers, &state.config.web.public_scheme);
    let identifier = resolve_identifier(&url)?;
    debug!("Serving card for identifier {:?}", identifier);

    let image = state.image_cache.get_or_render(&identifier).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        image,
    )
        .into_response())
}
