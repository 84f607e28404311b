//! HTTP error responses
//!
//! Every [`AppError`] becomes a plain `500`. The details go to the log, not
//! to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::errors::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ResolveError;

    #[test]
    fn test_errors_map_to_server_error() {
        let response = AppError::from(ResolveError::invalid_label("xn--zz")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::asset_unavailable("font.otf", "missing").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
