//! Health check handler

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::web::AppState;

/// Liveness check with card cache counters
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let stats = state.image_cache.stats();

    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "card_cache": {
            "hits": stats.hits,
            "misses": stats.misses,
            "store_failures": stats.store_failures,
        }
    }))
}
