//! Web layer module
//!
//! This module provides the HTTP interface for hostcard. Handlers are thin:
//! they reconstruct the request URL, resolve the identifier and delegate to
//! the image cache or the page builder.
//!
//! # Routes
//!
//! - `GET /ogp.png` - card image for the requesting host
//! - `GET /health` - liveness and cache counters
//! - `GET` anything else - the preview page

use anyhow::Result;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{config::Config, services::ImageCache};

pub mod handlers;
pub mod page;
pub mod responses;
pub mod utils;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub image_cache: Arc<ImageCache>,
}

impl AppState {
    pub fn new(config: Config, image_cache: Arc<ImageCache>) -> Self {
        Self {
            config: Arc::new(config),
            image_cache,
        }
    }
}

/// Build the application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/ogp.png", get(handlers::card::serve_card))
        .route("/health", get(handlers::health::health_check))
        .fallback(get(handlers::page::serve_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(state: AppState) -> Result<Self> {
        let addr: SocketAddr =
            format!("{}:{}", state.config.web.host, state.config.web.port).parse()?;
        let app = create_app(state);

        Ok(Self { app, addr })
    }

    /// Serve until SIGINT/SIGTERM
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.addr, e))?;

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let (Ok(mut sigterm), Ok(mut sigint)) = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) else {
            tracing::warn!("Failed to install signal handlers, shutdown requires killing the process");
            std::future::pending::<()>().await;
            return;
        };

        tokio::select! {
            _ = sigterm.recv() => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
            }
            _ = sigint.recv() => {
                tracing::info!("Received SIGINT (Ctrl+C), shutting down gracefully");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        }
    }
}
