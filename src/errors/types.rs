//! Error type definitions for hostcard
//!
//! This module defines all error types used throughout the service,
//! providing a small hierarchy so that each layer reports failures in its
//! own terms while the web layer only has to deal with [`AppError`].

use thiserror::Error;

/// Top-level application error type
///
/// Every request-level failure ends up here. The web layer maps all of
/// these to a server error response; the variants exist so logs say what
/// actually went wrong.
#[derive(Error, Debug)]
pub enum AppError {
    /// Identifier derivation failed (malformed internationalized label)
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Rasterization errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The shared font asset could not be loaded
    #[error("Font asset unavailable: {key} - {message}")]
    AssetUnavailable { key: String, message: String },

    /// HTML page rendering errors
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Identifier resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// An `xn--` label that does not decode to valid Unicode
    #[error("Invalid internationalized label: {label}")]
    InvalidLabel { label: String },
}

/// Blob storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying filesystem failure
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key that would resolve outside the store
    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },

    /// Backend refused the operation
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },
}

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// The generated SVG document could not be parsed
    #[error("SVG error: {0}")]
    Svg(#[from] resvg::usvg::Error),

    /// Pixmap allocation failed for the requested canvas
    #[error("Invalid canvas size: {width}x{height}")]
    Canvas { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {message}")]
    Encode { message: String },

    /// The blocking render task panicked or was cancelled
    #[error("Render task failed: {message}")]
    Task { message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a font asset unavailable error
    pub fn asset_unavailable<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::AssetUnavailable {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl ResolveError {
    /// Create an invalid label error
    pub fn invalid_label<L: Into<String>>(label: L) -> Self {
        Self::InvalidLabel {
            label: label.into(),
        }
    }
}

impl StorageError {
    /// Create an I/O error bound to the key being accessed
    pub fn io<K: Into<String>>(key: K, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }

    /// Create an invalid key error
    pub fn invalid_key<K: Into<String>>(key: K) -> Self {
        Self::InvalidKey { key: key.into() }
    }

    /// Create an unavailable error
    pub fn unavailable<M: Into<String>>(message: M) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl RenderError {
    /// Create a PNG encoding error
    pub fn encode<M: Into<String>>(message: M) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Create a task failure error
    pub fn task<M: Into<String>>(message: M) -> Self {
        Self::Task {
            message: message.into(),
        }
    }
}
