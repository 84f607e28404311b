//! Centralized error handling for hostcard
//!
//! # Error Categories
//!
//! - **Resolve Errors**: malformed internationalized host labels
//! - **Storage Errors**: blob store reads and writes
//! - **Render Errors**: SVG parsing, rasterization, PNG encoding
//! - **Asset Errors**: the shared font could not be loaded
//!
//! # Usage
//!
//! ```rust
//! use hostcard::errors::{AppError, AppResult};
//!
//! async fn example_function() -> AppResult<String> {
//!     // Function can return any error type that converts to AppError
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Storage Results
pub type StorageResult<T> = Result<T, StorageError>;

/// Convenience type alias for Render Results
pub type RenderResult<T> = Result<T, RenderError>;
