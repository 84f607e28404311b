//! Service layer
//!
//! - [`FontAsset`]: lazily loaded card typeface
//! - [`ImageCache`]: cache-first card rendering

pub mod font;
pub mod image_cache;

pub use font::FontAsset;
pub use image_cache::{ImageCache, ImageCacheStats};
