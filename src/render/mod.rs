//! Card rendering
//!
//! A [`Renderer`] turns a layout composition and the raw font bytes into
//! PNG data. Implementations must be deterministic: the same composition
//! and font always produce byte-identical output, which is what makes
//! uncoordinated concurrent cache fills safe.

use crate::errors::RenderResult;
use crate::layout::LayoutComposition;

pub mod raster;
pub mod svg;

pub use raster::ResvgRenderer;

/// Composition + font -> PNG bytes
pub trait Renderer: Send + Sync {
    fn render(&self, composition: &LayoutComposition, font: &[u8]) -> RenderResult<Vec<u8>>;
}
