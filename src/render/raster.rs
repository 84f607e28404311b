use resvg::{tiny_skia, usvg};
use tracing::{debug, warn};

use super::Renderer;
use super::svg::composition_to_svg;
use crate::errors::{RenderError, RenderResult};
use crate::layout::LayoutComposition;

/// Rasterizes compositions through resvg
#[derive(Debug, Clone)]
pub struct ResvgRenderer {
    fallback_family: String,
}

impl Default for ResvgRenderer {
    fn default() -> Self {
        Self::new("sans-serif")
    }
}

impl ResvgRenderer {
    /// Renderer that falls back to `fallback_family` when the font data has no usable face
    pub fn new(fallback_family: impl Into<String>) -> Self {
        Self {
            fallback_family: fallback_family.into(),
        }
    }
}

impl Renderer for ResvgRenderer {
    fn render(&self, composition: &LayoutComposition, font: &[u8]) -> RenderResult<Vec<u8>> {
        let mut options = usvg::Options::default();
        let fontdb = options.fontdb_mut();
        fontdb.load_font_data(font.to_vec());

        let family = fontdb
            .faces()
            .next()
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| {
                warn!("Font data contains no usable face, using {}", self.fallback_family);
                self.fallback_family.clone()
            });

        let document = composition_to_svg(composition, &family);
        let tree = usvg::Tree::from_str(&document, &options)?;

        let size = composition.canvas.size;
        let mut pixmap = tiny_skia::Pixmap::new(size, size).ok_or(RenderError::Canvas {
            width: size,
            height: size,
        })?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        let png = pixmap
            .encode_png()
            .map_err(|e| RenderError::encode(e.to_string()))?;
        debug!(
            "Rendered card for {:?} with {} ({} bytes)",
            composition.identifier.text,
            family,
            png.len()
        );
        Ok(png)
    }
}
