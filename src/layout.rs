//! Text-fit card layout
//!
//! The card is a fixed two-row composition on a square canvas. The top row
//! holds the identifier, stretched or squeezed horizontally so that it
//! always spans the same visual width; the bottom row holds the caption at
//! its natural width. Glyph height is fixed by a constant vertical scale.

/// Canvas side length in pixels
pub const CANVAS_SIZE: u32 = 256;

/// Reference text length the identifier row is normalized to
pub const UNIT_LENGTH: u32 = 4;

/// Vertical stretch applied to both rows
pub const VERTICAL_SCALE: f64 = 1.5;

/// Top margin of the identifier row in pixels
pub const IDENTIFIER_MARGIN_TOP: f64 = 10.0;

/// Identifier row width relative to the canvas, so scaling never clips
pub const IDENTIFIER_WIDTH_FACTOR: f64 = 10.0;

pub const BACKGROUND_COLOR: &str = "#fff";

/// Fixed canvas geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSpec {
    pub size: u32,
    pub unit_length: u32,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            size: CANVAS_SIZE,
            unit_length: UNIT_LENGTH,
        }
    }
}

impl CanvasSpec {
    /// Font size shared by both rows
    pub fn font_size(&self) -> f64 {
        f64::from(self.size) / f64::from(self.unit_length)
    }
}

/// Horizontal anchor of a row's scale transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOrigin {
    /// Left edge, vertically centred
    Left,
    /// Centre of the box
    Center,
}

/// One row of the composition
#[derive(Debug, Clone, PartialEq)]
pub struct TextRegion {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub origin: TransformOrigin,
}

impl TextRegion {
    /// Pivot point of the scale transform in canvas coordinates
    pub fn origin_point(&self) -> (f64, f64) {
        let cy = self.y + self.height / 2.0;
        match self.origin {
            TransformOrigin::Left => (self.x, cy),
            TransformOrigin::Center => (self.x + self.width / 2.0, cy),
        }
    }
}

/// Complete card description handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutComposition {
    pub canvas: CanvasSpec,
    pub background: &'static str,
    pub identifier: TextRegion,
    pub caption: TextRegion,
}

impl LayoutComposition {
    /// Rows in top-to-bottom order
    pub fn rows(&self) -> [&TextRegion; 2] {
        [&self.identifier, &self.caption]
    }
}

/// Approximate rendered width of `text` in full-width glyph units
///
/// Printable ASCII counts as half a unit, everything else as a full unit.
pub fn text_length(text: &str) -> f64 {
    text.chars()
        .map(|c| if (' '..='~').contains(&c) { 0.5 } else { 1.0 })
        .sum()
}

/// Horizontal scale that makes `text` span the reference length
///
/// An empty identifier has no width to normalize and is drawn unscaled.
pub fn horizontal_scale(text: &str, canvas: &CanvasSpec) -> f64 {
    let length = text_length(text);
    if length == 0.0 {
        return 1.0;
    }
    f64::from(canvas.unit_length) / length
}

/// Build the two-row composition for an identifier
pub fn compose(identifier: &str, caption: &str, canvas: &CanvasSpec) -> LayoutComposition {
    let size = f64::from(canvas.size);
    let font_size = canvas.font_size();

    // Both rows ask for half the canvas; the top margin overflows the column
    // and is taken out of the two rows evenly, as flex-shrink would.
    let row_height = (size - IDENTIFIER_MARGIN_TOP) / 2.0;

    let identifier_row = TextRegion {
        text: identifier.to_string(),
        x: 0.0,
        y: IDENTIFIER_MARGIN_TOP,
        width: size * IDENTIFIER_WIDTH_FACTOR,
        height: row_height,
        font_size,
        scale_x: horizontal_scale(identifier, canvas),
        scale_y: VERTICAL_SCALE,
        origin: TransformOrigin::Left,
    };

    let caption_row = TextRegion {
        text: caption.to_string(),
        x: 0.0,
        y: IDENTIFIER_MARGIN_TOP + row_height,
        width: size,
        height: row_height,
        font_size,
        scale_x: 1.0,
        scale_y: VERTICAL_SCALE,
        origin: TransformOrigin::Center,
    };

    LayoutComposition {
        canvas: *canvas,
        background: BACKGROUND_COLOR,
        identifier: identifier_row,
        caption: caption_row,
    }
}
