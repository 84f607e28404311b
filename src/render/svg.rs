//! SVG serialization of a card composition

use quick_xml::escape::escape;

use crate::layout::{LayoutComposition, TextRegion};

/// Baseline offset from the top of a row, as a fraction of the font size
const BASELINE_RATIO: f64 = 0.88;

const TEXT_COLOR: &str = "#000";

/// Serialize a composition to a standalone SVG document
pub fn composition_to_svg(composition: &LayoutComposition, font_family: &str) -> String {
    let size = composition.canvas.size;
    let mut svg = String::with_capacity(1024);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">\n"
    ));
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"0\" width=\"{size}\" height=\"{size}\" fill=\"{}\"/>\n",
        composition.background
    ));
    for row in composition.rows() {
        push_row(&mut svg, row, font_family);
    }
    svg.push_str("</svg>\n");

    svg
}

fn push_row(svg: &mut String, row: &TextRegion, font_family: &str) {
    if row.text.is_empty() {
        return;
    }

    let (ox, oy) = row.origin_point();
    let baseline = row.y + row.font_size * BASELINE_RATIO;

    // Scale about the row's origin, as a CSS transform-origin would
    svg.push_str(&format!(
        "  <g transform=\"translate({ox} {oy}) scale({} {}) translate({} {})\">\n",
        row.scale_x, row.scale_y, -ox, -oy
    ));
    svg.push_str(&format!(
        "    <text x=\"{}\" y=\"{baseline}\" font-family=\"{}\" font-size=\"{}\" fill=\"{TEXT_COLOR}\" xml:space=\"preserve\">{}</text>\n",
        row.x,
        escape(font_family),
        row.font_size,
        escape(row.text.as_str())
    ));
    svg.push_str("  </g>\n");
}
