//! Text annotations placed in axes coordinates.

use crate::plotting::element::Bounds;
use crate::plotting::style::{DominantBaseline, FillStyle, TextAnchor, TextStyle};

/// A text annotation positioned in axes fractions: (0, 0) is the lower
/// left corner of the plot area, (1, 1) the upper right one.
#[derive(Debug, Clone)]
pub struct Annotation {
    /// The text content
    pub content: String,
    /// Horizontal axes fraction
    pub x: f64,
    /// Vertical axes fraction
    pub y: f64,
    /// Style configuration
    pub style: TextStyle,
    /// Optional box drawn behind the text
    pub bbox: Option<FillStyle>,
}

impl Annotation {
    /// Create a new annotation.
    pub fn new(content: impl Into<String>, x: f64, y: f64) -> Self {
        Annotation {
            content: content.into(),
            x,
            y,
            style: TextStyle::default(),
            bbox: None,
        }
    }

    /// Set the style for this text.
    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Draw a box behind the text.
    pub fn bbox(mut self, fill: FillStyle) -> Self {
        self.bbox = Some(fill);
        self
    }

    /// Generate SVG for this annotation inside the given plot area.
    pub fn to_svg(&self, pixel_bounds: &Bounds) -> String {
        let px = pixel_bounds.x_min + self.x * pixel_bounds.width();
        let py = pixel_bounds.y_max - self.y * pixel_bounds.height();
        let mut svg = String::new();

        if let Some(ref fill) = self.bbox {
            let pad = 3.0;
            let width = self.style.approx_width(&self.content) + 2.0 * pad;
            let height = self.style.font_size * 1.2 + 2.0 * pad;
            let left = match self.style.anchor {
                TextAnchor::Start => px - pad,
                TextAnchor::Middle => px - width / 2.0,
                TextAnchor::End => px - width + pad,
            };
            let top = match self.style.baseline {
                DominantBaseline::Hanging => py - pad,
                DominantBaseline::Middle => py - height / 2.0,
                DominantBaseline::Auto => py - height + pad,
            };
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>\n",
                left,
                top,
                width,
                height,
                fill.to_svg_style()
            ));
        }

        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" {}>{}</text>\n",
            px,
            py,
            self.style.to_svg_attrs(),
            escape_xml(&self.content)
        ));
        svg
    }
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
