//! SVG rendering backend.

use crate::plotting::element::escape_xml;
use crate::plotting::style::{FillStyle, LineStyle, TextStyle};

/// Accumulates SVG elements for one document.
#[derive(Debug)]
pub struct SvgBackend {
    /// Image width in pixels
    pub width: f64,
    /// Image height in pixels
    pub height: f64,
    /// SVG content accumulated during rendering
    content: Vec<String>,
    /// SVG defs section (clip paths)
    defs: Vec<String>,
}

impl SvgBackend {
    /// Create a new SVG backend with the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        SvgBackend {
            width,
            height,
            content: Vec::new(),
            defs: Vec::new(),
        }
    }

    /// Add raw SVG content.
    pub fn add_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if !content.is_empty() {
            self.content.push(content);
        }
    }

    /// Draw a line between two points.
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.content.push(format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {}/>",
            x1,
            y1,
            x2,
            y2,
            style.to_svg_style()
        ));
    }

    /// Draw a rectangle.
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &FillStyle) {
        self.content.push(format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>",
            x,
            y,
            width,
            height,
            style.to_svg_style()
        ));
    }

    /// Draw text.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        let transform = if style.rotation != 0.0 {
            format!(" transform=\"rotate({},{:.2},{:.2})\"", style.rotation, x, y)
        } else {
            String::new()
        };

        self.content.push(format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" {}{}>{}</text>",
            x,
            y,
            style.to_svg_attrs(),
            transform,
            escape_xml(text)
        ));
    }

    /// Start a group clipped to the given rectangle.
    pub fn start_clip(&mut self, id: &str, x: f64, y: f64, width: f64, height: f64) {
        self.defs.push(format!(
            "<clipPath id=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath>",
            id, x, y, width, height
        ));
        self.content.push(format!("<g clip-path=\"url(#{})\">", id));
    }

    /// End the current clip.
    pub fn end_clip(&mut self) {
        self.content.push("</g>".to_string());
    }

    /// Render the final SVG string.
    pub fn render(self) -> String {
        let defs_section = if self.defs.is_empty() {
            String::new()
        } else {
            format!("  <defs>\n    {}\n  </defs>\n", self.defs.join("\n    "))
        };

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{}  {}\n</svg>\n",
            defs_section,
            self.content.join("\n  "),
            w = self.width,
            h = self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_document() {
        let mut backend = SvgBackend::new(640.0, 480.0);
        backend.start_clip("area", 0.0, 0.0, 10.0, 10.0);
        backend.draw_line(0.0, 0.0, 1.0, 1.0, &LineStyle::new());
        backend.end_clip();
        backend.add_content("");
        let svg = backend.render();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox=\"0 0 640 480\""));
        assert!(svg.contains("<clipPath id=\"area\">"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("</g>").count(), 1);
    }
}
