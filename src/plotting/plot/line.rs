//! Line plot implementation.

use crate::plotting::element::Bounds;
use crate::plotting::plot::{path_data, Plot};
use crate::plotting::style::{Color, DashPattern, LineStyle};

/// A line plot connecting data points.
#[derive(Debug, Clone)]
pub struct LinePlot {
    /// X coordinates
    pub x: Vec<f64>,
    /// Y coordinates
    pub y: Vec<f64>,
    /// Line style
    pub line_style: LineStyle,
    /// Label for legend
    pub label: Option<String>,
}

impl LinePlot {
    /// Create a new line plot from x and y data.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        LinePlot {
            x,
            y,
            line_style: LineStyle::default(),
            label: None,
        }
    }

    /// Set the line color.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.line_style.color = color.into();
        self
    }

    /// Set the line width.
    pub fn linewidth(mut self, width: f64) -> Self {
        self.line_style.width = width;
        self
    }

    /// Set the line style (dash pattern).
    pub fn linestyle(mut self, dash: DashPattern) -> Self {
        self.line_style.dash = dash;
        self
    }

    /// Set the line opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.line_style = self.line_style.opacity(opacity);
        self
    }

    /// Set the label for the legend.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Plot for LinePlot {
    fn bounds(&self) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        for (&x, &y) in self.x.iter().zip(self.y.iter()) {
            bounds.include_point(x, y);
        }
        bounds.into_option()
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn line_style(&self) -> Option<LineStyle> {
        Some(self.line_style.clone())
    }

    fn render_svg(&self, data_bounds: &Bounds, pixel_bounds: &Bounds) -> String {
        let path = path_data(&self.x, &self.y, data_bounds, pixel_bounds);
        if path.is_empty() {
            return String::new();
        }
        format!("<path d=\"{}\" {}/>\n", path, self.line_style.to_svg_style())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_skip_non_finite() {
        let plot = LinePlot::new(vec![0.0, 1.0, 2.0], vec![1.0, f64::INFINITY, 3.0]);
        assert_eq!(plot.bounds(), Some(Bounds::new(0.0, 2.0, 1.0, 3.0)));
    }

    #[test]
    fn test_render_uses_style() {
        let plot = LinePlot::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .color("red")
            .linestyle(DashPattern::Dashed);
        let svg = plot.render_svg(&Bounds::unit(), &Bounds::new(0.0, 100.0, 0.0, 100.0));
        assert!(svg.starts_with("<path d=\"M0.00,100.00 L100.00,0.00\""));
        assert!(svg.contains("stroke=\"red\""));
        assert!(svg.contains("stroke-dasharray"));
    }
}
