//! Bar histogram over precomputed bins.

use crate::plotting::element::{to_pixel, Bounds};
use crate::plotting::plot::Plot;
use crate::plotting::style::{Color, FillStyle};

/// Adjacent bars; `edges` has one more element than `heights`.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub heights: Vec<f64>,
    pub fill: FillStyle,
    pub label: Option<String>,
}

impl Histogram {
    pub fn new(edges: Vec<f64>, heights: Vec<f64>) -> Self {
        Histogram {
            edges,
            heights,
            fill: FillStyle::default(),
            label: None,
        }
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.fill.color = color.into();
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.fill = self.fill.opacity(opacity);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn bars(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .zip(self.heights.iter())
            .map(|(edge, &height)| (edge[0], edge[1], height))
    }
}

impl Plot for Histogram {
    fn bounds(&self) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        for (left, right, height) in self.bars() {
            bounds.include_point(left, 0.0);
            bounds.include_point(right, height);
        }
        bounds.into_option()
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn fill_style(&self) -> Option<FillStyle> {
        Some(self.fill.clone())
    }

    fn render_svg(&self, data_bounds: &Bounds, pixel_bounds: &Bounds) -> String {
        let style = self.fill.to_svg_style();
        let mut svg = String::new();
        for (left, right, height) in self.bars() {
            if !(height > 0.0) {
                continue;
            }
            let (x1, y1) = to_pixel(left, height, data_bounds, pixel_bounds);
            let (x2, y2) = to_pixel(right, 0.0, data_bounds, pixel_bounds);
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>\n",
                x1,
                y1,
                x2 - x1,
                y2 - y1,
                style
            ));
        }
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_start_at_zero() {
        let hist = Histogram::new(vec![1.0, 2.0, 3.0], vec![0.25, 0.75]);
        assert_eq!(hist.bounds(), Some(Bounds::new(1.0, 3.0, 0.0, 0.75)));
    }

    #[test]
    fn test_empty_bins_not_drawn() {
        let hist = Histogram::new(vec![0.0, 0.5, 1.0], vec![0.0, 1.0]);
        let svg = hist.render_svg(&Bounds::unit(), &Bounds::new(0.0, 10.0, 0.0, 10.0));
        assert_eq!(svg.matches("<rect").count(), 1);
    }
}
