//! Filled region between two curves.

use crate::plotting::element::{to_pixel, Bounds};
use crate::plotting::plot::Plot;
use crate::plotting::style::{Color, FillStyle};

/// The area between `lower` and `upper` over `x`.
#[derive(Debug, Clone)]
pub struct FillBetween {
    pub x: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub fill: FillStyle,
    pub label: Option<String>,
}

impl FillBetween {
    pub fn new(x: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        FillBetween {
            x,
            lower,
            upper,
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

    fn finite_points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .map(|(&x, (&lo, &hi))| (x, lo, hi))
            .filter(|(x, lo, hi)| x.is_finite() && lo.is_finite() && hi.is_finite())
    }
}

impl Plot for FillBetween {
    fn bounds(&self) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        for (x, lo, hi) in self.finite_points() {
            bounds.include_point(x, lo);
            bounds.include_point(x, hi);
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
        let points: Vec<(f64, f64, f64)> = self.finite_points().collect();
        if points.len() < 2 {
            return String::new();
        }

        // Walk along the upper edge, then back along the lower one.
        let mut polygon = Vec::with_capacity(points.len() * 2);
        for &(x, _, hi) in &points {
            polygon.push(to_pixel(x, hi, data_bounds, pixel_bounds));
        }
        for &(x, lo, _) in points.iter().rev() {
            polygon.push(to_pixel(x, lo, data_bounds, pixel_bounds));
        }

        let coords: Vec<String> = polygon
            .iter()
            .map(|(px, py)| format!("{:.2},{:.2}", px, py))
            .collect();
        format!(
            "<polygon points=\"{}\" {}/>\n",
            coords.join(" "),
            self.fill.to_svg_style()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_closes_over_both_edges() {
        let band = FillBetween::new(vec![0.0, 1.0], vec![0.0, 0.0], vec![1.0, 1.0]);
        let svg = band.render_svg(&Bounds::unit(), &Bounds::new(0.0, 10.0, 0.0, 10.0));
        assert!(svg.contains("points=\"0.00,0.00 10.00,0.00 10.00,10.00 0.00,10.00\""));
        assert_eq!(band.bounds(), Some(Bounds::unit()));
    }
}
