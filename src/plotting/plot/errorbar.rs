//! Error bar series, drawn without connecting lines.

use crate::plotting::element::{to_pixel, Bounds};
use crate::plotting::plot::Plot;
use crate::plotting::style::{Color, LineStyle};

/// Points with asymmetric vertical and optional horizontal errors.
#[derive(Debug, Clone)]
pub struct ErrorBar {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Horizontal half-widths, one per point
    pub xerr: Option<Vec<f64>>,
    /// (below, above) distances, one pair per point
    pub yerr: Vec<(f64, f64)>,
    pub line_style: LineStyle,
    /// Half-length of the horizontal tick marking the central value
    pub tick_size: f64,
    pub label: Option<String>,
}

impl ErrorBar {
    pub fn new(x: Vec<f64>, y: Vec<f64>, yerr: Vec<(f64, f64)>) -> Self {
        ErrorBar {
            x,
            y,
            xerr: None,
            yerr,
            line_style: LineStyle::new().width(1.0),
            tick_size: 4.0,
            label: None,
        }
    }

    pub fn xerr(mut self, xerr: Vec<f64>) -> Self {
        self.xerr = Some(xerr);
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.line_style.color = color.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn points(&self) -> impl Iterator<Item = (f64, f64, f64, (f64, f64))> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .zip(self.yerr.iter())
            .enumerate()
            .map(|(i, ((&x, &y), &yerr))| {
                let xerr = self.xerr.as_ref().and_then(|e| e.get(i)).copied().unwrap_or(0.0);
                (x, y, xerr, yerr)
            })
    }
}

impl Plot for ErrorBar {
    fn bounds(&self) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        for (x, y, xerr, (below, above)) in self.points() {
            bounds.include_point(x - xerr, y - below);
            bounds.include_point(x + xerr, y + above);
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
        let style = self.line_style.to_svg_style();
        let mut svg = String::new();
        let mut segment = |(x1, y1): (f64, f64), (x2, y2): (f64, f64)| {
            svg.push_str(&format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {}/>\n",
                x1, y1, x2, y2, style
            ));
        };

        for (x, y, xerr, (below, above)) in self.points() {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let bottom = to_pixel(x, y - below, data_bounds, pixel_bounds);
            let top = to_pixel(x, y + above, data_bounds, pixel_bounds);
            segment(bottom, top);

            if xerr > 0.0 {
                let left = to_pixel(x - xerr, y, data_bounds, pixel_bounds);
                let right = to_pixel(x + xerr, y, data_bounds, pixel_bounds);
                segment(left, right);
            }

            let (cx, cy) = to_pixel(x, y, data_bounds, pixel_bounds);
            segment((cx - self.tick_size, cy), (cx + self.tick_size, cy));
        }

        svg
    }
}
