//! Plot types for visualizing data.

mod band;
mod contour;
mod errorbar;
mod histogram;
mod histogram2d;
mod line;

pub use band::FillBetween;
pub use contour::{ContourLevel, ContourSet};
pub use errorbar::ErrorBar;
pub use histogram::Histogram;
pub use histogram2d::Histogram2D;
pub use line::LinePlot;

use crate::plotting::element::{Bounds, LegendEntry};
use crate::plotting::style::{FillStyle, LineStyle};

/// Trait for plot types that can be rendered.
pub trait Plot {
    /// Get the data bounds for this plot.
    fn bounds(&self) -> Option<Bounds>;

    /// Get the label for this plot (for legend).
    fn label(&self) -> Option<&str>;

    /// Get the line style for legend display.
    fn line_style(&self) -> Option<LineStyle> {
        None
    }

    /// Get the fill style for legend display.
    fn fill_style(&self) -> Option<FillStyle> {
        None
    }

    /// Create a legend entry for this plot.
    fn legend_entry(&self) -> Option<LegendEntry> {
        self.label().map(|label| {
            let mut entry = LegendEntry::new(label);
            if let Some(style) = self.line_style() {
                entry = entry.line_style(style);
            }
            if let Some(style) = self.fill_style() {
                entry = entry.fill_style(style);
            }
            entry
        })
    }

    /// Render this plot to SVG, returning the SVG elements as a string.
    fn render_svg(&self, data_bounds: &Bounds, pixel_bounds: &Bounds) -> String;
}

/// SVG path data through the finite points of a series. Non-finite values
/// break the path, like masked values in a line plot.
pub(crate) fn path_data(
    x: &[f64],
    y: &[f64],
    data_bounds: &Bounds,
    pixel_bounds: &Bounds,
) -> String {
    let mut path = String::new();
    let mut pen_down = false;
    for (&xv, &yv) in x.iter().zip(y.iter()) {
        if !xv.is_finite() || !yv.is_finite() {
            pen_down = false;
            continue;
        }
        let (px, py) = crate::plotting::element::to_pixel(xv, yv, data_bounds, pixel_bounds);
        let command = if pen_down { " L" } else { " M" };
        path.push_str(&format!("{}{:.2},{:.2}", command, px, py));
        pen_down = true;
    }
    path.trim_start().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_data_breaks_on_nan() {
        let unit = Bounds::unit();
        let pixels = Bounds::new(0.0, 10.0, 0.0, 10.0);
        let path = path_data(
            &[0.0, 0.5, 0.6, 1.0],
            &[0.0, f64::NAN, 0.5, 1.0],
            &unit,
            &pixels,
        );
        assert_eq!(path, "M0.00,10.00 M6.00,5.00 L10.00,0.00");
    }
}
