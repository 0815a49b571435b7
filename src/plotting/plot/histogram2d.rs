//! Two-dimensional histogram rendered as a colored cell mesh.

use crate::plotting::element::{to_pixel, Bounds};
use crate::plotting::plot::Plot;
use crate::plotting::style::viridis;

/// Cells with `None` are left blank. `values[i][j]` covers
/// `[x_edges[i], x_edges[i+1]] x [y_edges[j], y_edges[j+1]]`.
#[derive(Debug, Clone)]
pub struct Histogram2D {
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl Histogram2D {
    pub fn new(x_edges: Vec<f64>, y_edges: Vec<f64>, values: Vec<Vec<Option<f64>>>) -> Self {
        Histogram2D {
            x_edges,
            y_edges,
            values,
        }
    }

    /// Smallest and largest non-blank values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut present = self.values.iter().flatten().flatten().copied();
        let first = present.next()?;
        Some(present.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl Plot for Histogram2D {
    fn bounds(&self) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        if let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) = (
            self.x_edges.first(),
            self.x_edges.last(),
            self.y_edges.first(),
            self.y_edges.last(),
        ) {
            bounds.include_point(x0, y0);
            bounds.include_point(x1, y1);
        }
        bounds.into_option()
    }

    fn label(&self) -> Option<&str> {
        None
    }

    fn render_svg(&self, data_bounds: &Bounds, pixel_bounds: &Bounds) -> String {
        let Some((lo, hi)) = self.value_range() else {
            return String::new();
        };
        let span = if hi > lo { hi - lo } else { 1.0 };

        let mut svg = String::new();
        for (i, column) in self.values.iter().enumerate() {
            let (Some(&left), Some(&right)) = (self.x_edges.get(i), self.x_edges.get(i + 1)) else {
                continue;
            };
            for (j, value) in column.iter().enumerate() {
                let (Some(value), Some(&bottom), Some(&top)) =
                    (value, self.y_edges.get(j), self.y_edges.get(j + 1))
                else {
                    continue;
                };
                let (x1, y1) = to_pixel(left, top, data_bounds, pixel_bounds);
                let (x2, y2) = to_pixel(right, bottom, data_bounds, pixel_bounds);
                // Cells overlap by a fraction of a pixel to avoid hairline seams.
                svg.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"none\"/>\n",
                    x1,
                    y1,
                    x2 - x1 + 0.3,
                    y2 - y1 + 0.3,
                    viridis((value - lo) / span).to_svg_string()
                ));
            }
        }
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cells_are_skipped() {
        let hist = Histogram2D::new(
            vec![0.0, 0.5, 1.0],
            vec![0.0, 0.5, 1.0],
            vec![vec![Some(1.0), None], vec![None, Some(3.0)]],
        );
        assert_eq!(hist.value_range(), Some((1.0, 3.0)));
        let svg = hist.render_svg(&Bounds::unit(), &Bounds::new(0.0, 10.0, 0.0, 10.0));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains("rgb(68,1,84)"));
        assert!(svg.contains("rgb(253,231,37)"));
    }
}
