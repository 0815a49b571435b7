//! Iso-lines of a gridded scalar field, traced with marching squares.

use crate::plotting::element::{escape_xml, to_pixel, Bounds};
use crate::plotting::plot::Plot;
use crate::plotting::style::{Color, LineStyle, TextStyle};

type Point = (f64, f64);

/// The segments traced for one level.
#[derive(Debug, Clone)]
pub struct ContourLevel {
    pub value: f64,
    /// Inline label drawn on the longest segment run
    pub label: Option<String>,
    pub segments: Vec<(Point, Point)>,
}

/// A set of contour levels sharing one line style.
#[derive(Debug, Clone)]
pub struct ContourSet {
    pub levels: Vec<ContourLevel>,
    pub line_style: LineStyle,
    pub label_style: TextStyle,
    extent: Bounds,
}

impl ContourSet {
    /// Trace `levels` through `grid`, where `grid[i][j]` is the value at
    /// `(x[i], y[j])`. Each level may carry an inline label.
    pub fn trace(x: &[f64], y: &[f64], grid: &[Vec<f64>], levels: &[(f64, Option<String>)]) -> Self {
        let mut extent = Bounds::empty();
        if let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) = (x.first(), x.last(), y.first(), y.last()) {
            extent.include_point(x0, y0);
            extent.include_point(x1, y1);
        }

        let levels = levels
            .iter()
            .map(|(value, label)| ContourLevel {
                value: *value,
                label: label.clone(),
                segments: march_cells(x, y, grid, *value),
            })
            .collect();

        ContourSet {
            levels,
            line_style: LineStyle::new().width(1.5),
            label_style: TextStyle::new().font_size(10.0),
            extent,
        }
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        let color = color.into();
        self.label_style.color = color.clone();
        self.line_style.color = color;
        self
    }
}

/// Marching squares over all grid cells. A corner counts as inside when
/// its value exceeds `level`.
fn march_cells(x: &[f64], y: &[f64], grid: &[Vec<f64>], level: f64) -> Vec<(Point, Point)> {
    let mut segments = Vec::new();
    let nx = x.len().min(grid.len());
    if nx < 2 {
        return segments;
    }
    let ny = y.len().min(grid.iter().map(Vec::len).min().unwrap_or(0));

    for col in 0..ny.saturating_sub(1) {
        for row in 0..nx - 1 {
            let corners = [
                (x[row], y[col]),
                (x[row + 1], y[col]),
                (x[row + 1], y[col + 1]),
                (x[row], y[col + 1]),
            ];
            let values = [
                grid[row][col],
                grid[row + 1][col],
                grid[row + 1][col + 1],
                grid[row][col + 1],
            ];

            let case = values
                .iter()
                .enumerate()
                .fold(0u8, |acc, (bit, &v)| acc | (((v > level) as u8) << bit));

            let edges: &[(usize, usize)] = match case {
                0 | 15 => &[],
                1 | 14 => &[(3, 0)],
                2 | 13 => &[(0, 1)],
                3 | 12 => &[(3, 1)],
                4 | 11 => &[(1, 2)],
                5 => &[(3, 2), (0, 1)],
                10 => &[(3, 0), (1, 2)],
                6 | 9 => &[(0, 2)],
                7 | 8 => &[(3, 2)],
                _ => &[],
            };

            for &(a, b) in edges {
                segments.push((
                    interpolate_edge(a, &corners, &values, level),
                    interpolate_edge(b, &corners, &values, level),
                ));
            }
        }
    }

    segments
}

/// Point on cell edge `edge` (0 bottom, 1 right, 2 top, 3 left) where the
/// field crosses `level`.
fn interpolate_edge(edge: usize, corners: &[Point; 4], values: &[f64; 4], level: f64) -> Point {
    let (a, b) = match edge {
        0 => (0, 1),
        1 => (1, 2),
        2 => (2, 3),
        _ => (3, 0),
    };
    let (va, vb) = (values[a], values[b]);
    let t = if vb != va {
        ((level - va) / (vb - va)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    (
        corners[a].0 + (corners[b].0 - corners[a].0) * t,
        corners[a].1 + (corners[b].1 - corners[a].1) * t,
    )
}

impl Plot for ContourSet {
    fn bounds(&self) -> Option<Bounds> {
        self.extent.into_option()
    }

    fn label(&self) -> Option<&str> {
        None
    }

    fn render_svg(&self, data_bounds: &Bounds, pixel_bounds: &Bounds) -> String {
        let style = self.line_style.to_svg_style();
        let mut svg = String::new();

        for level in &self.levels {
            if level.segments.is_empty() {
                continue;
            }

            let mut path = String::new();
            let mut longest: Option<(f64, Point)> = None;
            for &(start, end) in &level.segments {
                let (x1, y1) = to_pixel(start.0, start.1, data_bounds, pixel_bounds);
                let (x2, y2) = to_pixel(end.0, end.1, data_bounds, pixel_bounds);
                path.push_str(&format!("M{:.2},{:.2} L{:.2},{:.2} ", x1, y1, x2, y2));

                let length = (x2 - x1).hypot(y2 - y1);
                if longest.is_none_or(|(l, _)| length > l) {
                    longest = Some((length, ((x1 + x2) / 2.0, (y1 + y2) / 2.0)));
                }
            }
            svg.push_str(&format!("<path d=\"{}\" {}/>\n", path.trim_end(), style));

            if let (Some(label), Some((_, (lx, ly)))) = (&level.label, longest) {
                let width = self.label_style.approx_width(label) + 4.0;
                let height = self.label_style.font_size * 1.2;
                svg.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"white\" stroke=\"none\"/>\n",
                    lx - width / 2.0,
                    ly - height / 2.0,
                    width,
                    height
                ));
                svg.push_str(&format!(
                    "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>\n",
                    lx,
                    ly,
                    self.label_style.font_family,
                    self.label_style.font_size,
                    self.label_style.color.to_svg_string(),
                    escape_xml(label)
                ));
            }
        }

        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cone(n: usize) -> (Vec<f64>, Vec<f64>, Vec<Vec<f64>>) {
        let axis: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64 * 2.0 - 1.0).collect();
        let grid = axis
            .iter()
            .map(|&x| axis.iter().map(|&y| 1.0 - (x * x + y * y).sqrt()).collect())
            .collect();
        (axis.clone(), axis, grid)
    }

    #[test]
    fn test_circle_segments_lie_on_level() {
        let (x, y, grid) = cone(41);
        let set = ContourSet::trace(&x, &y, &grid, &[(0.5, Some("68%".into()))]);
        let segments = &set.levels[0].segments;
        assert!(!segments.is_empty());
        for &((x1, y1), _) in segments {
            let r = x1.hypot(y1);
            assert!((r - 0.5).abs() < 0.05, "radius {}", r);
        }
    }

    #[test]
    fn test_level_outside_field_has_no_segments() {
        let (x, y, grid) = cone(11);
        let set = ContourSet::trace(&x, &y, &grid, &[(2.0, None)]);
        assert!(set.levels[0].segments.is_empty());
        assert_eq!(set.bounds(), Some(Bounds::new(-1.0, 1.0, -1.0, 1.0)));
    }

    #[test]
    fn test_render_draws_label() {
        let (x, y, grid) = cone(21);
        let set = ContourSet::trace(&x, &y, &grid, &[(0.5, Some("95%".into()))]).color("OrangeRed");
        let svg = set.render_svg(&Bounds::new(-1.0, 1.0, -1.0, 1.0), &Bounds::new(0.0, 200.0, 0.0, 200.0));
        assert!(svg.contains(">95%</text>"));
        assert!(svg.contains("stroke=\"orangered\""));
    }
}
