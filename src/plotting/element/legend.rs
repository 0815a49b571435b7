//! Legend configuration.

use crate::plotting::style::{Color, FillStyle, LineStyle, TextStyle};

/// Position of the legend inside the axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LegendPosition {
    /// Top-left corner
    TopLeft,
    /// Top-right corner
    #[default]
    TopRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-right corner
    BottomRight,
    /// Center top
    Top,
    /// Center bottom
    Bottom,
    /// Center left
    Left,
    /// Center right
    Right,
    /// Center
    Center,
}

impl LegendPosition {
    /// Resolve a matplotlib location string. `best` falls back to the
    /// upper right corner.
    pub fn from_location(location: &str) -> Option<Self> {
        let position = match location.trim() {
            "best" | "upper right" => LegendPosition::TopRight,
            "upper left" => LegendPosition::TopLeft,
            "lower left" => LegendPosition::BottomLeft,
            "lower right" => LegendPosition::BottomRight,
            "right" | "center right" => LegendPosition::Right,
            "center left" => LegendPosition::Left,
            "lower center" => LegendPosition::Bottom,
            "upper center" => LegendPosition::Top,
            "center" => LegendPosition::Center,
            _ => return None,
        };
        Some(position)
    }

    /// Horizontal and vertical alignment fractions (0 = left/top, 1 = right/bottom).
    pub fn alignment(&self) -> (f64, f64) {
        match self {
            LegendPosition::TopLeft => (0.0, 0.0),
            LegendPosition::TopRight => (1.0, 0.0),
            LegendPosition::BottomLeft => (0.0, 1.0),
            LegendPosition::BottomRight => (1.0, 1.0),
            LegendPosition::Top => (0.5, 0.0),
            LegendPosition::Bottom => (0.5, 1.0),
            LegendPosition::Left => (0.0, 0.5),
            LegendPosition::Right => (1.0, 0.5),
            LegendPosition::Center => (0.5, 0.5),
        }
    }
}

/// A single entry in the legend.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    /// Label text
    pub label: String,
    /// Line sample (if applicable)
    pub line_style: Option<LineStyle>,
    /// Patch sample for bands and bars
    pub fill_style: Option<FillStyle>,
}

impl LegendEntry {
    /// Create a new legend entry with just a label.
    pub fn new(label: impl Into<String>) -> Self {
        LegendEntry {
            label: label.into(),
            line_style: None,
            fill_style: None,
        }
    }

    /// Set the line style.
    pub fn line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    /// Set the fill style.
    pub fn fill_style(mut self, style: FillStyle) -> Self {
        self.fill_style = Some(style);
        self
    }
}

/// Legend configuration.
#[derive(Debug, Clone)]
pub struct Legend {
    /// Position of the legend
    pub position: LegendPosition,
    /// Background fill style
    pub background: FillStyle,
    /// Text style for labels
    pub text_style: TextStyle,
    /// Padding inside the legend box
    pub padding: f64,
    /// Distance from the axes frame
    pub margin: f64,
    /// Length of the line sample in the legend
    pub line_length: f64,
    /// Gap between sample and label
    pub label_gap: f64,
}

impl Legend {
    /// Create a new legend at the given position.
    pub fn new(position: LegendPosition) -> Self {
        Legend {
            position,
            ..Default::default()
        }
    }

    /// Height of one entry row.
    pub fn line_height(&self) -> f64 {
        self.text_style.font_size * 1.5
    }

    /// Size of the legend box for the given entries.
    pub fn box_size(&self, entries: &[LegendEntry]) -> (f64, f64) {
        let label_width = entries
            .iter()
            .map(|e| self.text_style.approx_width(&e.label))
            .fold(0.0, f64::max);
        let width = self.padding * 2.0 + self.line_length + self.label_gap + label_width;
        let height = self.padding * 2.0 + entries.len() as f64 * self.line_height();
        (width, height)
    }
}

impl Default for Legend {
    fn default() -> Self {
        Legend {
            position: LegendPosition::TopRight,
            background: FillStyle::new(Color::WHITE)
                .opacity(0.8)
                .stroke(Color::rgb(204, 204, 204))
                .stroke_width(0.8),
            text_style: TextStyle::new().font_size(10.0),
            padding: 6.0,
            margin: 6.0,
            line_length: 20.0,
            label_gap: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_location() {
        assert_eq!(
            LegendPosition::from_location("lower left"),
            Some(LegendPosition::BottomLeft)
        );
        assert_eq!(
            LegendPosition::from_location("best"),
            Some(LegendPosition::TopRight)
        );
        assert_eq!(LegendPosition::from_location("somewhere"), None);
    }

    #[test]
    fn test_box_grows_with_label() {
        let legend = Legend::default();
        let short = legend.box_size(&[LegendEntry::new("a")]);
        let long = legend.box_size(&[LegendEntry::new("a much longer label")]);
        assert!(long.0 > short.0);
        assert_eq!(long.1, short.1);
    }
}
