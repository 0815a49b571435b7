//! Axis configuration and tick label formatting.

use crate::plotting::style::{Color, LineStyle, TextStyle};

/// How tick values are turned into labels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TickFormatter {
    /// Magnitude-dependent formatting
    #[default]
    Auto,
    /// Display `value / scale` with two decimals
    Scaled(f64),
}

/// Configuration for an axis.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    /// Axis line style
    pub line_style: LineStyle,
    /// Length of tick marks in pixels
    pub tick_length: f64,
    /// Style for tick labels
    pub tick_label_style: TextStyle,
    /// Number of ticks to aim for
    pub num_ticks: usize,
    /// Padding between tick marks and labels
    pub tick_padding: f64,
    /// Tick label formatter
    pub formatter: TickFormatter,
}

impl AxisConfig {
    /// Create a new axis configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of ticks.
    pub fn num_ticks(mut self, num: usize) -> Self {
        self.num_ticks = num;
        self
    }

    /// Set the tick label formatter.
    pub fn formatter(mut self, formatter: TickFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Format a tick value as a label.
    pub fn format_tick(&self, value: f64) -> String {
        match self.formatter {
            TickFormatter::Scaled(scale) => format!("{:.2}", value / scale),
            TickFormatter::Auto => {
                if value == 0.0 {
                    "0".to_string()
                } else if value.abs() >= 1e4 || value.abs() < 1e-3 {
                    format!("{:.2e}", value)
                } else if value.fract() == 0.0 {
                    format!("{:.0}", value)
                } else {
                    // Trim the float noise left over from tick stepping.
                    let s = format!("{:.6}", value);
                    s.trim_end_matches('0').trim_end_matches('.').to_string()
                }
            }
        }
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        AxisConfig {
            line_style: LineStyle::new().color(Color::BLACK).width(1.0),
            tick_length: 5.0,
            tick_label_style: TextStyle::new().font_size(10.0),
            num_ticks: 5,
            tick_padding: 3.0,
            formatter: TickFormatter::Auto,
        }
    }
}
