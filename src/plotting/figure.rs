//! Figure (canvas) implementation.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::plotting::axes::Axes;
use crate::plotting::backend::SvgBackend;
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::style::Color;

/// Pixels per inch of the SVG canvas (one pixel per point).
pub const DPI: f64 = 72.0;

/// A figure holding a single axes.
pub struct Figure {
    /// Figure width in pixels
    pub width: f64,
    /// Figure height in pixels
    pub height: f64,
    /// Background color
    pub background: Color,
    axes: Axes,
}

impl Figure {
    /// Create a new figure with the given dimensions in pixels.
    pub fn new(width: f64, height: f64) -> Self {
        Figure {
            width,
            height,
            background: Color::WHITE,
            axes: Axes::new(),
        }
    }

    /// Resize the figure, in inches.
    pub fn set_size_inches(&mut self, width: f64, height: f64) -> PlotResult<()> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(PlotError::InvalidConfig(format!(
                "figure size must be positive, got {} x {} in",
                width, height
            )));
        }
        self.width = width * DPI;
        self.height = height * DPI;
        Ok(())
    }

    /// Get the axes.
    pub fn gca(&mut self) -> &mut Axes {
        &mut self.axes
    }

    /// Read-only access to the axes.
    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// Render the figure to an SVG string.
    pub fn render(&self) -> String {
        let mut backend = SvgBackend::new(self.width, self.height);

        backend.add_content(format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            self.width,
            self.height,
            self.background.to_svg_string()
        ));

        self.axes.render(&mut backend);

        backend.render()
    }

    /// Save the figure. Only `.svg` output is supported.
    pub fn save(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if !is_svg {
            return Err(PlotError::InvalidConfig(format!(
                "unsupported output format for '{}', expected an .svg file",
                path.display()
            )));
        }

        let svg = self.render();
        let mut file = File::create(path)?;
        file.write_all(svg.as_bytes())?;
        Ok(())
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(6.4 * DPI, 4.8 * DPI)
    }
}
