//! Axes (plot area) implementation.

use crate::plotting::backend::SvgBackend;
use crate::plotting::element::{
    AxisConfig, Annotation, Bounds, Legend, LegendEntry, LegendPosition,
};
use crate::plotting::plot::{LinePlot, Plot};
use crate::plotting::scale::LinearScale;
use crate::plotting::style::{
    Color, DashPattern, DominantBaseline, FillStyle, LineStyle, TextAnchor, TextStyle,
};

/// Fraction of the data span added on each side of automatic limits.
const AUTO_MARGIN: f64 = 0.05;

/// An axes object representing the single plot area of a figure.
pub struct Axes {
    /// Position within figure (normalized coordinates, y upwards)
    pub position: Bounds,
    /// Plots contained in this axes, in drawing order
    plots: Vec<Box<dyn Plot>>,
    /// Text placed in axes coordinates, drawn above the plots
    annotations: Vec<Annotation>,
    /// Title
    pub title: Option<String>,
    /// X-axis label
    pub x_label: Option<String>,
    /// Y-axis label
    pub y_label: Option<String>,
    /// Legend, if requested
    pub legend: Option<Legend>,
    /// X-axis configuration
    pub x_axis: AxisConfig,
    /// Y-axis configuration
    pub y_axis: AxisConfig,
    pub title_style: TextStyle,
    pub label_style: TextStyle,
    /// Data bounds (computed from plots)
    data_bounds: Option<Bounds>,
    /// Manual x-axis limits
    x_lim: Option<(f64, f64)>,
    /// Manual y-axis limits
    y_lim: Option<(f64, f64)>,
    /// Current color cycle index
    color_index: usize,
}

impl Axes {
    /// Create a new axes with default settings.
    pub fn new() -> Self {
        Axes {
            position: Bounds::new(0.125, 0.9, 0.11, 0.88),
            plots: Vec::new(),
            annotations: Vec::new(),
            title: None,
            x_label: None,
            y_label: None,
            legend: None,
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            title_style: TextStyle::new().font_size(12.0),
            label_style: TextStyle::new().font_size(10.0),
            data_bounds: None,
            x_lim: None,
            y_lim: None,
            color_index: 0,
        }
    }

    /// Add a line plot.
    pub fn plot(&mut self, x: Vec<f64>, y: Vec<f64>) -> LinePlotBuilder<'_> {
        LinePlotBuilder {
            axes: self,
            x,
            y,
            color: None,
            linewidth: None,
            linestyle: None,
            opacity: None,
            label: None,
        }
    }

    /// Set the title.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Set the x-axis label.
    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.x_label = Some(label.into());
        self
    }

    /// Set the y-axis label.
    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.y_label = Some(label.into());
        self
    }

    /// Set the x-axis limits.
    pub fn set_xlim(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_lim = Some((min, max));
        self
    }

    /// Set the y-axis limits.
    pub fn set_ylim(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_lim = Some((min, max));
        self
    }

    /// Show the legend at a specific position.
    pub fn legend_at(&mut self, position: LegendPosition) -> &mut Self {
        match self.legend {
            Some(ref mut legend) => legend.position = position,
            None => self.legend = Some(Legend::new(position)),
        }
        self
    }

    /// Add a plot to this axes.
    pub fn add_plot(&mut self, plot: Box<dyn Plot>) {
        if let Some(plot_bounds) = plot.bounds() {
            match self.data_bounds {
                Some(ref mut bounds) => bounds.include_bounds(&plot_bounds),
                None => self.data_bounds = Some(plot_bounds),
            }
        }
        self.plots.push(plot);
    }

    /// Add a text annotation.
    pub fn annotate(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Number of plots added so far.
    pub fn num_plots(&self) -> usize {
        self.plots.len()
    }

    /// Legend entries of all labelled plots, in drawing order.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.plots.iter().filter_map(|p| p.legend_entry()).collect()
    }

    /// Get the next color from the cycle.
    fn next_color(&mut self) -> Color {
        let color = Color::parse(&format!("C{}", self.color_index % 10));
        self.color_index += 1;
        color
    }

    /// The effective x limits: explicit, else the padded data extent.
    pub fn x_range(&self) -> (f64, f64) {
        match (self.x_lim, self.data_bounds) {
            (Some(lim), _) => lim,
            (None, Some(b)) => pad(b.x_min, b.x_max),
            (None, None) => (0.0, 1.0),
        }
    }

    /// The effective y limits: explicit, else the padded data extent.
    pub fn y_range(&self) -> (f64, f64) {
        match (self.y_lim, self.data_bounds) {
            (Some(lim), _) => lim,
            (None, Some(b)) => pad(b.y_min, b.y_max),
            (None, None) => (0.0, 1.0),
        }
    }

    /// Render the axes into the backend.
    pub fn render(&self, backend: &mut SvgBackend) {
        let (figure_width, figure_height) = (backend.width, backend.height);
        let pixel_bounds = Bounds::new(
            self.position.x_min * figure_width,
            self.position.x_max * figure_width,
            (1.0 - self.position.y_max) * figure_height,
            (1.0 - self.position.y_min) * figure_height,
        );

        let x_scale = {
            let (lo, hi) = self.x_range();
            LinearScale::new(lo, hi)
        };
        let y_scale = {
            let (lo, hi) = self.y_range();
            LinearScale::new(lo, hi)
        };
        let (x_min, x_max) = x_scale.range();
        let (y_min, y_max) = y_scale.range();
        let data_bounds = Bounds::new(x_min, x_max, y_min, y_max);

        backend.start_clip(
            "plot-area",
            pixel_bounds.x_min,
            pixel_bounds.y_min,
            pixel_bounds.width(),
            pixel_bounds.height(),
        );
        for plot in &self.plots {
            backend.add_content(plot.render_svg(&data_bounds, &pixel_bounds));
        }
        backend.end_clip();

        self.render_frame(backend, &pixel_bounds, &x_scale, &y_scale);
        self.render_labels(backend, &pixel_bounds);

        if let Some(ref legend) = self.legend {
            let entries = self.legend_entries();
            if !entries.is_empty() {
                render_legend(backend, legend, &entries, &pixel_bounds);
            }
        }

        for annotation in &self.annotations {
            backend.add_content(annotation.to_svg(&pixel_bounds));
        }
    }

    fn render_frame(
        &self,
        backend: &mut SvgBackend,
        pixel_bounds: &Bounds,
        x_scale: &LinearScale,
        y_scale: &LinearScale,
    ) {
        let frame = FillStyle::new(Color::Named("none".to_string()))
            .stroke(self.x_axis.line_style.color.clone())
            .stroke_width(self.x_axis.line_style.width);
        backend.draw_rect(
            pixel_bounds.x_min,
            pixel_bounds.y_min,
            pixel_bounds.width(),
            pixel_bounds.height(),
            &frame,
        );

        let tick_style = LineStyle::new()
            .color(self.x_axis.line_style.color.clone())
            .width(1.0);

        for tick in x_scale.ticks(self.x_axis.num_ticks) {
            let px = pixel_bounds.x_min + x_scale.transform(tick) * pixel_bounds.width();
            let bottom = pixel_bounds.y_max;
            backend.draw_line(px, bottom, px, bottom + self.x_axis.tick_length, &tick_style);
            let style = self
                .x_axis
                .tick_label_style
                .clone()
                .anchor(TextAnchor::Middle)
                .baseline(DominantBaseline::Hanging);
            backend.draw_text(
                px,
                bottom + self.x_axis.tick_length + self.x_axis.tick_padding,
                &self.x_axis.format_tick(tick),
                &style,
            );
        }

        for tick in y_scale.ticks(self.y_axis.num_ticks) {
            let py = pixel_bounds.y_max - y_scale.transform(tick) * pixel_bounds.height();
            let left = pixel_bounds.x_min;
            backend.draw_line(left - self.y_axis.tick_length, py, left, py, &tick_style);
            let style = self
                .y_axis
                .tick_label_style
                .clone()
                .anchor(TextAnchor::End)
                .baseline(DominantBaseline::Middle);
            backend.draw_text(
                left - self.y_axis.tick_length - self.y_axis.tick_padding,
                py,
                &self.y_axis.format_tick(tick),
                &style,
            );
        }
    }

    fn render_labels(&self, backend: &mut SvgBackend, pixel_bounds: &Bounds) {
        let center_x = (pixel_bounds.x_min + pixel_bounds.x_max) / 2.0;
        let center_y = (pixel_bounds.y_min + pixel_bounds.y_max) / 2.0;

        if let Some(ref title) = self.title {
            let style = self.title_style.clone().anchor(TextAnchor::Middle);
            backend.draw_text(center_x, pixel_bounds.y_min - 8.0, title, &style);
        }

        if let Some(ref label) = self.x_label {
            let style = self
                .label_style
                .clone()
                .anchor(TextAnchor::Middle)
                .baseline(DominantBaseline::Hanging);
            backend.draw_text(center_x, pixel_bounds.y_max + 24.0, label, &style);
        }

        if let Some(ref label) = self.y_label {
            let mut style = self.label_style.clone().anchor(TextAnchor::Middle);
            style.rotation = -90.0;
            backend.draw_text(pixel_bounds.x_min - 42.0, center_y, label, &style);
        }
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}

fn pad(min: f64, max: f64) -> (f64, f64) {
    let margin = (max - min) * AUTO_MARGIN;
    (min - margin, max + margin)
}

fn render_legend(
    backend: &mut SvgBackend,
    legend: &Legend,
    entries: &[LegendEntry],
    pixel_bounds: &Bounds,
) {
    let (box_width, box_height) = legend.box_size(entries);
    let (align_x, align_y) = legend.position.alignment();
    let lx = pixel_bounds.x_min
        + legend.margin
        + align_x * (pixel_bounds.width() - 2.0 * legend.margin - box_width);
    let ly = pixel_bounds.y_min
        + legend.margin
        + align_y * (pixel_bounds.height() - 2.0 * legend.margin - box_height);

    backend.draw_rect(lx, ly, box_width, box_height, &legend.background);

    let line_height = legend.line_height();
    let text_style = legend
        .text_style
        .clone()
        .baseline(DominantBaseline::Middle);

    for (i, entry) in entries.iter().enumerate() {
        let ey = ly + legend.padding + (i as f64 + 0.5) * line_height;
        let sample_x1 = lx + legend.padding;
        let sample_x2 = sample_x1 + legend.line_length;

        match (&entry.line_style, &entry.fill_style) {
            (Some(line), _) => backend.draw_line(sample_x1, ey, sample_x2, ey, line),
            (None, Some(fill)) => {
                let patch_height = legend.text_style.font_size * 0.7;
                backend.draw_rect(
                    sample_x1,
                    ey - patch_height / 2.0,
                    legend.line_length,
                    patch_height,
                    fill,
                );
            }
            (None, None) => {}
        }

        backend.draw_text(
            sample_x2 + legend.label_gap,
            ey,
            &entry.label,
            &text_style,
        );
    }
}

// Builder types for fluent API

/// Builder for line plots.
pub struct LinePlotBuilder<'a> {
    axes: &'a mut Axes,
    x: Vec<f64>,
    y: Vec<f64>,
    color: Option<Color>,
    linewidth: Option<f64>,
    linestyle: Option<DashPattern>,
    opacity: Option<f64>,
    label: Option<String>,
}

impl<'a> LinePlotBuilder<'a> {
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn linewidth(mut self, width: f64) -> Self {
        self.linewidth = Some(width);
        self
    }

    pub fn linestyle(mut self, style: DashPattern) -> Self {
        self.linestyle = Some(style);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn label(mut self, label: Option<impl Into<String>>) -> Self {
        self.label = label.map(Into::into);
        self
    }

    pub fn build(self) -> &'a mut Axes {
        let color = match self.color {
            Some(color) => color,
            None => self.axes.next_color(),
        };

        let mut plot = LinePlot::new(self.x, self.y).color(color);

        if let Some(width) = self.linewidth {
            plot = plot.linewidth(width);
        }
        if let Some(style) = self.linestyle {
            plot = plot.linestyle(style);
        }
        if let Some(opacity) = self.opacity {
            plot = plot.opacity(opacity);
        }
        if let Some(label) = self.label {
            plot = plot.label(label);
        }

        self.axes.add_plot(Box::new(plot));
        self.axes
    }
}
